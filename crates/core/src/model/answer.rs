use serde::{Deserialize, Serialize};

/// Outcome of one attempt at one vocabulary entry.
///
/// A retry after a wrong answer produces a new record; records are never
/// rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub index: usize,
    pub correct: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(index: usize, correct: bool) -> Self {
        Self { index, correct }
    }

    #[must_use]
    pub fn correct(index: usize) -> Self {
        Self::new(index, true)
    }

    #[must_use]
    pub fn wrong(index: usize) -> Self {
        Self::new(index, false)
    }
}
