use std::fmt;

use serde::{Deserialize, Serialize};

//
// ─── FIELD ─────────────────────────────────────────────────────────────────────
//

/// Name of a vocabulary column usable as the question or answer side.
///
/// Names are matched exactly against the sheet header, so `"pinyin"` and
/// `"PINYIN"` are different fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field(String);

impl Field {
    pub const TERM: &'static str = "term";
    pub const PINYIN: &'static str = "PINYIN";
    pub const DEFINITION: &'static str = "definition";

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn term() -> Self {
        Self::new(Self::TERM)
    }

    #[must_use]
    pub fn pinyin() -> Self {
        Self::new(Self::PINYIN)
    }

    #[must_use]
    pub fn definition() -> Self {
        Self::new(Self::DEFINITION)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

//
// ─── DIRECTION ─────────────────────────────────────────────────────────────────
//

/// Question/answer pairing used by a drill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub question: Field,
    pub answer: Field,
}

impl Direction {
    #[must_use]
    pub fn new(question: impl Into<Field>, answer: impl Into<Field>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.question, self.answer)
    }
}

//
// ─── MENU SELECTION ────────────────────────────────────────────────────────────
//

/// A field selector typed at the session menu.
///
/// The raw text is kept even for the all-sentinel, because the session
/// driver later reuses it verbatim as a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// The sentinel asking for the full cycle.
    All(String),
    Single(Field),
}

impl FieldSelection {
    /// Classify `raw` against the all-sentinel. Matching is exact.
    #[must_use]
    pub fn parse(raw: &str, all_token: &str) -> Self {
        if raw == all_token {
            Self::All(raw.to_owned())
        } else {
            Self::Single(Field::new(raw))
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All(_))
    }

    /// The selector reinterpreted as a field name.
    #[must_use]
    pub fn as_field(&self) -> Field {
        match self {
            Self::All(raw) => Field::new(raw.as_str()),
            Self::Single(field) => field.clone(),
        }
    }
}
