use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::AnswerRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// How many wrong attempts a single entry collected in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissCount {
    pub index: usize,
    pub misses: u32,
}

/// Aggregate summary for a completed drill session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    correct: u32,
    incorrect: u32,
    misses: Vec<MissCount>,
}

impl SessionSummary {
    /// Build a summary from the answer records of one session.
    ///
    /// Misses are sorted by count, highest first, ties by index.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_records(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        records: &[AnswerRecord],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut per_index: BTreeMap<usize, u32> = BTreeMap::new();

        for record in records {
            if record.correct {
                correct = correct.saturating_add(1);
            } else {
                incorrect = incorrect.saturating_add(1);
                let slot = per_index.entry(record.index).or_default();
                *slot = slot.saturating_add(1);
            }
        }

        let mut misses = per_index
            .into_iter()
            .map(|(index, misses)| MissCount { index, misses })
            .collect::<Vec<_>>();
        misses.sort_by(|a, b| b.misses.cmp(&a.misses).then(a.index.cmp(&b.index)));

        Ok(Self {
            started_at,
            completed_at,
            correct,
            incorrect,
            misses,
        })
    }

    /// Wall time between the start and the end of the session.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn total_answers(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Share of correct answers as a whole percentage, rounded. Zero when
    /// nothing was answered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accuracy_percent(&self) -> u32 {
        let total = self.total_answers();
        if total == 0 {
            return 0;
        }
        (f64::from(self.correct) * 100.0 / f64::from(total)).round() as u32
    }

    /// Entries with at least one wrong attempt, hardest first.
    #[must_use]
    pub fn misses(&self) -> &[MissCount] {
        &self.misses
    }

    /// At most `limit` of the hardest entries.
    #[must_use]
    pub fn hardest(&self, limit: usize) -> &[MissCount] {
        &self.misses[..self.misses.len().min(limit)]
    }
}
