//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{SessionSummaryError, VocabError};
use storage::repository::StorageError;

/// Errors emitted by a `Prompter`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptError {
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while drilling.
///
/// `Exit` is not a failure: it carries the user's request to stop straight
/// up to the binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillError {
    #[error("session ended by user")]
    Exit,
    #[error(transparent)]
    Vocab(#[from] VocabError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

impl DrillError {
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }
}
