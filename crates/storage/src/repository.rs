use drill_core::model::{AnswerRecord, VocabError, VocabSet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("sheet {sheet:?} not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    #[error("poisoned lock: {0}")]
    Lock(String),

    #[error(transparent)]
    Vocab(#[from] VocabError),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read-only source of vocabulary sheets.
pub trait VocabSource {
    /// Names of the sheets this source can load.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be opened.
    fn sheet_names(&self) -> Result<Vec<String>, StorageError>;

    /// Load one sheet fully into memory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::SheetNotFound` for an unknown sheet, or other
    /// storage errors for unreadable or malformed data.
    fn load_sheet(&self, sheet: &str) -> Result<VocabSet, StorageError>;
}

/// Append-only sink for answer outcomes. Never read back by the drill.
pub trait ResultLog {
    /// Append one record after any previously appended ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    fn append(&self, record: AnswerRecord) -> Result<(), StorageError>;
}

/// In-memory sheets for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryVocabSource {
    sheets: HashMap<String, VocabSet>,
}

impl InMemoryVocabSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `set` under its own name.
    #[must_use]
    pub fn with_sheet(mut self, set: VocabSet) -> Self {
        self.sheets.insert(set.name().to_owned(), set);
        self
    }
}

impl VocabSource for InMemoryVocabSource {
    fn sheet_names(&self) -> Result<Vec<String>, StorageError> {
        let mut names = self.sheets.keys().cloned().collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }

    fn load_sheet(&self, sheet: &str) -> Result<VocabSet, StorageError> {
        match self.sheets.get(sheet) {
            Some(set) => Ok(set.clone()),
            None => Err(StorageError::SheetNotFound {
                sheet: sheet.to_owned(),
                available: self.sheet_names()?.join(", "),
            }),
        }
    }
}

/// In-memory result log. Clones share the same record list.
#[derive(Clone, Default)]
pub struct InMemoryResultLog {
    records: Arc<Mutex<Vec<AnswerRecord>>>,
}

impl InMemoryResultLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, in order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Lock` if a writer panicked while holding the lock.
    pub fn records(&self) -> Result<Vec<AnswerRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl ResultLog for InMemoryResultLog {
    fn append(&self, record: AnswerRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.push(record);
        Ok(())
    }
}
