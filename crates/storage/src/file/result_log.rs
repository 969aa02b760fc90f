use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use drill_core::model::AnswerRecord;
use serde::Serialize;

use crate::repository::{ResultLog, StorageError};

/// CSV result log, one `index,True|False` line per attempt.
///
/// The file is reopened in append mode for every record, so everything
/// written survives an abrupt exit.
#[derive(Debug, Clone)]
pub struct CsvResultLog {
    path: PathBuf,
}

#[derive(Serialize)]
struct LogRow {
    index: usize,
    correct: &'static str,
}

impl From<AnswerRecord> for LogRow {
    fn from(record: AnswerRecord) -> Self {
        Self {
            index: record.index,
            correct: if record.correct { "True" } else { "False" },
        }
    }
}

impl CsvResultLog {
    /// Create the log, truncating any file left by an earlier run.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        File::create(&path).map_err(|e| StorageError::io(&path, e))?;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultLog for CsvResultLog {
    fn append(&self, record: AnswerRecord) -> Result<(), StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(LogRow::from(record))?;
        writer.flush().map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}
