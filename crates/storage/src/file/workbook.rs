use std::path::PathBuf;

use calamine::{Data, Range, Reader, open_workbook_auto};
use drill_core::model::{VocabError, VocabSet};
use tracing::debug;

use crate::repository::{StorageError, VocabSource};

/// Vocabulary loaded from a spreadsheet workbook (`.xlsx`, `.xls`, `.ods`).
///
/// Every sheet is one vocabulary set; its first row names the columns.
/// The file is opened on each call, nothing is cached.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<calamine::Sheets<std::io::BufReader<std::fs::File>>, StorageError> {
        open_workbook_auto(&self.path)
            .map_err(|e| StorageError::Workbook(format!("{}: {e}", self.path.display())))
    }
}

impl VocabSource for WorkbookSource {
    fn sheet_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.open()?.sheet_names())
    }

    fn load_sheet(&self, sheet: &str) -> Result<VocabSet, StorageError> {
        let mut workbook = self.open()?;
        let names = workbook.sheet_names();
        if !names.iter().any(|name| name == sheet) {
            return Err(StorageError::SheetNotFound {
                sheet: sheet.to_owned(),
                available: names.join(", "),
            });
        }

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| StorageError::Workbook(format!("{sheet}: {e}")))?;

        let set = vocab_from_range(sheet, &range)?;
        debug!(sheet, entries = set.len(), columns = ?set.columns(), "loaded vocabulary sheet");
        Ok(set)
    }
}

/// Turn a sheet's used range into a vocabulary set; the first row is the
/// header.
///
/// # Errors
///
/// Returns `VocabError::MissingHeader` for an empty range.
fn vocab_from_range(sheet: &str, range: &Range<Data>) -> Result<VocabSet, VocabError> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or(VocabError::MissingHeader)?
        .iter()
        .map(cell_text)
        .collect::<Vec<_>>();

    Ok(VocabSet::from_rows(
        sheet,
        &header,
        rows.map(|row| row.iter().map(cell_text).collect::<Vec<_>>()),
    ))
}

/// Text of a spreadsheet cell as the user would type it.
///
/// Whole floats print without a fractional part and empty cells become "".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}
