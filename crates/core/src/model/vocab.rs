use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::model::field::{Direction, Field};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabError {
    #[error("sheet has no header row")]
    MissingHeader,

    #[error("index {index} is out of range for a set of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no column named {0:?}")]
    UnknownField(String),
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One row of a vocabulary sheet, keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VocabEntry {
    values: BTreeMap<String, String>,
}

impl VocabEntry {
    #[must_use]
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, field: &Field) -> Option<&str> {
        self.values.get(field.as_str()).map(String::as_str)
    }
}

//
// ─── SET ───────────────────────────────────────────────────────────────────────
//

/// A loaded vocabulary sheet. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabSet {
    name: String,
    columns: Vec<String>,
    entries: Vec<VocabEntry>,
}

impl VocabSet {
    /// Build a set from a header row and its data rows.
    ///
    /// Header cells are trimmed. A blank header cell at position `n` names
    /// its column `Unnamed: n`, and a repeated name gets a `.1`, `.2`, ...
    /// suffix, so stray notes beside the table still load. Short rows are
    /// padded with empty values, extra cells are dropped and rows with no
    /// content at all are skipped.
    pub fn from_rows<R, C>(name: impl Into<String>, header: &[String], rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        let columns = column_names(header);

        let mut entries = Vec::new();
        for row in rows {
            let mut cells = row.into_iter();
            let values = columns
                .iter()
                .map(|column| (column.clone(), cells.next().unwrap_or_default()))
                .collect::<BTreeMap<_, _>>();
            if values.values().all(String::is_empty) {
                continue;
            }
            entries.push(VocabEntry::new(values));
        }

        Self {
            name: name.into(),
            columns,
            entries,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_field(&self, field: &Field) -> bool {
        self.columns.iter().any(|c| c == field.as_str())
    }

    /// Value of `field` in the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::IndexOutOfRange` or `VocabError::UnknownField`.
    pub fn value(&self, index: usize, field: &Field) -> Result<&str, VocabError> {
        let entry = self.entries.get(index).ok_or(VocabError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        entry
            .get(field)
            .ok_or_else(|| VocabError::UnknownField(field.to_string()))
    }

    /// Check that both sides of `direction` are columns of this set.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::UnknownField` naming the first missing column.
    pub fn check_direction(&self, direction: &Direction) -> Result<(), VocabError> {
        for field in [&direction.question, &direction.answer] {
            if !self.has_field(field) {
                return Err(VocabError::UnknownField(field.to_string()));
            }
        }
        Ok(())
    }

    /// Check that every index addresses an entry.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::IndexOutOfRange` for the first bad index.
    pub fn check_indices(&self, indices: &[usize]) -> Result<(), VocabError> {
        let len = self.entries.len();
        match indices.iter().find(|&&index| index >= len) {
            Some(&index) => Err(VocabError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }
}

fn column_names(header: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(header.len());
    for (position, cell) in header.iter().enumerate() {
        let trimmed = cell.trim();
        let mut column = if trimmed.is_empty() {
            format!("Unnamed: {position}")
        } else {
            trimmed.to_owned()
        };
        // A suffixed name can itself collide with a later header.
        let mut seen = counts.get(&column).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(column.clone(), seen + 1);
            column = format!("{column}.{seen}");
            seen = counts.get(&column).copied().unwrap_or(0);
        }
        counts.insert(column.clone(), seen + 1);
        columns.push(column);
    }
    columns
}
