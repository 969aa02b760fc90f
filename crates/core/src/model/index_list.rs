use serde::{Deserialize, Serialize};

/// Ordered positions into a `VocabSet` still to be drilled.
///
/// Order matters: a pass asks items front to back. Shuffling happens in
/// place through [`IndexList::as_mut_slice`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexList(Vec<usize>);

impl IndexList {
    /// Every position of a set with `len` entries, in ascending order.
    #[must_use]
    pub fn for_len(len: usize) -> Self {
        Self((0..len).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for IndexList {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}
