#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use repository::{ResultLog, StorageError, VocabSource};
