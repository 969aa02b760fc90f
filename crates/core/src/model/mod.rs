mod answer;
mod field;
mod index_list;
mod session;
mod vocab;

pub use answer::AnswerRecord;
pub use field::{Direction, Field, FieldSelection};
pub use index_list::IndexList;
pub use session::{MissCount, SessionSummary, SessionSummaryError};
pub use vocab::{VocabEntry, VocabError, VocabSet};
