#![forbid(unsafe_code)]

pub mod config;
pub mod drill;
pub mod error;
pub mod prompt;
pub mod quizzer;
pub mod session;

pub use drill_core::Clock;

pub use config::DrillConfig;
pub use drill::{CycleStage, DrillEngine, DrillReport, FULL_CYCLE, PassKind, REPEATED_PASS_COUNT};
pub use error::{DrillError, PromptError};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use quizzer::{QuizOutcome, Quizzer};
pub use session::SessionDriver;
