use drill_core::model::{AnswerRecord, Direction, VocabSet};
use storage::repository::ResultLog;
use tracing::debug;

use crate::error::DrillError;
use crate::prompt::Prompter;

/// How a single question went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub index: usize,
    /// Attempts until the right answer, at least 1.
    pub attempts: u32,
}

impl QuizOutcome {
    #[must_use]
    pub fn first_try(&self) -> bool {
        self.attempts == 1
    }
}

/// Asks one entry at a time and keeps asking until it is answered right.
///
/// Every attempt is appended to the result log before the user is told how
/// it went.
pub struct Quizzer<'a> {
    vocab: &'a VocabSet,
    prompter: &'a mut dyn Prompter,
    log: &'a dyn ResultLog,
    exit_token: String,
    answered: Vec<AnswerRecord>,
}

impl<'a> Quizzer<'a> {
    pub fn new(
        vocab: &'a VocabSet,
        prompter: &'a mut dyn Prompter,
        log: &'a dyn ResultLog,
        exit_token: impl Into<String>,
    ) -> Self {
        Self {
            vocab,
            prompter,
            log,
            exit_token: exit_token.into(),
            answered: Vec::new(),
        }
    }

    #[must_use]
    pub fn vocab(&self) -> &'a VocabSet {
        self.vocab
    }

    pub fn prompter(&mut self) -> &mut dyn Prompter {
        &mut *self.prompter
    }

    #[must_use]
    pub fn exit_token(&self) -> &str {
        &self.exit_token
    }

    /// Every record produced so far, in answer order.
    #[must_use]
    pub fn answered(&self) -> &[AnswerRecord] {
        &self.answered
    }

    /// Ask entry `index` in `direction` until the exact answer is typed.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::Exit` when the exit token is typed (nothing is
    /// logged for it), `DrillError::Vocab` for a bad index or field, and
    /// storage or prompt errors as they occur.
    pub fn ask(&mut self, index: usize, direction: &Direction) -> Result<QuizOutcome, DrillError> {
        let vocab = self.vocab;
        let question = vocab.value(index, &direction.question)?;
        let expected = vocab.value(index, &direction.answer)?;

        let mut attempts = 0_u32;
        loop {
            let reply = self.prompter.read_line(question)?;
            if reply == self.exit_token {
                return Err(DrillError::Exit);
            }
            attempts = attempts.saturating_add(1);

            let correct = reply == expected;
            self.record(AnswerRecord::new(index, correct))?;

            if correct {
                self.prompter.say("Correct!")?;
                debug!(index, attempts, %direction, "answered");
                return Ok(QuizOutcome { index, attempts });
            }
            self.prompter.say(&format!("Nah boi! {expected}"))?;
        }
    }

    fn record(&mut self, record: AnswerRecord) -> Result<(), DrillError> {
        self.log.append(record)?;
        self.answered.push(record);
        Ok(())
    }
}
