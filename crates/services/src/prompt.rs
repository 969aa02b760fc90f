use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::PromptError;

/// Line-oriented text channel between the drill and the user.
pub trait Prompter {
    /// Show `prompt` and read one line of input.
    ///
    /// The returned line has its terminator removed and is otherwise
    /// untouched: no trimming, no case folding.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Closed` at end of input, or `PromptError::Io`.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Show a full line of feedback.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Io` if the output cannot be written.
    fn say(&mut self, message: &str) -> Result<(), PromptError>;
}

/// Prompter over any buffered reader and writer, stdin/stdout in the binary.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

/// Prompter that replays canned answers and records everything shown.
///
/// Runs out with `PromptError::Closed`, like a terminal at end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Prompts and messages in the order they were shown.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.transcript.push(prompt.to_owned());
        self.answers.pop_front().ok_or(PromptError::Closed)
    }

    fn say(&mut self, message: &str) -> Result<(), PromptError> {
        self.transcript.push(message.to_owned());
        Ok(())
    }
}
