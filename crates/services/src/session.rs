use chrono::{DateTime, Utc};
use drill_core::model::{
    AnswerRecord, Direction, Field, FieldSelection, IndexList, SessionSummary,
    SessionSummaryError, VocabSet,
};
use tracing::{info, warn};

use crate::drill::DrillEngine;
use crate::error::DrillError;
use crate::Clock;

/// Menu-driven session over one loaded vocabulary set.
pub struct SessionDriver<'a> {
    engine: DrillEngine<'a>,
    all_token: String,
    clock: Clock,
}

impl<'a> SessionDriver<'a> {
    #[must_use]
    pub fn new(engine: DrillEngine<'a>, all_token: impl Into<String>) -> Self {
        Self {
            engine,
            all_token: all_token.into(),
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &DrillEngine<'a> {
        &self.engine
    }

    /// Show the menu, read the answer and question selectors, and drill.
    ///
    /// If either selector is the all-sentinel the full cycle runs first. A
    /// repeated pass with the two selectors as typed always follows, so a
    /// sentinel ends up used as a column name there and fails with
    /// `VocabError::UnknownField` once the full cycle is done.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::Exit` if the user quits, `DrillError::Vocab` for
    /// selectors that are not columns, and I/O errors as they occur.
    pub fn run(&mut self, indices: &mut IndexList) -> Result<SessionSummary, DrillError> {
        let started_at = self.clock.now();

        self.show_menu()?;
        let ask_for = self.read_selector("test for: ")?;
        let given = self.read_selector("given: ")?;

        let answer = FieldSelection::parse(&ask_for, &self.all_token);
        let question = FieldSelection::parse(&given, &self.all_token);

        if answer.is_all() || question.is_all() {
            info!(entries = indices.len(), "running full cycle");
            self.engine.full_cycle(indices)?;
            warn!(
                question = %question.as_field(),
                answer = %answer.as_field(),
                "running trailing repeated pass with the selectors as typed"
            );
        }

        let direction = Direction::new(question.as_field(), answer.as_field());
        info!(%direction, entries = indices.len(), "running repeated pass");
        self.engine.repeated_drill(indices.as_slice(), &direction)?;

        Ok(summarize(started_at, self.clock.now(), self.engine.answered())?)
    }

    fn show_menu(&mut self) -> Result<(), DrillError> {
        let lines = [
            "-----menu-----".to_owned(),
            "Select between:".to_owned(),
            format!("*- {}", Field::TERM),
            format!("*- {}", Field::PINYIN),
            format!("*- {}", Field::DEFINITION),
            format!("or type {} for the full cycle", self.all_token),
        ];
        let prompter = self.engine.prompter();
        for line in &lines {
            prompter.say(line)?;
        }
        Ok(())
    }

    fn read_selector(&mut self, prompt: &str) -> Result<String, DrillError> {
        let reply = self.engine.prompter().read_line(prompt)?;
        if reply == self.engine.exit_token() {
            return Err(DrillError::Exit);
        }
        Ok(reply)
    }
}

/// A wall clock that stepped backwards mid-session reads as a zero-length
/// session rather than failing a finished drill.
fn summarize(
    started_at: DateTime<Utc>,
    now: DateTime<Utc>,
    records: &[AnswerRecord],
) -> Result<SessionSummary, SessionSummaryError> {
    SessionSummary::from_records(started_at, now.max(started_at), records)
}

/// Lines describing a finished session, hardest entries named by their
/// first column.
#[must_use]
pub fn summary_lines(summary: &SessionSummary, vocab: &VocabSet, hardest: usize) -> Vec<String> {
    let mut lines = vec![
        format!("Finished testing {}", vocab.name()),
        format!("Correct answers: {}", summary.correct()),
        format!("Incorrect answers: {}", summary.incorrect()),
        format!("Accuracy: {}%", summary.accuracy_percent()),
        format!("Time: {}", format_duration(summary.duration())),
    ];

    let label_field = vocab.columns().first().map(|c| Field::new(c.as_str()));
    for miss in summary.hardest(hardest) {
        let label = label_field
            .as_ref()
            .and_then(|field| vocab.value(miss.index, field).ok())
            .map_or_else(|| format!("#{}", miss.index), str::to_owned);
        let noun = if miss.misses == 1 { "miss" } else { "misses" };
        lines.push(format!("  {label}: {} {noun}", miss.misses));
    }
    lines
}

fn format_duration(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}m {:02}s", secs / 60, secs % 60)
}
