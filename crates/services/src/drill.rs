//! Retry and mastery loops over a vocabulary set.
//!
//! A drill pass asks a list of entries in order. Entries missed on the first
//! attempt are shuffled and asked again in a new round, until a round goes
//! by without a first-attempt miss. A repeated pass does that three times,
//! and the full cycle chains passes over several question/answer directions.

use drill_core::model::{AnswerRecord, Direction, Field, IndexList};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::DrillError;
use crate::prompt::Prompter;
use crate::quizzer::Quizzer;

/// Drill passes run by one repeated pass.
pub const REPEATED_PASS_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Single,
    Repeated,
}

/// One step of the full cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStage {
    pub shuffle_first: bool,
    pub kind: PassKind,
    pub question: &'static str,
    pub answer: &'static str,
}

impl CycleStage {
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::new(self.question, self.answer)
    }
}

/// Recognition and recall in both directions, reshuffling between stages.
pub const FULL_CYCLE: [CycleStage; 6] = [
    CycleStage {
        shuffle_first: false,
        kind: PassKind::Repeated,
        question: Field::TERM,
        answer: Field::PINYIN,
    },
    CycleStage {
        shuffle_first: false,
        kind: PassKind::Single,
        question: Field::PINYIN,
        answer: Field::TERM,
    },
    CycleStage {
        shuffle_first: true,
        kind: PassKind::Single,
        question: Field::PINYIN,
        answer: Field::TERM,
    },
    CycleStage {
        shuffle_first: true,
        kind: PassKind::Repeated,
        question: Field::TERM,
        answer: Field::PINYIN,
    },
    CycleStage {
        shuffle_first: true,
        kind: PassKind::Repeated,
        question: Field::PINYIN,
        answer: Field::TERM,
    },
    CycleStage {
        shuffle_first: true,
        kind: PassKind::Repeated,
        question: Field::DEFINITION,
        answer: Field::TERM,
    },
];

/// What one drill pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillReport {
    pub direction: Direction,
    /// Index order of every round; the first is the order passed in.
    pub rounds: Vec<Vec<usize>>,
    /// Answers given across all rounds, wrong ones included.
    pub attempts: u32,
}

impl DrillReport {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            rounds: Vec::new(),
            attempts: 0,
        }
    }

    /// Indices missed on the first try in the opening round.
    #[must_use]
    pub fn first_round_misses(&self) -> &[usize] {
        self.rounds.get(1).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Runs drill passes against one vocabulary set.
pub struct DrillEngine<'a> {
    quizzer: Quizzer<'a>,
    rng: StdRng,
}

impl<'a> DrillEngine<'a> {
    #[must_use]
    pub fn new(quizzer: Quizzer<'a>, rng: StdRng) -> Self {
        Self { quizzer, rng }
    }

    pub fn prompter(&mut self) -> &mut dyn Prompter {
        self.quizzer.prompter()
    }

    #[must_use]
    pub fn exit_token(&self) -> &str {
        self.quizzer.exit_token()
    }

    #[must_use]
    pub fn answered(&self) -> &[AnswerRecord] {
        self.quizzer.answered()
    }

    /// Uniformly permute `indices` in place.
    pub fn shuffle(&mut self, indices: &mut IndexList) {
        indices.as_mut_slice().shuffle(&mut self.rng);
    }

    /// Ask every index once, then keep re-asking the first-attempt misses in
    /// a fresh random order until a round has none.
    ///
    /// An entry that was missed and then corrected within a round still goes
    /// into the next round.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::Vocab` before asking anything if `direction` names
    /// a missing column or an index is out of range; otherwise propagates
    /// `DrillError::Exit` and I/O errors from the quizzer.
    pub fn drill_pass(
        &mut self,
        indices: &[usize],
        direction: &Direction,
    ) -> Result<DrillReport, DrillError> {
        let vocab = self.quizzer.vocab();
        vocab.check_direction(direction)?;
        vocab.check_indices(indices)?;

        let mut report = DrillReport::new(direction.clone());
        let mut round = indices.to_vec();

        while !round.is_empty() {
            debug!(round = report.rounds.len(), size = round.len(), %direction, "drill round");
            let mut missed = Vec::new();
            for &index in &round {
                let outcome = self.quizzer.ask(index, direction)?;
                report.attempts = report.attempts.saturating_add(outcome.attempts);
                if !outcome.first_try() {
                    missed.push(index);
                }
            }
            report.rounds.push(round);
            missed.shuffle(&mut self.rng);
            round = missed;
        }

        Ok(report)
    }

    /// Run [`Self::drill_pass`] three times over the same ordering.
    ///
    /// # Errors
    ///
    /// Stops at the first failing pass and returns its error.
    pub fn repeated_drill(
        &mut self,
        indices: &[usize],
        direction: &Direction,
    ) -> Result<Vec<DrillReport>, DrillError> {
        (0..REPEATED_PASS_COUNT)
            .map(|_| self.drill_pass(indices, direction))
            .collect()
    }

    /// Run every stage of [`FULL_CYCLE`], shuffling `indices` in place where a
    /// stage asks for it.
    ///
    /// Reports come back in the order the passes ran.
    ///
    /// # Errors
    ///
    /// Stops at the first failing pass and returns its error.
    pub fn full_cycle(&mut self, indices: &mut IndexList) -> Result<Vec<DrillReport>, DrillError> {
        let mut reports = Vec::new();
        for (step, stage) in FULL_CYCLE.iter().enumerate() {
            if stage.shuffle_first {
                self.shuffle(indices);
            }
            let direction = stage.direction();
            info!(step = step + 1, kind = ?stage.kind, %direction, "full cycle stage");
            match stage.kind {
                PassKind::Single => reports.push(self.drill_pass(indices.as_slice(), &direction)?),
                PassKind::Repeated => {
                    reports.extend(self.repeated_drill(indices.as_slice(), &direction)?);
                }
            }
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use drill_core::model::VocabSet;
    use rand::SeedableRng;
    use storage::repository::InMemoryResultLog;

    fn vocab(len: usize) -> VocabSet {
        let header = ["term", "PINYIN", "definition"].map(str::to_owned).to_vec();
        let rows = (0..len)
            .map(|i| vec![format!("T{i}"), format!("p{i}"), format!("d{i}")])
            .collect::<Vec<_>>();
        VocabSet::from_rows("s", &header, rows)
    }

    #[test]
    fn first_try_pass_has_one_round() {
        let set = vocab(3);
        let log = InMemoryResultLog::new();
        let mut prompter = ScriptedPrompter::new(["p2", "p0", "p1"]);
        let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
        let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(1));

        let report = engine
            .drill_pass(&[2, 0, 1], &Direction::new(Field::term(), Field::pinyin()))
            .unwrap();

        assert_eq!(report.rounds, vec![vec![2, 0, 1]]);
        assert_eq!(report.attempts, 3);
        assert!(report.first_round_misses().is_empty());
    }

    #[test]
    fn corrected_miss_is_asked_again_next_round() {
        let set = vocab(2);
        let log = InMemoryResultLog::new();
        let mut prompter = ScriptedPrompter::new(["wrong", "p0", "p1", "p0"]);
        let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
        let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(1));

        let report = engine
            .drill_pass(&[0, 1], &Direction::new(Field::term(), Field::pinyin()))
            .unwrap();

        assert_eq!(report.rounds, vec![vec![0, 1], vec![0]]);
        assert_eq!(report.first_round_misses(), &[0]);
        assert_eq!(report.attempts, 4);
    }

    #[test]
    fn empty_pass_asks_nothing() {
        let set = vocab(2);
        let log = InMemoryResultLog::new();
        let mut prompter = ScriptedPrompter::default();
        let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
        let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(1));

        let report = engine
            .drill_pass(&[], &Direction::new(Field::term(), Field::pinyin()))
            .unwrap();

        assert!(report.rounds.is_empty());
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn bad_index_is_rejected_up_front() {
        let set = vocab(2);
        let log = InMemoryResultLog::new();
        let mut prompter = ScriptedPrompter::new(["p0"]);
        let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
        let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(1));

        let err = engine
            .drill_pass(&[0, 5], &Direction::new(Field::term(), Field::pinyin()))
            .unwrap_err();

        assert!(matches!(err, DrillError::Vocab(_)));
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let set = vocab(1);
        let log = InMemoryResultLog::new();
        let mut prompter = ScriptedPrompter::default();
        let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
        let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(99));

        let mut indices = IndexList::for_len(50);
        for _ in 0..5 {
            engine.shuffle(&mut indices);
            let mut sorted = indices.clone().into_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        }
    }

    #[test]
    fn full_cycle_choreography() {
        let kinds = FULL_CYCLE.map(|s| s.kind);
        assert_eq!(
            kinds,
            [
                PassKind::Repeated,
                PassKind::Single,
                PassKind::Single,
                PassKind::Repeated,
                PassKind::Repeated,
                PassKind::Repeated,
            ]
        );
        let shuffles = FULL_CYCLE.map(|s| s.shuffle_first);
        assert_eq!(shuffles, [false, false, true, true, true, true]);
        assert_eq!(
            FULL_CYCLE[5].direction(),
            Direction::new(Field::definition(), Field::term())
        );
    }
}
