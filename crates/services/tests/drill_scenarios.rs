use std::collections::{HashSet, VecDeque};

use drill_core::model::{AnswerRecord, Direction, Field, IndexList, VocabError, VocabSet};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    DrillEngine, DrillError, PromptError, Prompter, Quizzer, REPEATED_PASS_COUNT,
    ScriptedPrompter, SessionDriver,
};
use storage::repository::InMemoryResultLog;

fn two_entry_set() -> VocabSet {
    let row = |cells: [&str; 3]| cells.map(str::to_owned).to_vec();
    VocabSet::from_rows(
        "greek",
        &row(["term", "PINYIN", "definition"]),
        vec![row(["A", "a", "alpha"]), row(["B", "b", "beta"])],
    )
}

/// Entry `i` is `T{i}` / `p{i}` / `d{i}`, so a prompt tells which side it is.
fn numbered_set(len: usize) -> VocabSet {
    let header = ["term", "PINYIN", "definition"].map(str::to_owned).to_vec();
    let rows = (0..len)
        .map(|i| vec![format!("T{i}"), format!("p{i}"), format!("d{i}")])
        .collect::<Vec<_>>();
    VocabSet::from_rows("numbered", &header, rows)
}

/// Answers numbered-set questions, deliberately wrong on every
/// `wrong_every`-th attempt, after replaying any scripted menu replies.
struct OraclePrompter {
    menu: VecDeque<String>,
    wrong_every: Option<u32>,
    attempts: u32,
}

impl OraclePrompter {
    fn new(menu: &[&str], wrong_every: Option<u32>) -> Self {
        Self {
            menu: menu.iter().map(|s| (*s).to_owned()).collect(),
            wrong_every,
            attempts: 0,
        }
    }

    fn answer_for(question: &str) -> String {
        let (kind, number) = question.split_at(1);
        match kind {
            "T" => format!("p{number}"),
            _ => format!("T{number}"),
        }
    }
}

impl Prompter for OraclePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        if let Some(reply) = self.menu.pop_front() {
            return Ok(reply);
        }
        // Menu prompts end in ": "; questions are the bare cell text.
        if prompt.ends_with(": ") {
            return Err(PromptError::Closed);
        }
        self.attempts += 1;
        if self.wrong_every.is_some_and(|n| self.attempts % n == 0) {
            return Ok("?".to_owned());
        }
        Ok(Self::answer_for(prompt))
    }

    fn say(&mut self, _message: &str) -> Result<(), PromptError> {
        Ok(())
    }
}

/// Every run of records for one index is zero or more misses then a hit.
fn assert_retry_in_place(records: &[AnswerRecord]) {
    let mut open: Option<usize> = None;
    for record in records {
        if let Some(index) = open {
            assert_eq!(record.index, index, "moved on from {index} before a correct answer");
        }
        open = if record.correct { None } else { Some(record.index) };
    }
    assert!(open.is_none(), "stream ends on a miss");
}

#[test]
fn corrected_item_still_gets_a_second_round() {
    let set = two_entry_set();
    let log = InMemoryResultLog::new();
    let mut prompter = ScriptedPrompter::new(["x", "a", "b", "a"]);
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(0));

    let report = engine
        .drill_pass(&[0, 1], &Direction::new(Field::term(), Field::pinyin()))
        .unwrap();

    assert_eq!(
        log.records().unwrap(),
        vec![
            AnswerRecord::wrong(0),
            AnswerRecord::correct(0),
            AnswerRecord::correct(1),
            AnswerRecord::correct(0),
        ]
    );
    assert_eq!(report.rounds, vec![vec![0, 1], vec![0]]);
}

#[test]
fn exit_at_second_question_keeps_only_earlier_records() {
    let set = two_entry_set();
    let log = InMemoryResultLog::new();
    let mut prompter = ScriptedPrompter::new(["a", "exit", "b"]);
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(0));

    let err = engine
        .drill_pass(&[0, 1], &Direction::new(Field::term(), Field::pinyin()))
        .unwrap_err();

    assert!(matches!(err, DrillError::Exit));
    assert_eq!(log.records().unwrap(), vec![AnswerRecord::correct(0)]);
}

#[test]
fn mastery_with_misses_converges_on_shrinking_rounds() {
    let set = numbered_set(12);
    let log = InMemoryResultLog::new();
    let mut prompter = OraclePrompter::new(&[], Some(3));
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(11));

    let mut start = IndexList::for_len(12);
    engine.shuffle(&mut start);
    let report = engine
        .drill_pass(start.as_slice(), &Direction::new(Field::term(), Field::pinyin()))
        .unwrap();

    let records = log.records().unwrap();
    let mastered = records
        .iter()
        .filter(|r| r.correct)
        .map(|r| r.index)
        .collect::<HashSet<_>>();
    assert!(start.iter().all(|i| mastered.contains(&i)));
    assert_retry_in_place(&records);

    assert!(report.rounds.len() > 1, "a third of attempts miss");
    for pair in report.rounds.windows(2) {
        let previous = pair[0].iter().copied().collect::<HashSet<_>>();
        let next = pair[1].iter().copied().collect::<HashSet<_>>();
        assert_eq!(next.len(), pair[1].len(), "round has duplicates");
        assert!(next.is_subset(&previous));
    }
    assert_eq!(report.attempts as usize, records.len());
}

#[test]
fn repeated_pass_runs_three_passes_over_the_same_order() {
    let set = numbered_set(4);
    let log = InMemoryResultLog::new();
    let mut prompter = OraclePrompter::new(&[], Some(5));
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(5));

    let order = [3, 1, 0, 2];
    let reports = engine
        .repeated_drill(&order, &Direction::new(Field::definition(), Field::term()))
        .unwrap();

    assert_eq!(reports.len(), REPEATED_PASS_COUNT);
    for report in &reports {
        assert_eq!(report.rounds[0], order.to_vec());
        assert_eq!(report.rounds.last().map(Vec::is_empty), Some(false));
    }
    assert_retry_in_place(&log.records().unwrap());
}

#[test]
fn full_cycle_runs_fourteen_passes_in_order() {
    let set = numbered_set(5);
    let log = InMemoryResultLog::new();
    let mut prompter = OraclePrompter::new(&[], None);
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let mut engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(21));

    let mut indices = IndexList::for_len(5);
    let reports = engine.full_cycle(&mut indices).unwrap();

    let term_pinyin = Direction::new(Field::term(), Field::pinyin());
    let pinyin_term = Direction::new(Field::pinyin(), Field::term());
    let definition_term = Direction::new(Field::definition(), Field::term());
    let expected = [
        &term_pinyin,
        &term_pinyin,
        &term_pinyin,
        &pinyin_term,
        &pinyin_term,
        &term_pinyin,
        &term_pinyin,
        &term_pinyin,
        &pinyin_term,
        &pinyin_term,
        &pinyin_term,
        &definition_term,
        &definition_term,
        &definition_term,
    ];
    let directions = reports.iter().map(|r| &r.direction).collect::<Vec<_>>();
    assert_eq!(directions, expected.to_vec());

    for report in &reports {
        assert_eq!(report.rounds.len(), 1);
        let mut seen = report.rounds[0].clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
    // The first two stages share the unshuffled order.
    assert_eq!(reports[0].rounds[0], vec![0, 1, 2, 3, 4]);
    assert_eq!(reports[3].rounds[0], vec![0, 1, 2, 3, 4]);
    assert_eq!(log.records().unwrap().len(), 14 * 5);

    let mut sorted = indices.into_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
}

#[test]
fn all_selector_runs_full_cycle_then_fails_on_sentinel_column() {
    let set = numbered_set(3);
    let log = InMemoryResultLog::new();
    let mut prompter = OraclePrompter::new(&["ALL", "term"], None);
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(8));
    let mut driver = SessionDriver::new(engine, "ALL");

    let err = driver.run(&mut IndexList::for_len(3)).unwrap_err();

    assert!(matches!(err, DrillError::Vocab(VocabError::UnknownField(ref f)) if f == "ALL"));
    assert_eq!(driver.engine().answered().len(), 14 * 3);
    assert_eq!(log.records().unwrap().len(), 14 * 3);
}

#[test]
fn sentinel_on_question_side_also_triggers_full_cycle() {
    let set = numbered_set(2);
    let log = InMemoryResultLog::new();
    let mut prompter = OraclePrompter::new(&["PINYIN", "ALL"], None);
    let quizzer = Quizzer::new(&set, &mut prompter, &log, "exit");
    let engine = DrillEngine::new(quizzer, StdRng::seed_from_u64(8));
    let mut driver = SessionDriver::new(engine, "ALL");

    let err = driver.run(&mut IndexList::for_len(2)).unwrap_err();

    assert!(matches!(err, DrillError::Vocab(VocabError::UnknownField(ref f)) if f == "ALL"));
    assert_eq!(log.records().unwrap().len(), 14 * 2);
}
