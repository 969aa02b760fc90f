use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use drill_core::model::IndexList;
use services::session::summary_lines;
use services::{
    DrillConfig, DrillEngine, DrillError, Prompter, Quizzer, SessionDriver, TerminalPrompter,
};
use storage::file::{CsvResultLog, WorkbookSource};
use storage::repository::VocabSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Entries listed under "hardest" in the closing summary.
const HARDEST_SHOWN: usize = 5;

/// Drill a vocabulary sheet until every entry is answered right.
///
/// With no flags, reads `dictionary.xlsx`, asks for the sheet name and logs
/// every answer to `data.csv` in the working directory.
#[derive(Debug, Parser)]
#[command(name = "vocab-drill", version)]
struct Args {
    /// Workbook with one sheet per vocabulary set.
    #[arg(long, default_value = "dictionary.xlsx")]
    dictionary: PathBuf,

    /// Result log, truncated at startup.
    #[arg(long, default_value = "data.csv")]
    log: PathBuf,

    /// Sheet to drill; asked interactively when omitted.
    #[arg(long)]
    sheet: Option<String>,

    /// Seed for repeatable shuffles.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug-level diagnostics on stderr (RUST_LOG wins when set).
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> DrillConfig {
        DrillConfig::default()
            .with_dictionary_path(&self.dictionary)
            .with_log_path(&self.log)
            .with_sheet(self.sheet.clone())
            .with_seed(self.seed)
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn welcome(prompter: &mut dyn Prompter) -> Result<(), DrillError> {
    prompter.say("----------------------------------------")?;
    prompter.say("------------ vocabulary drill ----------")?;
    prompter.say("----------------------------------------")?;
    Ok(())
}

fn choose_sheet(
    prompter: &mut dyn Prompter,
    source: &dyn VocabSource,
    config: &DrillConfig,
) -> Result<String, DrillError> {
    if let Some(sheet) = &config.sheet {
        return Ok(sheet.clone());
    }
    let names = source.sheet_names()?;
    prompter.say(&format!("sheets: {}", names.join(", ")))?;
    let sheet = prompter.read_line("sheet name: ")?;
    if sheet == config.exit_token {
        return Err(DrillError::Exit);
    }
    Ok(sheet)
}

fn run(
    config: &DrillConfig,
    prompter: &mut dyn Prompter,
    source: &dyn VocabSource,
) -> Result<(), DrillError> {
    welcome(prompter)?;

    let sheet = choose_sheet(prompter, source, config)?;
    let vocab = source.load_sheet(&sheet)?;
    if vocab.is_empty() {
        warn!(sheet = %sheet, "sheet has no entries");
    }
    // Only truncate the previous log once the sheet is known to load.
    let log = CsvResultLog::create(&config.log_path)?;
    info!(
        sheet = %sheet,
        entries = vocab.len(),
        log = %log.path().display(),
        "session starting"
    );

    let mut indices = IndexList::for_len(vocab.len());
    let summary = {
        let quizzer = Quizzer::new(&vocab, &mut *prompter, &log, config.exit_token.as_str());
        let mut engine = DrillEngine::new(quizzer, config.rng());
        engine.shuffle(&mut indices);

        let mut driver = SessionDriver::new(engine, config.all_token.as_str());
        driver.run(&mut indices)?
    };

    for line in summary_lines(&summary, &vocab, HARDEST_SHOWN) {
        prompter.say(&line)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.config();
    let mut prompter = TerminalPrompter::stdio();
    let source = WorkbookSource::new(&config.dictionary_path);

    match run(&config, &mut prompter, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DrillError::Exit) => {
            println!("-----e-x-i-t-i-n-g-----");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
