use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Runtime settings for a drill session.
///
/// `Default` matches a bare invocation: `dictionary.xlsx` and `data.csv` in
/// the working directory, sheet chosen interactively, OS-seeded shuffles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillConfig {
    pub dictionary_path: PathBuf,
    pub log_path: PathBuf,
    pub sheet: Option<String>,
    pub exit_token: String,
    pub all_token: String,
    pub seed: Option<u64>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("dictionary.xlsx"),
            log_path: PathBuf::from("data.csv"),
            sheet: None,
            exit_token: "exit".to_owned(),
            all_token: "ALL".to_owned(),
            seed: None,
        }
    }
}

impl DrillConfig {
    #[must_use]
    pub fn with_dictionary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_path = path.into();
        self
    }

    #[must_use]
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Shuffle source for the session: seeded when a seed is set.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
