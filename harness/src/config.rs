//! Solver configuration, loadable from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. Command-line flags override file values.
//!
//! ```json
//! {
//!   "input": "suinput.csv",
//!   "output": "suoutput.csv",
//!   "bench_seconds": 0.5,
//!   "report": null,
//!   "trace_search": false
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arbor_search::policy::SearchPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::worlds::sudoku::SudokuWorld;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {field}: {detail}")]
    Invalid { field: &'static str, detail: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Board to solve.
    pub input: PathBuf,
    /// Where the solved board is written.
    pub output: PathBuf,
    /// Wall-clock budget for the benchmark loop. Zero skips it.
    pub bench_seconds: f64,
    /// Optional JSON solve report.
    pub report: Option<PathBuf>,
    /// Log every expansion at debug level.
    pub trace_search: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("suinput.csv"),
            output: PathBuf::from("suoutput.csv"),
            bench_seconds: 0.5,
            report: None,
            trace_search: false,
        }
    }
}

impl SolverConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise any
    /// error from [`SolverConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields,
    /// and [`ConfigError::Invalid`] if a value fails [`SolverConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `bench_seconds` is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bench_seconds.is_finite() || self.bench_seconds < 0.0 {
            return Err(ConfigError::Invalid {
                field: "bench_seconds",
                detail: format!("{} is not a finite, non-negative number of seconds", self.bench_seconds),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn bench_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.bench_seconds).unwrap_or(Duration::ZERO)
    }

    #[must_use]
    pub fn sudoku_policy(&self) -> SearchPolicy {
        SudokuWorld::policy(self.trace_search)
    }
}
