//! Solve pipeline: validate the givens, propagate, then search.
//!
//! # Pipeline
//!
//! ```text
//! Board::from_cells() → SudokuWorld::new() (check_givens, propagate)
//!   → search(SudokuWorld, policy) → SolveOutcome
//! ```
//!
//! The caller's cell array is never modified. A solved board comes back as a
//! fresh array inside [`SolveOutcome::Solved`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use arbor_kernel::board::Board;
use arbor_kernel::error::{BoardError, Inconsistency};
use arbor_kernel::hash::ContentHash;
use arbor_kernel::sections::CELL_COUNT;
use arbor_search::error::SearchError;
use arbor_search::policy::SearchPolicy;
use arbor_search::search::{search, SearchOutcome, SearchStats};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::board_file::BoardFileError;
use crate::config::ConfigError;
use crate::worlds::sudoku::SudokuWorld;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    BoardFile(#[from] BoardFileError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot write report {path}: {detail}")]
    Report { path: PathBuf, detail: String },
}

/// A completed board and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedBoard {
    pub cells: [u8; CELL_COUNT],
    /// Guesses on the path to the solution.
    pub depth: u32,
    pub stats: SearchStats,
}

impl SolvedBoard {
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        arbor_kernel::hash::canonical_hash(arbor_kernel::hash::DOMAIN_SUDOKU_BOARD, &self.cells)
    }
}

/// Why a board has no solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Unsolvable {
    /// The givens, or propagation from them, are contradictory.
    Contradiction(Inconsistency),
    /// Search tried every guess.
    Exhausted(SearchStats),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Solved(SolvedBoard),
    Unsolvable(Unsolvable),
}

impl SolveOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    #[must_use]
    pub fn solved(&self) -> Option<&SolvedBoard> {
        match self {
            Self::Solved(solved) => Some(solved),
            Self::Unsolvable(_) => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> SolveReport {
        match self {
            Self::Solved(solved) => SolveReport {
                solved: true,
                depth: Some(solved.depth),
                expansions: solved.stats.expansions,
                rounds: solved.stats.rounds,
                nodes_created: solved.stats.nodes_created,
                peak_live_nodes: solved.stats.peak_live_nodes,
                board_digest: Some(solved.digest().to_string()),
                reason: None,
            },
            Self::Unsolvable(Unsolvable::Contradiction(reason)) => SolveReport {
                reason: Some(reason.to_string()),
                ..SolveReport::default()
            },
            Self::Unsolvable(Unsolvable::Exhausted(stats)) => SolveReport {
                expansions: stats.expansions,
                rounds: stats.rounds,
                nodes_created: stats.nodes_created,
                peak_live_nodes: stats.peak_live_nodes,
                reason: Some("search exhausted".to_string()),
                ..SolveReport::default()
            },
        }
    }
}

/// JSON summary of one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub solved: bool,
    pub depth: Option<u32>,
    pub expansions: u64,
    pub rounds: u32,
    pub nodes_created: u64,
    pub peak_live_nodes: usize,
    pub board_digest: Option<String>,
    pub reason: Option<String>,
}

impl SolveReport {
    /// # Errors
    ///
    /// Returns [`RunError::Report`] if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<(), RunError> {
        let report_err = |detail: String| RunError::Report {
            path: path.to_path_buf(),
            detail,
        };
        let mut json = serde_json::to_string_pretty(self).map_err(|e| report_err(e.to_string()))?;
        json.push('\n');
        fs::write(path, json).map_err(|e| report_err(e.to_string()))
    }
}

/// Solve `cells` (81 digits, `0` for blank) under `policy`.
///
/// An unsolvable board is `Ok(SolveOutcome::Unsolvable(..))`, not an error.
///
/// # Errors
///
/// - [`RunError::Board`] for a digit above 9.
/// - [`RunError::Search`] for an invalid policy or a search defect.
pub fn solve(cells: &[u8; CELL_COUNT], policy: &SearchPolicy) -> Result<SolveOutcome, RunError> {
    let board = Board::from_cells(cells)?;
    let world = match SudokuWorld::new(board) {
        Ok(world) => world,
        Err(reason) => {
            warn!(%reason, "input board is unsolvable");
            return Ok(SolveOutcome::Unsolvable(Unsolvable::Contradiction(reason)));
        }
    };
    match search(&world, policy) {
        Ok(SearchOutcome::Found(solution)) => {
            let depth = solution.depth();
            let stats = solution.stats().clone();
            let cells = *solution.into_goal_state().cells();
            Ok(SolveOutcome::Solved(SolvedBoard { cells, depth, stats }))
        }
        Ok(SearchOutcome::Exhausted(stats)) => {
            warn!(expansions = stats.expansions, "no solution found");
            Ok(SolveOutcome::Unsolvable(Unsolvable::Exhausted(stats)))
        }
        Err(err) => {
            if err.is_defect() {
                error!(%err, "search defect");
            }
            Err(err.into())
        }
    }
}

/// Result of the timing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchSummary {
    pub iterations: u32,
    pub total: Duration,
    pub mean: Duration,
}

impl BenchSummary {
    #[must_use]
    pub fn mean_seconds(&self) -> f64 {
        self.mean.as_secs_f64()
    }
}

/// Solve fresh copies of `cells` until `budget` of solving time has elapsed.
/// At least one solve always runs.
///
/// # Errors
///
/// Propagates the first error from [`solve`].
pub fn benchmark(
    cells: &[u8; CELL_COUNT],
    policy: &SearchPolicy,
    budget: Duration,
) -> Result<BenchSummary, RunError> {
    let mut iterations = 0u32;
    let mut total = Duration::ZERO;
    loop {
        let started = Instant::now();
        solve(cells, policy)?;
        total += started.elapsed();
        iterations = iterations.saturating_add(1);
        if total >= budget || iterations == u32::MAX {
            break;
        }
    }
    let mean = total / iterations;
    info!(iterations, mean_seconds = mean.as_secs_f64(), "benchmark finished");
    Ok(BenchSummary {
        iterations,
        total,
        mean,
    })
}
