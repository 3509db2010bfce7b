//! Sudoku as a search problem: guess a digit for one under-constrained cell,
//! propagate, and keep the board if propagation succeeds.
//!
//! States are boards whose domains shrink strictly from parent to child, so
//! two frontier nodes never coincide and the search runs with cycles allowed.

use std::fmt;

use arbor_kernel::board::Board;
use arbor_kernel::domain::Worklist;
use arbor_kernel::error::Inconsistency;
use arbor_kernel::propagate::Propagator;
use arbor_kernel::sections::{Sections, CELL_COUNT};
use arbor_search::contract::{NextSuccessor, SearchProblem, Successor};
use arbor_search::error::SearchError;
use arbor_search::frontier::FrontierKind;
use arbor_search::policy::SearchPolicy;
use tracing::{error, trace};

/// Fix `digit` at `cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub cell: usize,
    pub digit: u8,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}={}", self.cell / 9 + 1, self.cell % 9 + 1, self.digit)
    }
}

/// Successor cursor for one board.
///
/// `working` is a private copy of the parent board. Every digit tried at a
/// decision cell is struck from it, so later calls move on to the next
/// candidate and no guess is repeated.
#[derive(Debug, Clone)]
pub struct SudokuExpansion {
    working: Board,
    exhausted: bool,
}

impl SudokuExpansion {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// A Sudoku instance with its section table.
#[derive(Debug, Clone)]
pub struct SudokuWorld {
    sections: Sections,
    initial: Board,
}

impl SudokuWorld {
    /// Check the givens of `board` and propagate from them. The propagated
    /// board becomes the root state.
    ///
    /// # Errors
    ///
    /// Returns the [`Inconsistency`] if a given repeats within a section or
    /// propagation from the givens hits a contradiction.
    pub fn new(board: Board) -> Result<Self, Inconsistency> {
        Self::with_sections(Sections::new(), board)
    }

    /// [`SudokuWorld::new`] with a caller-supplied section table.
    ///
    /// # Errors
    ///
    /// Same as [`SudokuWorld::new`].
    pub fn with_sections(sections: Sections, mut board: Board) -> Result<Self, Inconsistency> {
        board.check_givens(&sections)?;
        let givens = board.fixed_worklist();
        Propagator::new(&sections).propagate(&mut board, givens)?;
        Ok(Self {
            sections,
            initial: board,
        })
    }

    /// The propagated root board.
    #[must_use]
    pub fn initial(&self) -> &Board {
        &self.initial
    }

    #[must_use]
    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Depth-first, cycles allowed, no iterative deepening.
    #[must_use]
    pub fn policy(trace_search: bool) -> SearchPolicy {
        SearchPolicy::new(FrontierKind::Lifo)
            .allow_cycles()
            .with_debug(trace_search)
    }
}

/// Cell to branch on next.
///
/// An unfixed cell left with a single untried candidate comes first, then the
/// first cell with two candidates, then the cell with the fewest. Ties go to
/// the lowest index. `None` means every cell is fixed.
#[must_use]
pub fn decision_cell(board: &Board) -> Option<usize> {
    let mut pair = None;
    let mut fewest: Option<(usize, u32)> = None;
    for cell in 0..CELL_COUNT {
        if board.is_fixed(cell) {
            continue;
        }
        match board.domain(cell).len() {
            0 => {}
            1 => return Some(cell),
            2 => {
                if pair.is_none() {
                    pair = Some(cell);
                }
            }
            n => {
                if fewest.is_none_or(|(_, best)| n < best) {
                    fewest = Some((cell, n));
                }
            }
        }
    }
    pair.or(fewest.map(|(cell, _)| cell))
}

impl SearchProblem for SudokuWorld {
    type State = Board;
    type Action = Decision;
    type Expansion = SudokuExpansion;

    fn initial_state(&self) -> Board {
        self.initial.clone()
    }

    fn is_goal(&self, state: &Board) -> bool {
        state.is_solved()
    }

    fn expand(&self, state: &Board) -> SudokuExpansion {
        SudokuExpansion {
            working: state.clone(),
            exhausted: !state.is_solveable(),
        }
    }

    fn next_successor(
        &self,
        expansion: &mut SudokuExpansion,
    ) -> NextSuccessor<Board, Decision> {
        if expansion.exhausted {
            return Ok(None);
        }
        let propagator = Propagator::new(&self.sections);
        while expansion.working.is_solveable() {
            let Some(cell) = decision_cell(&expansion.working) else {
                break;
            };
            let Some(digit) = expansion.working.domain(cell).lowest() else {
                break;
            };
            let decision = Decision { cell, digit };

            let mut child = expansion.working.clone();
            expansion.working.remove_candidate(cell, digit);
            child.assign(cell, digit, &self.sections).map_err(|defect| {
                error!(%decision, %defect, "guess collides with a fixed digit");
                SearchError::InvariantViolation {
                    detail: defect.to_string(),
                }
            })?;

            match propagator.propagate(&mut child, Worklist::single(cell)) {
                Ok(()) => {
                    return Ok(Some(Successor {
                        state: child,
                        action: decision,
                    }))
                }
                Err(reason) => {
                    trace!(%decision, %reason, "guess pruned");
                }
            }
        }
        expansion.exhausted = true;
        Ok(None)
    }

    fn fingerprint(&self, state: &Board) -> Option<u64> {
        Some(state.fingerprint())
    }
}
