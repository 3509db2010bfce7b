//! Typed kernel errors.
//!
//! Two failure classes are kept apart by type:
//! - [`Inconsistency`] is an expected, recoverable outcome of propagation.
//!   The caller discards the board copy and treats the branch as dead.
//! - [`AssignmentDefect`] means an assignment outside the propagation path
//!   would duplicate a digit. Correct callers never trigger it.

use thiserror::Error;

/// Malformed board input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} cells, got {actual}")]
    WrongCellCount { expected: usize, actual: usize },
    #[error("cell {cell} holds {value}, expected 0..=9")]
    InvalidDigit { cell: usize, value: u8 },
}

/// A contradiction found while shrinking domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Inconsistency {
    /// Fixing `digit` at `cell` would repeat it in a shared section.
    #[error("fixing {digit} at cell {cell} repeats a digit in a shared section")]
    Contradiction { cell: usize, digit: u8 },
    /// An unfixed cell has no candidates left.
    #[error("cell {cell} has no remaining candidates")]
    EmptyDomain { cell: usize },
    /// The input board already repeats a digit within a section.
    #[error("given {digit} at cell {cell} repeats within a section")]
    DuplicateGiven { cell: usize, digit: u8 },
}

/// An assignment that should have been impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid assignment of {digit} at row {row} col {col}: digit already present in a shared section")]
pub struct AssignmentDefect {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

impl AssignmentDefect {
    #[must_use]
    pub const fn at(cell: usize, digit: u8) -> Self {
        Self {
            row: cell / 9,
            col: cell % 9,
            digit,
        }
    }
}
