//! The Sudoku board: 81 cells plus a parallel table of candidate domains.
//!
//! A cell holds 0 (unknown) or a fixed digit 1..=9. A fixed cell's domain is
//! always the singleton of its digit. Domains only shrink for a given board.

use std::fmt;

use crate::domain::{DomainMask, Worklist};
use crate::error::{AssignmentDefect, BoardError, Inconsistency};
use crate::hash::{canonical_hash, fingerprint64, ContentHash, DOMAIN_SUDOKU_BOARD, DOMAIN_SUDOKU_STATE};
use crate::sections::{Sections, CELL_COUNT};

/// A partially or fully solved board with per-cell candidate domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELL_COUNT],
    domains: [DomainMask; CELL_COUNT],
}

impl Board {
    /// Build a board from 81 digits. Givens get singleton domains; blanks get all nine.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongCellCount`] unless exactly 81 values are given,
    /// and [`BoardError::InvalidDigit`] for any value above 9.
    pub fn from_cells(values: &[u8]) -> Result<Self, BoardError> {
        if values.len() != CELL_COUNT {
            return Err(BoardError::WrongCellCount {
                expected: CELL_COUNT,
                actual: values.len(),
            });
        }
        let mut cells = [0u8; CELL_COUNT];
        let mut domains = [DomainMask::ALL; CELL_COUNT];
        for (cell, &value) in values.iter().enumerate() {
            if value > 9 {
                return Err(BoardError::InvalidDigit { cell, value });
            }
            cells[cell] = value;
            if value != 0 {
                domains[cell] = DomainMask::singleton(value);
            }
        }
        Ok(Self { cells, domains })
    }

    #[must_use]
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    #[must_use]
    pub fn domains(&self) -> &[DomainMask; CELL_COUNT] {
        &self.domains
    }

    #[must_use]
    pub fn cell(&self, cell: usize) -> u8 {
        self.cells[cell]
    }

    #[must_use]
    pub fn domain(&self, cell: usize) -> DomainMask {
        self.domains[cell]
    }

    #[must_use]
    pub fn is_fixed(&self, cell: usize) -> bool {
        self.cells[cell] != 0
    }

    /// Number of fixed cells.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// No cell is unknown.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// First unfixed cell whose domain is empty, if any.
    #[must_use]
    pub fn first_empty_domain(&self) -> Option<usize> {
        (0..CELL_COUNT).find(|&cell| self.cells[cell] == 0 && self.domains[cell].is_empty())
    }

    /// No unfixed cell has run out of candidates.
    #[must_use]
    pub fn is_solveable(&self) -> bool {
        self.first_empty_domain().is_none()
    }

    /// Worklist holding every fixed cell.
    #[must_use]
    pub fn fixed_worklist(&self) -> Worklist {
        (0..CELL_COUNT).filter(|&cell| self.is_fixed(cell)).collect()
    }

    /// Whether placing `digit` at `cell` would repeat it among the cell's row, column, or box.
    #[must_use]
    pub fn conflicts_with(&self, cell: usize, digit: u8, sections: &Sections) -> bool {
        sections
            .peers(cell)
            .iter()
            .any(|&peer| peer != cell && self.cells[peer] == digit)
    }

    /// Fix `cell` to `digit` after checking it does not repeat in a shared section.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDefect`] if a peer already holds `digit`; the board is unchanged.
    pub fn assign(&mut self, cell: usize, digit: u8, sections: &Sections) -> Result<(), AssignmentDefect> {
        if self.conflicts_with(cell, digit, sections) {
            return Err(AssignmentDefect::at(cell, digit));
        }
        self.fix(cell, digit);
        Ok(())
    }

    /// Drop `digit` from an unfixed cell's candidates. Returns `true` if it was present.
    pub fn remove_candidate(&mut self, cell: usize, digit: u8) -> bool {
        if self.is_fixed(cell) {
            return false;
        }
        self.domains[cell].remove(digit)
    }

    pub(crate) fn fix(&mut self, cell: usize, digit: u8) {
        self.cells[cell] = digit;
        self.domains[cell] = DomainMask::singleton(digit);
    }

    /// Drop every digit in `remove` from the cell's domain. Returns the new domain.
    pub(crate) fn restrict(&mut self, cell: usize, remove: DomainMask) -> DomainMask {
        let next = self.domains[cell].without(remove);
        self.domains[cell] = next;
        next
    }

    /// Check that no fixed digit repeats within any section.
    ///
    /// # Errors
    ///
    /// Returns [`Inconsistency::DuplicateGiven`] naming the later of the two repeated cells.
    pub fn check_givens(&self, sections: &Sections) -> Result<(), Inconsistency> {
        for section in sections.iter() {
            let mut seen = DomainMask::EMPTY;
            for &cell in section {
                let digit = self.cells[cell];
                if digit == 0 {
                    continue;
                }
                if seen.contains(digit) {
                    return Err(Inconsistency::DuplicateGiven { cell, digit });
                }
                seen = seen.union(DomainMask::singleton(digit));
            }
        }
        Ok(())
    }

    /// Every section holds each digit 1..=9 exactly once.
    #[must_use]
    pub fn is_valid_solution(&self, sections: &Sections) -> bool {
        sections.iter().all(|section| {
            section
                .iter()
                .fold(DomainMask::EMPTY, |acc, &cell| acc.union(DomainMask::singleton(self.cells[cell])))
                == DomainMask::ALL
        })
    }

    /// Canonical byte encoding: 81 cell digits, then 81 little-endian domain masks.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(CELL_COUNT * 3);
        bytes.extend_from_slice(&self.cells);
        for mask in &self.domains {
            bytes.extend_from_slice(&mask.bits().to_le_bytes());
        }
        bytes
    }

    /// 64-bit state fingerprint over cells and domains.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        fingerprint64(DOMAIN_SUDOKU_STATE, &self.canonical_bytes())
    }

    /// Content digest of the cell digits only.
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(DOMAIN_SUDOKU_BOARD, &self.cells)
    }
}

/// Nine lines of nine comma-separated digits.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(9) {
            for (col, digit) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{digit}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
