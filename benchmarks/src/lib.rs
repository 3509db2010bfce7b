//! Shared helpers for arbor benchmark suites.

use arbor_harness::worlds::puzzles::parse_cells;
use arbor_kernel::board::Board;
use arbor_kernel::propagate::Propagator;
use arbor_kernel::sections::{Sections, CELL_COUNT};

/// 81 cells of a compact board string.
///
/// # Panics
///
/// Panics if `text` does not hold exactly 81 digits. Benchmark inputs are fixed.
#[must_use]
pub fn board_cells(text: &str) -> [u8; CELL_COUNT] {
    let mut cells = [0u8; CELL_COUNT];
    cells.copy_from_slice(&parse_cells(text));
    cells
}

/// Unpropagated board built from `text`.
///
/// # Panics
///
/// Panics on malformed input.
#[must_use]
pub fn fresh_board(text: &str) -> Board {
    Board::from_cells(&board_cells(text)).expect("benchmark board is well formed")
}

/// Board after propagation from its givens.
///
/// # Panics
///
/// Panics if the board is contradictory.
#[must_use]
pub fn propagated_board(sections: &Sections, text: &str) -> Board {
    let mut board = fresh_board(text);
    let givens = board.fixed_worklist();
    Propagator::new(sections)
        .propagate(&mut board, givens)
        .expect("benchmark board propagates");
    board
}
