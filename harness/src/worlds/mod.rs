//! Search problems run by the harness.

pub mod puzzles;
pub mod ring;
pub mod sudoku;
pub mod uniform_tree;
