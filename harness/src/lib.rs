//! Arbor Harness: search problems and the Sudoku solve pipeline.
//!
//! The harness plugs problems ("worlds") into the generic engine in
//! `arbor_search` and drives the Sudoku propagation engine in `arbor_kernel`.
//! It owns everything outside those two cores: board files, configuration,
//! timing, and the `arbor` binary.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod board_file;
pub mod config;
pub mod runner;
pub mod worlds;
