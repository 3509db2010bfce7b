//! Arbor Kernel: the Sudoku board model and its constraint-propagation engine.
//!
//! # Module Dependency Direction
//!
//! `sections`, `domain` ← `board` ← `propagate`
//!
//! `error` and `hash` are leaves used throughout. Nothing here knows about
//! search; the expander that drives propagation from a search tree lives in
//! the harness.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod domain;
pub mod error;
pub mod hash;
pub mod propagate;
pub mod sections;

pub use board::Board;
pub use domain::{DomainMask, Worklist};
pub use error::{AssignmentDefect, BoardError, Inconsistency};
pub use propagate::Propagator;
pub use sections::Sections;
