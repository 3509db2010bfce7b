//! Arbor Search: a generic tree-search engine.
//!
//! The engine is agnostic to what it searches. A problem implements
//! [`SearchProblem`]; the driver owns the node arena, the frontier, and the
//! visited set for each round and hands back either a goal with its ancestor
//! chain or an exhaustion report.
//!
//! # Crate dependency graph
//!
//! ```text
//! arbor_kernel ─┐
//!               ├─  arbor_harness
//! arbor_search ─┘
//! (frontier, nodes)   (worlds, runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`]: the problem contract (expand, drain successors, goal test)
//! - [`NodeStore`]: arena of nodes with cascading, loop-based deletion
//! - [`Frontier`]: priority, FIFO, or LIFO queue of node ids
//! - [`VisitedSet`]: fingerprints already expanded, for cycle avoidance
//! - [`SearchPolicy`]: frontier, visited set, cycles, iterative deepening
//! - [`search()`]: the driver

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;
pub mod visited;

pub use contract::{NextSuccessor, SearchProblem, Successor};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierKind};
pub use node::{NodeId, NodeStore, SearchNode};
pub use policy::{IterativeDeepening, SearchPolicy, MAX_DEPTH_LIMIT};
pub use search::{search, SearchOutcome, SearchStats, Solution};
pub use visited::{VisitedSet, VisitedSetKind};
