//! Problem contract trait.

use crate::error::SearchError;
use crate::node::SearchNode;

/// A state produced by draining an expansion, with the action that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
}

/// What [`SearchProblem::next_successor`] yields: the next successor, `None`
/// once the expansion is drained, or a defect.
pub type NextSuccessor<S, A> = Result<Option<Successor<S, A>>, SearchError>;

/// A search problem plugged into [`crate::search::search`].
///
/// # Contract
///
/// - `expand` returns a handle that owns everything it needs; it must not
///   borrow the parent state.
/// - `next_successor` yields successors one at a time and returns `Ok(None)`
///   once drained. The driver never calls it again after that.
/// - `step_cost` must be non-negative so path costs never decrease along a
///   parent chain.
/// - `fingerprint` returns `None` when states have no stable identity; the
///   driver then falls back to the node's creation serial.
pub trait SearchProblem {
    type State;
    type Action;
    /// Resumable successor cursor for one expanded state.
    type Expansion;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Cost of reaching `state` from `parent` via `action`. Defaults to 1, so
    /// path cost equals depth.
    fn step_cost(
        &self,
        _parent: &SearchNode<Self::State, Self::Action>,
        _state: &Self::State,
        _action: &Self::Action,
    ) -> f64 {
        1.0
    }

    /// Frontier ordering value. Defaults to path cost (uniform-cost order).
    fn ordering_cost(&self, node: &SearchNode<Self::State, Self::Action>) -> f64 {
        node.path_cost()
    }

    fn expand(&self, state: &Self::State) -> Self::Expansion;

    /// Pull the next successor from `expansion`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] when producing a successor
    /// exposes a defect in the problem itself.
    fn next_successor(
        &self,
        expansion: &mut Self::Expansion,
    ) -> NextSuccessor<Self::State, Self::Action>;

    /// 64-bit state fingerprint for cycle avoidance.
    fn fingerprint(&self, _state: &Self::State) -> Option<u64> {
        None
    }
}
