//! `UniformTree`: a finite tree with a fixed branching factor.
//!
//! Node ids follow breadth-first numbering: the root is 0 and the children of
//! `n` are `n * b + 1 ..= n * b + b`. Expanded ids and frontier pops are
//! recorded so tests can observe visiting order.

use std::cell::RefCell;

use arbor_search::contract::{NextSuccessor, SearchProblem, Successor};
use arbor_search::node::SearchNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeState {
    pub id: u64,
    pub depth: u32,
}

/// Cursor over the children of one node.
#[derive(Debug, Clone)]
pub struct TreeExpansion {
    parent: TreeState,
    next: u64,
    end: u64,
}

#[derive(Debug, Default)]
pub struct UniformTree {
    branching: u64,
    max_depth: u32,
    goal: Option<u64>,
    /// Cost of the edge into the `i`-th child of any node is
    /// `step_costs[i % len]`; empty means 1.
    step_costs: Vec<f64>,
    expanded: RefCell<Vec<u64>>,
    popped: RefCell<Vec<(u64, f64)>>,
}

impl UniformTree {
    #[must_use]
    pub fn new(branching: u64, max_depth: u32) -> Self {
        Self {
            branching,
            max_depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: u64) -> Self {
        self.goal = Some(goal);
        self
    }

    #[must_use]
    pub fn with_step_costs(mut self, step_costs: Vec<f64>) -> Self {
        self.step_costs = step_costs;
        self
    }

    /// Total node count: `1 + b + b^2 + ... + b^max_depth`.
    #[must_use]
    pub fn node_count(&self) -> u64 {
        (0..=self.max_depth).map(|d| self.branching.pow(d)).sum()
    }

    /// Ids in the order they were expanded.
    #[must_use]
    pub fn expanded(&self) -> Vec<u64> {
        self.expanded.borrow().clone()
    }

    /// `(id, path_cost)` of every goal-tested node, in pop order.
    #[must_use]
    pub fn popped(&self) -> Vec<(u64, f64)> {
        self.popped.borrow().clone()
    }

    fn edge_cost(&self, id: u64) -> f64 {
        if self.step_costs.is_empty() || id == 0 {
            return 1.0;
        }
        let slot = (id - 1) % self.branching.max(1);
        let len = self.step_costs.len() as u64;
        self.step_costs[usize::try_from(slot % len).unwrap_or(0)]
    }

    /// Path cost from the root to `id`, recomputed from the edge costs.
    #[must_use]
    pub fn path_cost_of(&self, id: u64) -> f64 {
        let mut cost = 0.0;
        let mut cursor = id;
        while cursor != 0 {
            cost += self.edge_cost(cursor);
            cursor = (cursor - 1) / self.branching.max(1);
        }
        cost
    }
}

impl SearchProblem for UniformTree {
    type State = TreeState;
    type Action = u64;
    type Expansion = TreeExpansion;

    fn initial_state(&self) -> TreeState {
        TreeState { id: 0, depth: 0 }
    }

    /// Every popped node that survives the cycle check is goal-tested exactly
    /// once, so this is where pops are logged.
    fn is_goal(&self, state: &TreeState) -> bool {
        self.popped
            .borrow_mut()
            .push((state.id, self.path_cost_of(state.id)));
        self.goal == Some(state.id)
    }

    fn step_cost(&self, _parent: &SearchNode<TreeState, u64>, state: &TreeState, _action: &u64) -> f64 {
        self.edge_cost(state.id)
    }

    fn expand(&self, state: &TreeState) -> TreeExpansion {
        self.expanded.borrow_mut().push(state.id);
        let (next, end) = if state.depth < self.max_depth {
            let first = state.id * self.branching + 1;
            (first, first + self.branching)
        } else {
            (0, 0)
        };
        TreeExpansion {
            parent: *state,
            next,
            end,
        }
    }

    fn next_successor(
        &self,
        expansion: &mut TreeExpansion,
    ) -> NextSuccessor<TreeState, u64> {
        if expansion.next >= expansion.end {
            return Ok(None);
        }
        let id = expansion.next;
        expansion.next += 1;
        Ok(Some(Successor {
            state: TreeState {
                id,
                depth: expansion.parent.depth + 1,
            },
            action: id,
        }))
    }

    fn fingerprint(&self, state: &TreeState) -> Option<u64> {
        Some(state.id)
    }
}
