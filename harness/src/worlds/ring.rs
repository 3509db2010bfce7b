//! `Ring`: states `0..n` joined in a cycle, each stepping to its two
//! neighbours. Without a visited set the search would revisit states forever.

use arbor_search::contract::{NextSuccessor, SearchProblem, Successor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    size: u64,
    start: u64,
    goal: Option<u64>,
}

/// Remaining neighbours of one state: `+1` first, then `-1`.
#[derive(Debug, Clone, Default)]
pub struct RingExpansion {
    pending: Vec<u64>,
}

impl Ring {
    #[must_use]
    pub fn new(size: u64, start: u64) -> Self {
        Self {
            size: size.max(1),
            start: start % size.max(1),
            goal: None,
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: u64) -> Self {
        self.goal = Some(goal);
        self
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl SearchProblem for Ring {
    type State = u64;
    /// `+1` or `-1`.
    type Action = i8;
    type Expansion = RingExpansion;

    fn initial_state(&self) -> u64 {
        self.start
    }

    fn is_goal(&self, state: &u64) -> bool {
        self.goal == Some(*state)
    }

    fn expand(&self, state: &u64) -> RingExpansion {
        let up = (state + 1) % self.size;
        let down = (state + self.size - 1) % self.size;
        RingExpansion {
            pending: vec![down, up],
        }
    }

    fn next_successor(&self, expansion: &mut RingExpansion) -> NextSuccessor<u64, i8> {
        let remaining = expansion.pending.len();
        Ok(expansion.pending.pop().map(|state| Successor {
            state,
            action: if remaining == 2 { 1 } else { -1 },
        }))
    }

    fn fingerprint(&self, state: &u64) -> Option<u64> {
        Some(*state)
    }
}
