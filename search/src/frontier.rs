//! Frontier strategies: priority (uniform-cost), FIFO (breadth-first), and
//! LIFO (depth-first).
//!
//! The frontier holds node ids only; nodes stay in the [`crate::node::NodeStore`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Queue of not-yet-expanded nodes.
pub trait Frontier {
    /// Enqueue `node`. `ordering_cost` is ignored by strategies that do not order.
    fn add(&mut self, node: NodeId, ordering_cost: f64);

    /// Dequeue the next node to expand.
    fn remove_first(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which frontier strategy to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierKind {
    Priority,
    Fifo,
    Lifo,
}

impl FrontierKind {
    #[must_use]
    pub fn make(self) -> Box<dyn Frontier> {
        match self {
            Self::Priority => Box::new(PriorityFrontier::new()),
            Self::Fifo => Box::new(FifoFrontier::new()),
            Self::Lifo => Box::new(LifoFrontier::new()),
        }
    }
}

/// Heap ordering key: `(ordering_cost, seq)`.
///
/// Costs compare with `total_cmp`; equal costs pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct FrontierKey {
    cost: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap on ordering cost.
///
/// `BinaryHeap` is a max-heap, so keys are wrapped in `Reverse`.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<FrontierKey>>,
    next_seq: u64,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityFrontier {
    fn add(&mut self, node: NodeId, ordering_cost: f64) {
        self.heap.push(Reverse(FrontierKey {
            cost: ordering_cost,
            seq: self.next_seq,
            node,
        }));
        self.next_seq += 1;
    }

    fn remove_first(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(key)| key.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Insertion-order queue.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn add(&mut self, node: NodeId, _ordering_cost: f64) {
        self.queue.push_back(node);
    }

    fn remove_first(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Reverse-insertion-order stack.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<NodeId>,
}

impl LifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    fn add(&mut self, node: NodeId, _ordering_cost: f64) {
        self.stack.push(node);
    }

    fn remove_first(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}
