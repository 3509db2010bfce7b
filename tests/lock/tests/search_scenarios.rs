//! Search engine acceptance tests over synthetic worlds.
//!
//! Covers frontier ordering (breadth-first, uniform-cost), iterative
//! deepening schedules, cycle avoidance, and node-store leak checks.

use std::cell::Cell;
use std::rc::Rc;

use arbor_harness::worlds::ring::Ring;
use arbor_harness::worlds::uniform_tree::UniformTree;
use arbor_search::contract::{NextSuccessor, SearchProblem, Successor};
use arbor_search::error::SearchError;
use arbor_search::frontier::FrontierKind;
use arbor_search::policy::SearchPolicy;
use arbor_search::search::{search, SearchOutcome};
use arbor_search::visited::VisitedSetKind;

// ---------------------------------------------------------------------------
// Frontier ordering
// ---------------------------------------------------------------------------

// ACCEPTANCE: FIFO over a depth-3, branching-2 tree visits breadth-first
#[test]
fn fifo_visits_breadth_first_and_expands_every_node() {
    let tree = UniformTree::new(2, 3);
    let outcome = search(&tree, &SearchPolicy::new(FrontierKind::Fifo)).unwrap();

    assert!(!outcome.is_found());
    assert_eq!(outcome.stats().expansions, tree.node_count());
    assert_eq!(outcome.stats().expansions, 15);
    assert_eq!(tree.expanded(), (0..15).collect::<Vec<u64>>());
    assert_eq!(outcome.stats().live_nodes_at_exit, 0);
}

#[test]
fn lifo_visits_depth_first() {
    let tree = UniformTree::new(2, 2);
    search(&tree, &SearchPolicy::new(FrontierKind::Lifo)).unwrap();
    // Last child pushed is popped first.
    assert_eq!(tree.expanded(), vec![0, 2, 6, 5, 1, 4, 3]);
}

// ACCEPTANCE: priority pops are non-decreasing in ordering cost
#[test]
fn priority_pops_in_non_decreasing_cost() {
    let tree = UniformTree::new(3, 4).with_step_costs(vec![3.0, 1.0, 2.0]);
    let outcome = search(&tree, &SearchPolicy::new(FrontierKind::Priority)).unwrap();
    assert_eq!(outcome.stats().expansions, tree.node_count());

    let pops = tree.popped();
    assert_eq!(pops.len(), 121);
    for pair in pops.windows(2) {
        assert!(
            pair[0].1 <= pair[1].1,
            "pop of {} at cost {} came before {} at cost {}",
            pair[1].0,
            pair[1].1,
            pair[0].0,
            pair[0].1
        );
    }
}

#[test]
fn uniform_step_cost_pops_by_depth() {
    let tree = UniformTree::new(3, 3);
    search(&tree, &SearchPolicy::default()).unwrap();
    let costs: Vec<f64> = tree.popped().iter().map(|&(_, cost)| cost).collect();
    assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    assert!((costs[costs.len() - 1] - 3.0).abs() < f64::EPSILON);
}

// ACCEPTANCE: depth(child) == depth(parent) + 1, pathCost(child) >= pathCost(parent)
#[test]
fn path_depth_and_cost_are_monotone() {
    let tree = UniformTree::new(3, 5)
        .with_step_costs(vec![0.0, 2.5, 1.0])
        .with_goal(300);
    let SearchOutcome::Found(solution) = search(&tree, &SearchPolicy::default()).unwrap() else {
        panic!("goal 300 is reachable");
    };
    let path = solution.path();
    assert_eq!(path.first().unwrap().depth(), 0);
    for pair in path.windows(2) {
        assert_eq!(pair[1].depth(), pair[0].depth() + 1);
        assert!(pair[1].path_cost() >= pair[0].path_cost());
    }
    assert_eq!(solution.goal_state().id, 300);
    assert!((solution.goal().path_cost() - tree.path_cost_of(300)).abs() < f64::EPSILON);
    assert_eq!(solution.release().unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Iterative deepening
// ---------------------------------------------------------------------------

// ACCEPTANCE: initial=0, increment=5, goal at depth 7 → rounds at 0, 5, 10
#[test]
fn iterative_deepening_rounds_at_0_5_10() {
    // 127 is the first node at depth 7 in a binary tree.
    let tree = UniformTree::new(2, 12).with_goal(127);
    let policy = SearchPolicy::new(FrontierKind::Lifo).with_iterative_deepening(0, 5);
    let SearchOutcome::Found(solution) = search(&tree, &policy).unwrap() else {
        panic!("goal at depth 7 should be found");
    };

    assert_eq!(solution.depth(), 7);
    assert_eq!(solution.stats().rounds, 3);
    assert_eq!(solution.stats().depth_limits, vec![0, 5, 10]);
    assert_eq!(solution.stats().final_depth_limit, Some(10));
    assert_eq!(solution.release().unwrap(), 0);
}

#[test]
fn iterative_deepening_restarts_each_round() {
    let tree = UniformTree::new(2, 4);
    let policy = SearchPolicy::new(FrontierKind::Fifo).with_iterative_deepening(1, 2);
    let outcome = search(&tree, &policy).unwrap();
    // Limits 1, 3, 5. The round at 5 cuts nothing off, so it is the last.
    assert_eq!(outcome.stats().depth_limits, vec![1, 3, 5]);
    // Round at 1: root and its two children. Round at 3: depths 0..=3.
    // Round at 5: the whole tree.
    assert_eq!(outcome.stats().expansions, 3 + 15 + 31);
    let expanded = tree.expanded();
    assert_eq!(expanded.iter().filter(|&&id| id == 0).count(), 3);
}

// ---------------------------------------------------------------------------
// Cycle avoidance
// ---------------------------------------------------------------------------

#[test]
fn ring_is_searched_once_per_state() {
    for visited in [VisitedSetKind::Hashed, VisitedSetKind::Ordered] {
        for frontier in [FrontierKind::Fifo, FrontierKind::Lifo, FrontierKind::Priority] {
            let ring = Ring::new(10, 0);
            let policy = SearchPolicy::new(frontier).with_visited(visited);
            let outcome = search(&ring, &policy).unwrap();
            assert!(!outcome.is_found());
            assert_eq!(outcome.stats().expansions, 10, "{frontier:?}/{visited:?}");
            assert_eq!(outcome.stats().live_nodes_at_exit, 0);
        }
    }
}

#[test]
fn ring_goal_found_by_shortest_route_breadth_first() {
    let ring = Ring::new(10, 0).with_goal(7);
    let SearchOutcome::Found(solution) = search(&ring, &SearchPolicy::new(FrontierKind::Fifo)).unwrap() else {
        panic!("7 is on the ring");
    };
    assert_eq!(solution.depth(), 3);
    assert_eq!(solution.actions(), vec![&-1, &-1, &-1]);
}

// ---------------------------------------------------------------------------
// Configuration errors vs. exhaustion
// ---------------------------------------------------------------------------

// ACCEPTANCE: "no solution" is distinguishable from a configuration error
#[test]
fn configuration_error_happens_before_any_work() {
    let tree = UniformTree::new(2, 2);
    let policy = SearchPolicy {
        visited: None,
        ..SearchPolicy::new(FrontierKind::Fifo)
    };
    let err = search(&tree, &policy).unwrap_err();
    assert_eq!(
        err,
        SearchError::MissingCapability {
            capability: "visited set"
        }
    );
    assert!(err.is_configuration());
    assert!(tree.expanded().is_empty());
    assert!(tree.popped().is_empty());

    let outcome = search(&tree, &SearchPolicy::new(FrontierKind::Fifo)).unwrap();
    assert!(matches!(outcome, SearchOutcome::Exhausted(_)));
}

// ---------------------------------------------------------------------------
// Node-store leak checks
// ---------------------------------------------------------------------------

/// Binary tree of depth 4 whose states count how many of them are alive.
struct Tracked {
    live: Rc<Cell<i64>>,
    goal: Option<u64>,
}

struct TrackedState {
    id: u64,
    depth: u32,
    live: Rc<Cell<i64>>,
}

impl TrackedState {
    fn new(id: u64, depth: u32, live: &Rc<Cell<i64>>) -> Self {
        live.set(live.get() + 1);
        Self {
            id,
            depth,
            live: Rc::clone(live),
        }
    }
}

impl Drop for TrackedState {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl SearchProblem for Tracked {
    type State = TrackedState;
    type Action = ();
    type Expansion = Vec<(u64, u32)>;

    fn initial_state(&self) -> TrackedState {
        TrackedState::new(0, 0, &self.live)
    }

    fn is_goal(&self, state: &TrackedState) -> bool {
        self.goal == Some(state.id)
    }

    fn expand(&self, state: &TrackedState) -> Vec<(u64, u32)> {
        if state.depth >= 4 {
            return Vec::new();
        }
        vec![(state.id * 2 + 2, state.depth + 1), (state.id * 2 + 1, state.depth + 1)]
    }

    fn next_successor(
        &self,
        expansion: &mut Vec<(u64, u32)>,
    ) -> NextSuccessor<TrackedState, ()> {
        Ok(expansion.pop().map(|(id, depth)| Successor {
            state: TrackedState::new(id, depth, &self.live),
            action: (),
        }))
    }

    fn fingerprint(&self, state: &TrackedState) -> Option<u64> {
        Some(state.id)
    }
}

// ACCEPTANCE: live node count returns to zero after the result is released
#[test]
fn exhausted_search_frees_every_state() {
    let problem = Tracked {
        live: Rc::new(Cell::new(0)),
        goal: None,
    };
    for frontier in [FrontierKind::Fifo, FrontierKind::Lifo, FrontierKind::Priority] {
        let outcome = search(&problem, &SearchPolicy::new(frontier)).unwrap();
        assert_eq!(outcome.stats().nodes_created, 31);
        assert_eq!(outcome.stats().live_nodes_at_exit, 0);
        assert_eq!(problem.live.get(), 0, "{frontier:?} leaked states");
    }
}

// ACCEPTANCE: goal chain stays alive until release, then everything is freed
#[test]
fn found_search_holds_only_the_goal_chain() {
    let problem = Tracked {
        live: Rc::new(Cell::new(0)),
        goal: Some(9),
    };
    let SearchOutcome::Found(solution) = search(&problem, &SearchPolicy::new(FrontierKind::Fifo)).unwrap() else {
        panic!("9 is in the tree");
    };
    // 9 → 4 → 1 → 0.
    assert_eq!(solution.depth(), 3);
    assert_eq!(problem.live.get(), 4);
    assert_eq!(solution.stats().live_nodes_at_exit, 3);
    let ids: Vec<u64> = solution.path().iter().map(|node| node.state().id).collect();
    assert_eq!(ids, vec![0, 1, 4, 9]);
    assert_eq!(solution.release().unwrap(), 0);
    assert_eq!(problem.live.get(), 0);
}

#[test]
fn dropping_a_solution_frees_its_chain() {
    let problem = Tracked {
        live: Rc::new(Cell::new(0)),
        goal: Some(30),
    };
    let outcome = search(&problem, &SearchPolicy::new(FrontierKind::Lifo)).unwrap();
    assert!(outcome.is_found());
    drop(outcome);
    assert_eq!(problem.live.get(), 0);
}
