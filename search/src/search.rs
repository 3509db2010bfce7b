//! Search entry point, the per-round expansion loop, and the
//! iterative-deepening controller.

use serde::Serialize;
use tracing::{debug, info};

use crate::contract::SearchProblem;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::{NodeStore, SearchNode};
use crate::policy::{SearchPolicy, MAX_DEPTH_LIMIT};

/// Counters accumulated across every round of one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    /// Nodes that passed the cycle check, summed over all rounds.
    pub expansions: u64,
    pub rounds: u32,
    pub nodes_created: u64,
    pub peak_live_nodes: usize,
    pub peak_frontier: usize,
    /// Depth limit of each iterative-deepening round, in order.
    pub depth_limits: Vec<u32>,
    pub final_depth_limit: Option<u32>,
    /// Live nodes when the last round ended. Zero when exhausted; the goal's
    /// ancestor chain when found.
    pub live_nodes_at_exit: usize,
}

/// How a search ended.
#[derive(Debug)]
pub enum SearchOutcome<S, A> {
    Found(Solution<S, A>),
    /// Every reachable node was expanded or discarded without meeting the goal.
    Exhausted(SearchStats),
}

impl<S, A> SearchOutcome<S, A> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Found(solution) => &solution.stats,
            Self::Exhausted(stats) => stats,
        }
    }
}

/// A goal node together with the ancestor chain that leads to it.
///
/// The ancestors stay alive in the store until [`Solution::release`] runs or
/// the solution is dropped.
#[derive(Debug)]
pub struct Solution<S, A> {
    goal: SearchNode<S, A>,
    store: NodeStore<S, A>,
    stats: SearchStats,
}

impl<S, A> Solution<S, A> {
    #[must_use]
    pub fn goal(&self) -> &SearchNode<S, A> {
        &self.goal
    }

    #[must_use]
    pub fn goal_state(&self) -> &S {
        self.goal.state()
    }

    #[must_use]
    pub fn into_goal_state(self) -> S {
        self.goal.into_state()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.goal.depth()
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Nodes from the root to the goal, root first.
    #[must_use]
    pub fn path(&self) -> Vec<&SearchNode<S, A>> {
        let mut chain: Vec<&SearchNode<S, A>> = match self.goal.parent() {
            Some(parent) => self.store.ancestors(parent).collect(),
            None => Vec::new(),
        };
        chain.reverse();
        chain.push(&self.goal);
        chain
    }

    /// Actions along the path, root first.
    #[must_use]
    pub fn actions(&self) -> Vec<&A> {
        self.path().into_iter().filter_map(SearchNode::action).collect()
    }

    /// Destroy the goal and its ancestors. Returns the live-node count left in
    /// the store, which is zero unless the store was corrupted.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if an ancestor is missing.
    pub fn release(mut self) -> Result<usize, SearchError> {
        if let Some(parent) = self.goal.parent() {
            self.store.release_child(parent)?;
        }
        Ok(self.store.live_count())
    }
}

enum RoundEnd<S, A> {
    Goal {
        goal: SearchNode<S, A>,
        store: NodeStore<S, A>,
    },
    Exhausted {
        needs_deeper: bool,
    },
}

/// Run a search for `problem` under `policy`.
///
/// Without iterative deepening a single unbounded round runs. With it, rounds
/// restart from the root at limits `initial`, `initial + increment`, ... until
/// a goal is found, a round exhausts without cutting anything off, or the limit
/// reaches [`MAX_DEPTH_LIMIT`].
///
/// # Errors
///
/// Configuration errors from [`SearchPolicy::validate`] are returned before
/// any node is created. [`SearchError::InvariantViolation`] is returned if the
/// problem or the node store breaks its contract mid-search.
pub fn search<P: SearchProblem>(
    problem: &P,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
    policy.validate()?;
    let mut stats = SearchStats::default();

    let Some(deepening) = policy.iterative_deepening else {
        stats.rounds = 1;
        return Ok(match run_round(problem, policy, None, &mut stats)? {
            RoundEnd::Goal { goal, store } => found(goal, store, stats),
            RoundEnd::Exhausted { .. } => SearchOutcome::Exhausted(stats),
        });
    };

    let mut limit = deepening.initial;
    loop {
        stats.rounds += 1;
        stats.depth_limits.push(limit);
        stats.final_depth_limit = Some(limit);
        match run_round(problem, policy, Some(limit), &mut stats)? {
            RoundEnd::Goal { goal, store } => return Ok(found(goal, store, stats)),
            RoundEnd::Exhausted { needs_deeper } => {
                if !needs_deeper || deepening.increment == 0 || limit >= MAX_DEPTH_LIMIT {
                    return Ok(SearchOutcome::Exhausted(stats));
                }
                limit = limit.saturating_add(deepening.increment).min(MAX_DEPTH_LIMIT);
                info!(limit, round = stats.rounds + 1, "increasing iterative-depth limit");
            }
        }
    }
}

fn found<S, A>(goal: SearchNode<S, A>, store: NodeStore<S, A>, stats: SearchStats) -> SearchOutcome<S, A> {
    SearchOutcome::Found(Solution { goal, store, stats })
}

/// One round from a fresh root. The store, frontier, and visited set live only
/// for the round; on a goal the store moves into the result.
fn run_round<P: SearchProblem>(
    problem: &P,
    policy: &SearchPolicy,
    limit: Option<u32>,
    stats: &mut SearchStats,
) -> Result<RoundEnd<P::State, P::Action>, SearchError> {
    let frontier_kind = policy.frontier.ok_or(SearchError::MissingCapability {
        capability: "frontier",
    })?;
    let mut frontier = frontier_kind.make();
    let mut visited = if policy.allow_cycles {
        None
    } else {
        let kind = policy.visited.ok_or(SearchError::MissingCapability {
            capability: "visited set",
        })?;
        Some(kind.make())
    };
    let deepen = policy
        .iterative_deepening
        .is_some_and(|deepening| deepening.increment > 0);

    let mut store = NodeStore::new();
    let root = store.create_node(problem, None, problem.initial_state(), None)?;
    frontier.add(root, store.get(root)?.ordering_cost());

    let mut needs_deeper = false;
    let end = loop {
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        let Some(id) = frontier.remove_first() else {
            record_store(stats, &store);
            break RoundEnd::Exhausted { needs_deeper };
        };

        let node = store.get(id)?;
        let key = match visited.as_deref() {
            Some(set) => {
                let key = problem
                    .fingerprint(node.state())
                    .unwrap_or_else(|| node.serial());
                if set.contains(key) {
                    store.destroy(id)?;
                    continue;
                }
                Some(key)
            }
            None => None,
        };

        stats.expansions += 1;
        if problem.is_goal(node.state()) {
            drain(frontier.as_mut(), &mut store)?;
            let goal = store.detach(id)?;
            record_store(stats, &store);
            break RoundEnd::Goal { goal, store };
        }

        let depth = node.depth();
        if limit.is_some_and(|limit| depth >= limit) {
            store.destroy(id)?;
            if deepen {
                needs_deeper = true;
            }
            continue;
        }

        if policy.debug {
            debug!(
                depth,
                path_cost = node.path_cost(),
                expansions = stats.expansions,
                "expanding node"
            );
        }
        if let (Some(set), Some(key)) = (visited.as_mut(), key) {
            set.insert(key);
        }

        let mut expansion = problem.expand(node.state());
        let mut children = 0u32;
        while let Some(successor) = problem.next_successor(&mut expansion)? {
            if let Some(set) = visited.as_deref() {
                if problem
                    .fingerprint(&successor.state)
                    .is_some_and(|fingerprint| set.contains(fingerprint))
                {
                    continue;
                }
            }
            let child = store.create_node(problem, Some(id), successor.state, Some(successor.action))?;
            frontier.add(child, store.get(child)?.ordering_cost());
            children += 1;
        }
        drop(expansion);

        if children == 0 {
            store.destroy(id)?;
        }
    };

    match &end {
        RoundEnd::Goal { goal, .. } => {
            debug!(depth = goal.depth(), expansions = stats.expansions, "round ended: goal found");
        }
        RoundEnd::Exhausted { needs_deeper } => {
            debug!(needs_deeper, expansions = stats.expansions, "round ended: exhausted");
        }
    }
    Ok(end)
}

/// Fold the round's store counters into `stats`. Runs before the store moves
/// into the round result.
fn record_store<S, A>(stats: &mut SearchStats, store: &NodeStore<S, A>) {
    stats.nodes_created += store.created_count();
    stats.peak_live_nodes = stats.peak_live_nodes.max(store.peak_live());
    stats.live_nodes_at_exit = store.live_count();
}

fn drain<S, A>(frontier: &mut dyn Frontier, store: &mut NodeStore<S, A>) -> Result<(), SearchError> {
    while let Some(id) = frontier.remove_first() {
        store.destroy(id)?;
    }
    Ok(())
}
