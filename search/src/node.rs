//! Search nodes and the arena that owns them.
//!
//! Nodes are addressed by [`NodeId`] and link to their parent by id. Each node
//! counts its live children; destroying the last child of a parent destroys the
//! parent too, walking up the chain with a loop so stack use does not grow with
//! depth. Only the paths from the root to live leaves stay in memory.

use crate::contract::SearchProblem;
use crate::error::SearchError;

/// Stable index of a node slot in a [`NodeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One explored configuration.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    state: S,
    parent: Option<NodeId>,
    action: Option<A>,
    depth: u32,
    path_cost: f64,
    ordering_cost: f64,
    alive_children: u32,
    /// Creation counter, unique within one store.
    serial: u64,
}

impl<S, A> SearchNode<S, A> {
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> S {
        self.state
    }

    /// Parent id; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that produced this node; `None` for the root.
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    #[must_use]
    pub fn ordering_cost(&self) -> f64 {
        self.ordering_cost
    }

    #[must_use]
    pub fn alive_children(&self) -> u32 {
        self.alive_children
    }

    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// Arena of live nodes with slot reuse.
#[derive(Debug)]
pub struct NodeStore<S, A> {
    slots: Vec<Option<SearchNode<S, A>>>,
    free: Vec<usize>,
    live: usize,
    created: u64,
    peak_live: usize,
}

impl<S, A> NodeStore<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            created: 0,
            peak_live: 0,
        }
    }

    /// Create a node for `state`, linked under `parent` when given.
    ///
    /// Depth, path cost, and ordering cost come from the parent and the
    /// problem's cost functions. The parent's live-child count is incremented.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if `parent` is not live, if
    /// a child is created without an action, or if the step cost is negative
    /// or NaN.
    pub fn create_node<P>(
        &mut self,
        problem: &P,
        parent: Option<NodeId>,
        state: S,
        action: Option<A>,
    ) -> Result<NodeId, SearchError>
    where
        P: SearchProblem<State = S, Action = A> + ?Sized,
    {
        let (depth, path_cost) = match parent {
            None => (0, 0.0),
            Some(parent_id) => {
                let parent_node = self.get(parent_id)?;
                let Some(action_ref) = action.as_ref() else {
                    return Err(SearchError::invariant("child node created without an action"));
                };
                let step = problem.step_cost(parent_node, &state, action_ref);
                if step.is_nan() || step < 0.0 {
                    return Err(SearchError::invariant(format!(
                        "step cost {step} would decrease path cost"
                    )));
                }
                (parent_node.depth + 1, parent_node.path_cost + step)
            }
        };

        let mut node = SearchNode {
            state,
            parent,
            action,
            depth,
            path_cost,
            ordering_cost: path_cost,
            alive_children: 0,
            serial: self.created,
        };
        node.ordering_cost = problem.ordering_cost(&node);

        if let Some(parent_id) = parent {
            self.get_mut(parent_id)?.alive_children += 1;
        }

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.created += 1;
        self.live += 1;
        self.peak_live = self.peak_live.max(self.live);
        Ok(NodeId(index))
    }

    /// Look up a live node.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if `id` is not live.
    pub fn get(&self, id: NodeId) -> Result<&SearchNode<S, A>, SearchError> {
        self.node(id)
            .ok_or_else(|| SearchError::invariant(format!("node {} is not live", id.0)))
    }

    /// Look up a live node, or `None`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SearchNode<S, A>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut SearchNode<S, A>, SearchError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| SearchError::invariant(format!("node {} is not live", id.0)))
    }

    /// Remove a childless node from the arena and hand it back, leaving its
    /// parent's live-child count untouched. The parent chain stays alive until
    /// [`NodeStore::release_child`] is called for it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if `id` is not live or still
    /// has live children.
    pub fn detach(&mut self, id: NodeId) -> Result<SearchNode<S, A>, SearchError> {
        let children = self.get(id)?.alive_children;
        if children != 0 {
            return Err(SearchError::invariant(format!(
                "node {} still has {children} live children",
                id.0
            )));
        }
        let node = self.slots[id.0]
            .take()
            .ok_or_else(|| SearchError::invariant(format!("node {} vanished", id.0)))?;
        self.free.push(id.0);
        self.live -= 1;
        Ok(node)
    }

    /// Drop one live child from `parent`'s count, destroying the parent and
    /// then its ancestors for as long as their counts reach zero.
    /// Returns the number of nodes destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if an ancestor is missing or
    /// its count is already zero.
    pub fn release_child(&mut self, parent: NodeId) -> Result<usize, SearchError> {
        let mut destroyed = 0;
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            let node = self.get_mut(id)?;
            if node.alive_children == 0 {
                return Err(SearchError::invariant(format!(
                    "node {} has no live children to release",
                    id.0
                )));
            }
            node.alive_children -= 1;
            if node.alive_children > 0 {
                break;
            }
            cursor = self.detach(id)?.parent;
            destroyed += 1;
        }
        Ok(destroyed)
    }

    /// Destroy a childless node, cascading up through ancestors left without
    /// live children. Returns the number of nodes destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvariantViolation`] if `id` is not live or still
    /// has live children.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize, SearchError> {
        let node = self.detach(id)?;
        match node.parent {
            Some(parent) => Ok(1 + self.release_child(parent)?),
            None => Ok(1),
        }
    }

    /// Walk from `id` up to the root, starting with `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<S, A>> + '_ {
        std::iter::successors(self.node(id), move |node| {
            node.parent.and_then(|parent| self.node(parent))
        })
    }

    /// Nodes currently alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Nodes ever created by this store.
    #[must_use]
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Highest simultaneous live count.
    #[must_use]
    pub fn peak_live(&self) -> usize {
        self.peak_live
    }
}

impl<S, A> Default for NodeStore<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
