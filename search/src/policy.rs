//! Search policy: which frontier and visited set to build, and how rounds run.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::frontier::FrontierKind;
use crate::visited::VisitedSetKind;

/// Hard cap on the iterative-deepening depth limit.
pub const MAX_DEPTH_LIMIT: u32 = 500;

/// Iterative-deepening schedule.
///
/// Each round restarts from the root with the limit raised by `increment`.
/// With `increment == 0` only the initial round runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterativeDeepening {
    pub initial: u32,
    pub increment: u32,
}

/// Engine configuration for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    pub frontier: Option<FrontierKind>,
    #[serde(default)]
    pub visited: Option<VisitedSetKind>,
    /// Skip cycle avoidance entirely. No visited set is built.
    #[serde(default)]
    pub allow_cycles: bool,
    /// Emit a `debug!` event for every expansion.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub iterative_deepening: Option<IterativeDeepening>,
}

impl SearchPolicy {
    /// Policy with the given frontier and a hashed visited set.
    #[must_use]
    pub fn new(frontier: FrontierKind) -> Self {
        Self {
            frontier: Some(frontier),
            visited: Some(VisitedSetKind::Hashed),
            allow_cycles: false,
            debug: false,
            iterative_deepening: None,
        }
    }

    /// Disable cycle avoidance and drop the visited set.
    #[must_use]
    pub fn allow_cycles(mut self) -> Self {
        self.allow_cycles = true;
        self.visited = None;
        self
    }

    #[must_use]
    pub fn with_visited(mut self, visited: VisitedSetKind) -> Self {
        self.visited = Some(visited);
        self
    }

    #[must_use]
    pub fn with_iterative_deepening(mut self, initial: u32, increment: u32) -> Self {
        self.iterative_deepening = Some(IterativeDeepening { initial, increment });
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check that the policy can drive a search.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingCapability`] if there is no frontier, or no
    ///   visited set while cycles are disallowed.
    /// - [`SearchError::InvalidDepthLimit`] if iterative deepening starts above
    ///   [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.frontier.is_none() {
            return Err(SearchError::MissingCapability {
                capability: "frontier",
            });
        }
        if !self.allow_cycles && self.visited.is_none() {
            return Err(SearchError::MissingCapability {
                capability: "visited set",
            });
        }
        if let Some(deepening) = self.iterative_deepening {
            if deepening.initial > MAX_DEPTH_LIMIT {
                return Err(SearchError::InvalidDepthLimit {
                    initial: deepening.initial,
                    cap: MAX_DEPTH_LIMIT,
                });
            }
        }
        Ok(())
    }

    /// Serialize to compact JSON with fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error (not expected for this type).
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::new(FrontierKind::Priority)
    }
}
