//! Typed search errors.
//!
//! Configuration errors are reported by [`crate::policy::SearchPolicy::validate`]
//! before any node is created. Running out of nodes is not an error: it is
//! [`crate::search::SearchOutcome::Exhausted`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The policy lacks something the driver needs, e.g. a visited set while
    /// cycles are disallowed.
    #[error("search policy is missing a required capability: {capability}")]
    MissingCapability { capability: &'static str },

    /// Iterative deepening asked to start above the hard cap.
    #[error("iterative-deepening initial limit {initial} exceeds the cap of {cap}")]
    InvalidDepthLimit { initial: u32, cap: u32 },

    /// A contract between the driver, the node store, and the problem was
    /// broken. Correct usage never produces this.
    #[error("search invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

impl SearchError {
    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
        }
    }

    /// Whether this error was raised by policy validation.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCapability { .. } | Self::InvalidDepthLimit { .. }
        )
    }

    /// Whether this error signals a programming defect.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
