//! Visited sets of 64-bit state fingerprints.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Set of fingerprints already expanded.
pub trait VisitedSet {
    /// Record `fingerprint`. Returns `false` if it was already present.
    fn insert(&mut self, fingerprint: u64) -> bool;

    fn contains(&self, fingerprint: u64) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisitedSet for HashSet<u64> {
    fn insert(&mut self, fingerprint: u64) -> bool {
        HashSet::insert(self, fingerprint)
    }

    fn contains(&self, fingerprint: u64) -> bool {
        HashSet::contains(self, &fingerprint)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Ordered variant; iteration order is stable if the set is ever dumped.
impl VisitedSet for BTreeSet<u64> {
    fn insert(&mut self, fingerprint: u64) -> bool {
        BTreeSet::insert(self, fingerprint)
    }

    fn contains(&self, fingerprint: u64) -> bool {
        BTreeSet::contains(self, &fingerprint)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

/// Which visited-set implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitedSetKind {
    Hashed,
    Ordered,
}

impl VisitedSetKind {
    #[must_use]
    pub fn make(self) -> Box<dyn VisitedSet> {
        match self {
            Self::Hashed => Box::new(HashSet::<u64>::new()),
            Self::Ordered => Box::new(BTreeSet::<u64>::new()),
        }
    }
}
