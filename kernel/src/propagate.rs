//! Constraint propagation over a [`Board`].
//!
//! Three passes run to a combined fixpoint:
//!
//! - **Arc consistency** pops fixed cells off a [`Worklist`] and strips their
//!   digit from every peer. A peer left with one candidate is fixed and queued.
//! - **Hidden singles** place a digit that only one unfixed cell in a section
//!   can still hold.
//! - **Naked subsets** find `k` unfixed cells in a section sharing the same
//!   `k` candidates and strip those candidates from the rest of the section.
//!
//! A failed call leaves the board partially updated. Callers propagate on a
//! copy and drop it on `Err`.

use tracing::trace;

use crate::board::Board;
use crate::domain::{DomainMask, Worklist};
use crate::error::Inconsistency;
use crate::sections::{Sections, SECTION_COUNT};

/// Section visiting order used when none is supplied.
const IDENTITY_ORDER: [usize; SECTION_COUNT] = {
    let mut order = [0usize; SECTION_COUNT];
    let mut i = 0;
    while i < SECTION_COUNT {
        order[i] = i;
        i += 1;
    }
    order
};

/// Runs the propagation passes against a shared section table.
#[derive(Debug, Clone, Copy)]
pub struct Propagator<'s> {
    sections: &'s Sections,
    order: [usize; SECTION_COUNT],
}

impl<'s> Propagator<'s> {
    #[must_use]
    pub fn new(sections: &'s Sections) -> Self {
        Self {
            sections,
            order: IDENTITY_ORDER,
        }
    }

    /// Visit sections in `order` during the hidden-single and naked-subset passes.
    /// `order` must be a permutation of `0..27`.
    #[must_use]
    pub fn with_section_order(mut self, order: [usize; SECTION_COUNT]) -> Self {
        debug_assert!(
            {
                let mut sorted = order;
                sorted.sort_unstable();
                sorted == IDENTITY_ORDER
            },
            "section order must be a permutation of 0..27"
        );
        self.order = order;
        self
    }

    #[must_use]
    pub fn sections(&self) -> &'s Sections {
        self.sections
    }

    /// Full driver: arc consistency from `worklist`, then hidden singles and
    /// naked subsets alternately until neither changes anything, then a final
    /// empty-domain check.
    ///
    /// # Errors
    ///
    /// Returns [`Inconsistency`] when the board cannot be completed.
    pub fn propagate(&self, board: &mut Board, worklist: Worklist) -> Result<(), Inconsistency> {
        let mut worklist = worklist;
        self.arc_consistency(board, &mut worklist)?;
        loop {
            let placed = self.hidden_singles(board, &mut worklist)?;
            let reduced = self.naked_subsets(board, &mut worklist)?;
            if !placed && !reduced {
                break;
            }
        }
        if let Some(cell) = board.first_empty_domain() {
            trace!(cell, "empty domain after propagation");
            return Err(Inconsistency::EmptyDomain { cell });
        }
        Ok(())
    }

    /// Drain `worklist`, removing each fixed cell's digit from its peers.
    ///
    /// # Errors
    ///
    /// Returns [`Inconsistency::Contradiction`] if a collapsed peer's only
    /// candidate already appears in one of its sections.
    pub fn arc_consistency(&self, board: &mut Board, worklist: &mut Worklist) -> Result<(), Inconsistency> {
        while let Some(cell) = worklist.pop() {
            let fixed = board.domain(cell);
            for &peer in self.sections.peers(cell) {
                if peer == cell || board.is_fixed(peer) {
                    continue;
                }
                // A peer already down to one candidate is fixed here too,
                // even when this removal did not touch it.
                if let Some(digit) = board.restrict(peer, fixed).single() {
                    self.fix_checked(board, peer, digit)?;
                    worklist.insert(peer);
                }
            }
        }
        Ok(())
    }

    /// Place every hidden single, rerunning arc consistency after each
    /// placement, until a full pass over all sections places nothing.
    /// Returns whether anything was placed.
    ///
    /// # Errors
    ///
    /// Fails with the first contradiction found by a placement or by the
    /// nested arc-consistency run.
    pub fn hidden_singles(&self, board: &mut Board, worklist: &mut Worklist) -> Result<bool, Inconsistency> {
        let mut placed_any = false;
        loop {
            let mut placed = false;
            for &index in &self.order {
                let section = self.sections.section(index);
                let mut seen = DomainMask::EMPTY;
                let mut repeated = DomainMask::EMPTY;
                for &cell in section.iter().filter(|&&cell| !board.is_fixed(cell)) {
                    let domain = board.domain(cell);
                    repeated = repeated.union(seen.intersection(domain));
                    seen = seen.union(domain);
                }
                for digit in seen.without(repeated).digits() {
                    let target = section
                        .iter()
                        .copied()
                        .find(|&cell| !board.is_fixed(cell) && board.domain(cell).contains(digit));
                    // An earlier placement in this section may have claimed the only holder.
                    let Some(cell) = target else { continue };
                    self.fix_checked(board, cell, digit)?;
                    worklist.insert(cell);
                    self.arc_consistency(board, worklist)?;
                    placed = true;
                }
            }
            if !placed {
                return Ok(placed_any);
            }
            placed_any = true;
        }
    }

    /// One pass of naked-subset elimination over every section, running arc
    /// consistency after each section. Returns whether any domain shrank.
    ///
    /// # Errors
    ///
    /// Fails when a shrunken cell collapses to a digit already present in a
    /// shared section, or when the follow-up arc consistency fails.
    pub fn naked_subsets(&self, board: &mut Board, worklist: &mut Worklist) -> Result<bool, Inconsistency> {
        let mut changed = false;
        for &index in &self.order {
            let section = self.sections.section(index);
            let mut grouped = [false; 9];
            for (start, &first) in section.iter().enumerate() {
                if grouped[start] || board.is_fixed(first) {
                    continue;
                }
                let shared = board.domain(first);
                let mut members = 0u32;
                for (slot, &cell) in section.iter().enumerate().skip(start) {
                    if !grouped[slot] && !board.is_fixed(cell) && board.domain(cell) == shared {
                        grouped[slot] = true;
                        members += 1;
                    }
                }
                if !(2..=8).contains(&members) || shared.len() != members {
                    continue;
                }
                for &cell in section {
                    if board.is_fixed(cell) {
                        continue;
                    }
                    let domain = board.domain(cell);
                    if domain == shared || domain.intersection(shared).is_empty() {
                        continue;
                    }
                    changed = true;
                    if let Some(digit) = board.restrict(cell, shared).single() {
                        self.fix_checked(board, cell, digit)?;
                        worklist.insert(cell);
                    }
                }
            }
            self.arc_consistency(board, worklist)?;
        }
        Ok(changed)
    }

    fn fix_checked(&self, board: &mut Board, cell: usize, digit: u8) -> Result<(), Inconsistency> {
        if board.conflicts_with(cell, digit, self.sections) {
            trace!(cell, digit, "contradiction while fixing a collapsed cell");
            return Err(Inconsistency::Contradiction { cell, digit });
        }
        board.fix(cell, digit);
        Ok(())
    }
}
