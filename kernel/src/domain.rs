//! Candidate-domain bitmasks and the cell reprocessing worklist.
//!
//! A [`DomainMask`] uses bit `k` for digit `k` (1..=9); bit 0 is never set.
//! The [`Worklist`] is a 128-bit set of cell indices awaiting arc-consistency
//! propagation, popped lowest index first.

use std::fmt;

/// Set of still-possible digits for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DomainMask(u16);

impl DomainMask {
    /// No candidates left.
    pub const EMPTY: Self = Self(0);
    /// All nine digits possible.
    pub const ALL: Self = Self(0b11_1111_1110);

    /// Mask holding only `digit`. Digits outside 1..=9 yield [`DomainMask::EMPTY`].
    #[must_use]
    pub const fn singleton(digit: u8) -> Self {
        if digit == 0 || digit > 9 {
            return Self::EMPTY;
        }
        Self(1 << digit)
    }

    /// Build from raw bits, discarding bit 0 and anything above bit 9.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Number of remaining candidates.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, digit: u8) -> bool {
        digit != 0 && digit <= 9 && self.0 & (1 << digit) != 0
    }

    /// Lowest-numbered remaining candidate.
    #[must_use]
    pub const fn lowest(self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        // trailing_zeros of a nonzero u16 is at most 15.
        #[allow(clippy::cast_possible_truncation)]
        Some(self.0.trailing_zeros() as u8)
    }

    /// The single remaining candidate, if exactly one is left.
    #[must_use]
    pub const fn single(self) -> Option<u8> {
        if self.len() == 1 {
            self.lowest()
        } else {
            None
        }
    }

    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Remove `digit` from the mask. Returns `true` if it was present.
    pub fn remove(&mut self, digit: u8) -> bool {
        let present = self.contains(digit);
        *self = self.without(Self::singleton(digit));
        present
    }

    /// Iterate remaining candidates in ascending order.
    pub fn digits(self) -> impl Iterator<Item = u8> {
        (1..=9u8).filter(move |&d| self.contains(d))
    }
}

impl fmt::Display for DomainMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, d) in self.digits().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("}")
    }
}

/// Bitset of cell indices (0..81) waiting for arc-consistency processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Worklist(u128);

impl Worklist {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Worklist seeded with one cell.
    #[must_use]
    pub const fn single(cell: usize) -> Self {
        Self(1 << cell)
    }

    pub fn insert(&mut self, cell: usize) {
        debug_assert!(cell < 128, "cell index {cell} out of worklist range");
        self.0 |= 1 << cell;
    }

    #[must_use]
    pub const fn contains(self, cell: usize) -> bool {
        cell < 128 && self.0 & (1 << cell) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Remove and return the lowest queued cell.
    pub fn pop(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let cell = self.0.trailing_zeros() as usize;
        self.0 &= !(1 << cell);
        Some(cell)
    }
}

impl FromIterator<usize> for Worklist {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut worklist = Self::new();
        for cell in iter {
            worklist.insert(cell);
        }
        worklist
    }
}
