//! The 27 fixed sections of a 9×9 board and per-cell peer tables.
//!
//! Built once by [`Sections::new`] and passed by reference to everything
//! that needs it. Nothing here is lazily initialized.

/// Cells on a board.
pub const CELL_COUNT: usize = 81;
/// Rows, columns, and boxes.
pub const SECTION_COUNT: usize = 27;
/// Cells per section.
pub const SECTION_LEN: usize = 9;
/// Positions visited when propagating from one cell: its row, column, and box.
/// The cell itself appears three times and is skipped by callers.
pub const PEER_SLOTS: usize = 27;

/// Nine cell indices forming one row, column, or box.
pub type Section = [usize; SECTION_LEN];

/// Immutable section and peer tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    /// Rows 0..9, then columns 9..18, then boxes 18..27 (row-major box order).
    sections: [Section; SECTION_COUNT],
    /// Row, column, and box positions of every cell, in that order.
    peers: [[usize; PEER_SLOTS]; CELL_COUNT],
}

impl Sections {
    #[must_use]
    pub fn new() -> Self {
        let mut sections = [[0usize; SECTION_LEN]; SECTION_COUNT];

        for (row, section) in sections[..9].iter_mut().enumerate() {
            for (col, slot) in section.iter_mut().enumerate() {
                *slot = row * 9 + col;
            }
        }
        for (col, section) in sections[9..18].iter_mut().enumerate() {
            for (row, slot) in section.iter_mut().enumerate() {
                *slot = row * 9 + col;
            }
        }
        for (b, section) in sections[18..].iter_mut().enumerate() {
            let top_left = (b / 3) * 27 + (b % 3) * 3;
            for (k, slot) in section.iter_mut().enumerate() {
                *slot = top_left + (k / 3) * 9 + k % 3;
            }
        }

        let mut peers = [[0usize; PEER_SLOTS]; CELL_COUNT];
        for (cell, slots) in peers.iter_mut().enumerate() {
            for (part, &s) in Self::indices_of(cell).iter().enumerate() {
                slots[part * SECTION_LEN..(part + 1) * SECTION_LEN]
                    .copy_from_slice(&sections[s]);
            }
        }

        Self { sections, peers }
    }

    /// Section indices (row, column, box) containing `cell`.
    #[must_use]
    pub const fn indices_of(cell: usize) -> [usize; 3] {
        let row = cell / 9;
        let col = cell % 9;
        [row, 9 + col, 18 + (row / 3) * 3 + col / 3]
    }

    #[must_use]
    pub fn section(&self, index: usize) -> &Section {
        &self.sections[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Row, column, and box cells of `cell` (27 slots, including `cell` itself).
    #[must_use]
    pub fn peers(&self, cell: usize) -> &[usize; PEER_SLOTS] {
        &self.peers[cell]
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::new()
    }
}
