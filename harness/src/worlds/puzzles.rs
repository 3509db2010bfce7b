//! Reference boards shared by tests, the fixture binary, and benchmarks.
//!
//! Each board is 81 digits in row-major order, `0` for a blank.

/// Solved by propagation alone.
pub const EASY: &str = "003020600900305001001806400008102900700000008006708200002609500800203009005010300";
pub const EASY_SOLUTION: &str = "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

/// Needs branching.
pub const HARD: &str = "800000000003600000070090200050007000000045700000100030001000068008500010090000400";
pub const HARD_SOLUTION: &str = "812753649943682175675491283154237896369845721287169534521974368438526917796318452";

/// Row 0 repeats the 4 given in its first two cells.
pub const DUPLICATE_GIVEN: &str = "443020600900305001001806400008102900700000008006708200002609500800203009005010300";

/// Digits of a compact board string. Non-digit bytes are skipped.
#[must_use]
pub fn parse_cells(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}
