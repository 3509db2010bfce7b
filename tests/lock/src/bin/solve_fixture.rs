//! Binary that solves the reference boards and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `solve_fixture`
//!
//! Output: key=value lines (see source for format).

use arbor_harness::runner::{solve, SolveOutcome};
use arbor_harness::worlds::puzzles::{parse_cells, DUPLICATE_GIVEN, EASY, HARD};
use arbor_harness::worlds::sudoku::SudokuWorld;
use arbor_kernel::board::Board;
use arbor_kernel::propagate::Propagator;
use arbor_kernel::sections::Sections;

fn cells(text: &str) -> [u8; 81] {
    let mut out = [0u8; 81];
    out.copy_from_slice(&parse_cells(text));
    out
}

fn print_outcome(label: &str, outcome: &SolveOutcome) {
    let report = outcome.report();
    println!("{label}_solved={}", report.solved);
    println!("{label}_depth={}", report.depth.map_or(-1, i64::from));
    println!("{label}_expansions={}", report.expansions);
    println!("{label}_nodes_created={}", report.nodes_created);
    println!("{label}_digest={}", report.board_digest.unwrap_or_default());
}

fn main() {
    let policy = SudokuWorld::policy(false);
    println!(
        "policy={}",
        policy.to_canonical_json().expect("policy serializes")
    );

    for (label, board) in [("easy", EASY), ("hard", HARD), ("duplicate", DUPLICATE_GIVEN)] {
        let outcome = solve(&cells(board), &policy).expect("solve failed");
        print_outcome(label, &outcome);
    }

    let sections = Sections::new();
    let mut board = Board::from_cells(&cells(HARD)).expect("valid board");
    let givens = board.fixed_worklist();
    Propagator::new(&sections)
        .propagate(&mut board, givens)
        .expect("hard board propagates");
    println!("hard_propagated_fingerprint={:016x}", board.fingerprint());
    println!("hard_propagated_fixed={}", board.fixed_count());
}
