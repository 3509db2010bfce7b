//! End-to-end solve acceptance tests.

use arbor_harness::runner::{solve, SolveOutcome, Unsolvable};
use arbor_harness::worlds::puzzles::{parse_cells, DUPLICATE_GIVEN, EASY_SOLUTION, HARD, HARD_SOLUTION};
use arbor_harness::worlds::sudoku::SudokuWorld;
use arbor_kernel::board::Board;
use arbor_kernel::error::Inconsistency;
use arbor_kernel::propagate::Propagator;
use arbor_kernel::sections::{Sections, CELL_COUNT};
use arbor_search::search::{search, SearchOutcome};

fn cells(text: &str) -> [u8; CELL_COUNT] {
    let mut out = [0u8; CELL_COUNT];
    out.copy_from_slice(&parse_cells(text));
    out
}

// ACCEPTANCE: a solved board comes back unchanged at depth 0
#[test]
fn solved_input_is_returned_unchanged() {
    let input = cells(EASY_SOLUTION);
    let outcome = solve(&input, &SudokuWorld::policy(false)).unwrap();
    let solved = outcome.solved().unwrap();
    assert_eq!(solved.cells, input);
    assert_eq!(solved.depth, 0);
    assert_eq!(solved.stats.expansions, 1);
}

// ACCEPTANCE: repeated digit in a row fails without touching the board
#[test]
fn duplicate_in_row_is_reported_and_board_untouched() {
    let input = cells(DUPLICATE_GIVEN);
    let outcome = solve(&input, &SudokuWorld::policy(false)).unwrap();
    assert!(matches!(
        outcome,
        SolveOutcome::Unsolvable(Unsolvable::Contradiction(Inconsistency::DuplicateGiven { .. }))
    ));
    assert_eq!(input, cells(DUPLICATE_GIVEN));
}

#[test]
fn duplicate_in_box_is_reported() {
    let mut input = [0u8; CELL_COUNT];
    input[0] = 7;
    input[20] = 7; // row 2, col 2: same box, different row and column
    let outcome = solve(&input, &SudokuWorld::policy(false)).unwrap();
    assert_eq!(
        outcome,
        SolveOutcome::Unsolvable(Unsolvable::Contradiction(Inconsistency::DuplicateGiven {
            cell: 20,
            digit: 7
        }))
    );
}

#[test]
fn contradiction_found_by_propagation_is_unsolvable() {
    // Row 0 holds 1..=7 and column 7 holds 8 and 9 lower down, leaving
    // cell 7 with no candidates.
    let mut input = [0u8; CELL_COUNT];
    for (col, digit) in (1..=7u8).enumerate() {
        input[col] = digit;
    }
    input[3 * 9 + 7] = 8;
    input[4 * 9 + 7] = 9;
    let outcome = solve(&input, &SudokuWorld::policy(false)).unwrap();
    assert!(matches!(outcome, SolveOutcome::Unsolvable(Unsolvable::Contradiction(_))));
}

// ACCEPTANCE: every section of a solved board holds 1..9 exactly once
#[test]
fn hard_board_solution_is_valid() {
    let outcome = solve(&cells(HARD), &SudokuWorld::policy(false)).unwrap();
    let solved = outcome.solved().unwrap();
    assert_eq!(solved.cells, cells(HARD_SOLUTION));
    let board = Board::from_cells(&solved.cells).unwrap();
    assert!(board.is_solved());
    assert!(board.is_valid_solution(&Sections::new()));
    assert!(solved.depth > 0);
    assert!(solved.stats.expansions > u64::from(solved.depth));
}

#[test]
fn solve_statistics_are_deterministic() {
    let policy = SudokuWorld::policy(false);
    let first = solve(&cells(HARD), &policy).unwrap();
    for _ in 0..3 {
        assert_eq!(solve(&cells(HARD), &policy).unwrap(), first);
    }
}

#[test]
fn guess_path_replays_to_the_solution() {
    let sections = Sections::new();
    let mut start = Board::from_cells(&cells(HARD)).unwrap();
    let givens = start.fixed_worklist();
    Propagator::new(&sections).propagate(&mut start, givens).unwrap();

    let world = SudokuWorld::with_sections(sections.clone(), start.clone()).unwrap();
    let SearchOutcome::Found(solution) = search(&world, &SudokuWorld::policy(false)).unwrap() else {
        panic!("hard board has a solution");
    };
    let path = solution.path();
    assert_eq!(path.len(), solution.depth() as usize + 1);
    for pair in path.windows(2) {
        let decision = *pair[1].action().unwrap();
        // Each child agrees with its parent wherever the parent was fixed and
        // has the guessed digit in place.
        for cell in 0..CELL_COUNT {
            if pair[0].state().is_fixed(cell) {
                assert_eq!(pair[1].state().cell(cell), pair[0].state().cell(cell));
            }
        }
        assert_eq!(pair[1].state().cell(decision.cell), decision.digit);
    }
    let solved = cells(HARD_SOLUTION);
    assert_eq!(solution.goal_state().cells(), &solved);
    assert_eq!(solution.release().unwrap(), 0);
}
