//! End-to-end solving scenarios across worker-thread counts.

use paragrid_core::Grid;
use paragrid_solver::{
    GridSolver, GridStatus, grid_status,
    testing::{PUZZLE_40_GIVENS, PUZZLE_40_SOLUTION, grid_fixture},
};

#[test]
fn test_solves_40_given_puzzle_at_every_thread_count() {
    let reference = grid_fixture(PUZZLE_40_SOLUTION);

    for threads in 1..=5 {
        let solver = GridSolver::new(threads).unwrap();
        let mut grid = grid_fixture(PUZZLE_40_GIVENS);

        assert_eq!(
            solver.solve(&mut grid),
            GridStatus::SolvedCorrectly,
            "thread count {threads}"
        );
        assert_eq!(grid, reference, "thread count {threads}");
    }
}

#[test]
fn test_conflicting_given_terminates_wrong_at_every_thread_count() {
    // Turn the given 4 at (0, 0) into a 6, clashing with the given 6 at
    // (0, 6).
    let corrupted = PUZZLE_40_GIVENS.replacen('4', "6", 1);
    assert_ne!(corrupted, PUZZLE_40_GIVENS);

    for threads in 1..=5 {
        let solver = GridSolver::new(threads).unwrap();
        let mut grid: Grid = corrupted.parse().unwrap();

        assert_eq!(
            solver.solve(&mut grid),
            GridStatus::Wrong,
            "thread count {threads}"
        );
    }
}

#[test]
fn test_solved_grid_has_no_duplicate_peers() {
    let solver = GridSolver::sequential();
    let mut grid = grid_fixture(PUZZLE_40_GIVENS);
    solver.solve(&mut grid);

    for cell in &grid {
        let value = cell.value().expect("solved grid is complete");
        for &peer in grid.peers().all_peers_of(cell.position()) {
            assert_ne!(grid.cell(peer).value(), Some(value));
        }
    }
}

#[test]
fn test_sparse_puzzle_requires_hypotheses() {
    // Too few givens for pure propagation; forces the backtracking layer.
    let mut grid = grid_fixture(
        "
            .........
            .....3.85
            ..1.2....
            ...5.7...
            ..4...1..
            .9.......
            5......73
            ..2.1....
            ....4...9
        ",
    );
    let solver = GridSolver::new(3).unwrap();

    assert_eq!(solver.solve(&mut grid), GridStatus::SolvedCorrectly);
    assert_eq!(grid_status(&grid), GridStatus::SolvedCorrectly);
}

#[test]
fn test_four_by_four_round_trip() {
    let solver = GridSolver::sequential();
    let mut grid = grid_fixture(
        "
            1 . . .
            . . 3 .
            . 1 . .
            . . . 2
        ",
    );

    assert_eq!(solver.solve(&mut grid), GridStatus::SolvedCorrectly);
    assert_eq!(grid_status(&grid), GridStatus::SolvedCorrectly);
}
