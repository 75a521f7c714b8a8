//! Reference puzzle construction for the benchmark driver.

use paragrid_core::{Grid, GridError, Position, Value};
use rand::Rng;

/// Builds a canonically solved grid of the given size.
///
/// Cell `(row, col)` holds `(row·block + row/block + col) mod grid_size + 1`,
/// a shifted-band pattern that satisfies every row, column and block
/// constraint for any valid grid size.
///
/// # Errors
///
/// Returns a [`GridError`] for invalid grid sizes.
pub fn canonical_solution(grid_size: u8) -> Result<Grid, GridError> {
    let grid = Grid::new(grid_size)?;
    let block = grid.block_size();
    for row in 0..grid_size {
        for col in 0..grid_size {
            let value = (row * block + row / block + col) % grid_size + 1;
            grid.cell(Position::new(row, col))
                .set_value(Value::new(value))
                .expect("fresh cells hold the full candidate set");
        }
    }
    Ok(grid)
}

/// Builds a puzzle by keeping `givens` randomly chosen cells of the
/// canonical solution and clearing the rest.
///
/// The puzzle is always solvable (the canonical solution completes it) but
/// not necessarily uniquely when few givens are kept.
///
/// # Errors
///
/// Returns a [`GridError`] for invalid grid sizes.
pub fn random_puzzle<R: Rng>(
    grid_size: u8,
    givens: usize,
    rng: &mut R,
) -> Result<Grid, GridError> {
    let solution = canonical_solution(grid_size)?;
    let puzzle = Grid::new(grid_size)?;

    let cell_count = puzzle.cells().len();
    let kept = rand::seq::index::sample(rng, cell_count, givens.min(cell_count));
    for index in kept {
        let position = puzzle.cells()[index].position();
        let value = solution
            .cell(position)
            .value()
            .expect("canonical solution is complete");
        puzzle
            .cell(position)
            .set_value(value)
            .expect("fresh cells hold the full candidate set");
    }
    Ok(puzzle)
}

#[cfg(test)]
mod tests {
    use paragrid_solver::{GridStatus, grid_status};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_canonical_solution_is_valid() {
        for size in [4, 9, 16, 25] {
            let grid = canonical_solution(size).unwrap();
            assert_eq!(grid_status(&grid), GridStatus::SolvedCorrectly, "size {size}");
        }
    }

    #[test]
    fn test_random_puzzle_keeps_requested_givens() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let puzzle = random_puzzle(9, 40, &mut rng).unwrap();

        let fixed = puzzle.iter().filter(|cell| cell.is_fixed()).count();
        assert_eq!(fixed, 40);
        assert_ne!(grid_status(&puzzle), GridStatus::Wrong);
    }

    #[test]
    fn test_random_puzzle_agrees_with_solution() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let puzzle = random_puzzle(9, 30, &mut rng).unwrap();
        let solution = canonical_solution(9).unwrap();

        for cell in &puzzle {
            if let Some(value) = cell.value() {
                assert_eq!(solution.cell(cell.position()).value(), Some(value));
            }
        }
    }
}
