//! The solving engine: propagation to fixed point, then hypothesis search.

use log::debug;
use paragrid_core::{Grid, Position};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    error::{Contradiction, SolverBuildError},
    hidden, parallel,
    propagate::drain,
    queue::FoundPositions,
    status::{GridStatus, grid_status},
};

/// A Sudoku-family grid solver combining constraint propagation,
/// hidden-single deduction and hypothesis-based backtracking.
///
/// Propagation and the hidden-single scan run over a worker-thread pool owned
/// by the solver and reused for every solve call; hypothesis branches are
/// always explored sequentially on the calling thread. A solver built with
/// one thread skips the pool entirely and uses the single-threaded variants.
///
/// # Examples
///
/// ```
/// use paragrid_core::Grid;
/// use paragrid_solver::{GridSolver, GridStatus};
///
/// let solver = GridSolver::new(4)?;
/// let mut grid: Grid = "
///     1 2 . .
///     . . . .
///     . . 3 .
///     . . . 4
/// "
/// .parse()?;
///
/// assert_eq!(solver.solve(&mut grid), GridStatus::SolvedCorrectly);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct GridSolver {
    pool: Option<ThreadPool>,
}

impl GridSolver {
    /// Creates a solver using `thread_count` worker threads for propagation
    /// and the hidden-single scan.
    ///
    /// A count of 0 or 1 yields the single-threaded solver.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverBuildError`] if the worker pool cannot be created.
    pub fn new(thread_count: usize) -> Result<Self, SolverBuildError> {
        let pool = if thread_count > 1 {
            Some(ThreadPoolBuilder::new().num_threads(thread_count).build()?)
        } else {
            None
        };
        Ok(Self { pool })
    }

    /// Creates the single-threaded solver.
    #[must_use]
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Returns the number of worker threads this solver uses.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.pool.as_ref().map_or(1, ThreadPool::current_num_threads)
    }

    /// Solves `grid` in place.
    ///
    /// Returns [`GridStatus::SolvedCorrectly`] with every cell fixed, or
    /// [`GridStatus::Wrong`] when the grid state admits no solution (the
    /// search space is finite, so this always terminates). Grids with no
    /// pre-fixed cell are allowed; the search then starts from a bare
    /// hypothesis.
    pub fn solve(&self, grid: &mut Grid) -> GridStatus {
        let queue = FoundPositions::new();
        for cell in &*grid {
            if cell.is_fixed() {
                queue.push(cell.position());
            }
        }

        if self.solve_with_hypothesis(grid, &queue) {
            GridStatus::SolvedCorrectly
        } else {
            GridStatus::Wrong
        }
    }

    /// Propagates and deducts to a fixed point, without guessing.
    ///
    /// Alternates draining the queue through propagation with a hidden-single
    /// scan (which refills the queue) until the queue stays empty. Any
    /// contradiction is absorbed here: the queue is discarded and the result
    /// is [`GridStatus::Wrong`]. Otherwise the status reflects completeness.
    ///
    /// # Panics
    ///
    /// Panics if `queue` is empty: driving the fixed-point loop requires at
    /// least one found position.
    pub fn solve_without_hypothesis(&self, grid: &Grid, queue: &FoundPositions) -> GridStatus {
        assert!(
            !queue.is_empty(),
            "can't solve without hypothesis: no found position queued"
        );

        let result = self.propagate_to_fixed_point(grid, queue);
        match result {
            Err(contradiction) => {
                debug!("propagation stopped by contradiction: {contradiction}");
                queue.clear();
                GridStatus::Wrong
            }
            Ok(()) if grid.is_complete() => GridStatus::SolvedCorrectly,
            Ok(()) => GridStatus::Incomplete,
        }
    }

    fn propagate_to_fixed_point(
        &self,
        grid: &Grid,
        queue: &FoundPositions,
    ) -> Result<(), Contradiction> {
        while !queue.is_empty() {
            self.update_possibilities(grid, queue)?;
            self.set_unique_possibilities(grid, queue)?;
        }
        Ok(())
    }

    fn update_possibilities(
        &self,
        grid: &Grid,
        queue: &FoundPositions,
    ) -> Result<(), Contradiction> {
        match &self.pool {
            Some(pool) => parallel::remove_queued_possibilities(pool, grid, queue),
            None => drain(grid, queue),
        }
    }

    fn set_unique_possibilities(
        &self,
        grid: &Grid,
        queue: &FoundPositions,
    ) -> Result<(), Contradiction> {
        match &self.pool {
            Some(pool) => parallel::set_unique_possibilities(pool, grid, queue),
            None => hidden::set_unique_possibilities(grid, queue),
        }
    }

    /// Depth-first hypothesis search. Returns `true` once `grid` is solved,
    /// `false` when the state that entered the call admits no solution.
    fn solve_with_hypothesis(&self, grid: &mut Grid, queue: &FoundPositions) -> bool {
        // A grid without givens reaches this point with an empty queue; the
        // status is derived directly instead of violating the propagation
        // precondition.
        let status = if queue.is_empty() {
            grid_status(grid)
        } else {
            self.solve_without_hypothesis(grid, queue)
        };

        match status {
            GridStatus::SolvedCorrectly => return true,
            GridStatus::Wrong => return false,
            GridStatus::Incomplete => {}
        }

        let snapshot = grid.clone();
        let Some(position) = branch_position(grid) else {
            unreachable!("an incomplete grid always has an undecided cell");
        };
        debug!(
            "branching on {position} with {} candidates",
            grid.cell(position).possibilities().len()
        );

        loop {
            let Some(value) = grid.cell(position).possibilities().smallest() else {
                return false;
            };
            if grid.cell(position).set_value(value).is_err() {
                return false;
            }
            queue.push(position);

            if self.solve_with_hypothesis(grid, queue) {
                return true;
            }

            // The branch failed; the tried value is permanently discarded
            // from the rollback copy so sibling attempts and the parent's
            // re-entry exclude it.
            if snapshot.cell(position).possibilities().is_single() {
                return false;
            }
            if snapshot.cell(position).remove_possibility(value).is_err() {
                return false;
            }
            grid.restore_from(&snapshot);
        }
    }
}

/// Selects the undecided cell with the fewest remaining candidates, breaking
/// ties in row-major order (most-constrained-variable heuristic).
fn branch_position(grid: &Grid) -> Option<Position> {
    let mut best: Option<(usize, Position)> = None;
    for cell in grid {
        let count = cell.possibilities().len();
        if count == 1 {
            continue;
        }
        if best.is_none_or(|(fewest, _)| count < fewest) {
            best = Some((count, cell.position()));
        }
    }
    best.map(|(_, position)| position)
}
