//! Solving engine for constraint-grid puzzles.
//!
//! The engine combines three layers:
//!
//! 1. **Propagation** ([`propagate`], [`drain`]): a newly fixed value is
//!    removed from the domains of its row, column and block peers; peers
//!    collapsing to a single candidate cascade through a shared
//!    [`FoundPositions`] queue.
//! 2. **Hidden-single deduction** ([`find_unique_possibility`],
//!    [`set_unique_possibilities`]): when propagation stalls, values with
//!    only one possible home in a unit are fixed, refilling the queue.
//! 3. **Hypothesis search** ([`GridSolver`]): when deduction alone stalls,
//!    the solver snapshots the grid, guesses the most constrained cell and
//!    backtracks on contradiction.
//!
//! The first two layers optionally fan out over a worker-thread pool owned
//! by the solver; the search itself is strictly sequential.
//!
//! # Examples
//!
//! ```
//! use paragrid_core::Grid;
//! use paragrid_solver::{GridSolver, GridStatus, testing};
//!
//! let solver = GridSolver::new(2)?;
//! let mut grid: Grid = testing::PUZZLE_40_GIVENS.parse()?;
//!
//! assert_eq!(solver.solve(&mut grid), GridStatus::SolvedCorrectly);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod hidden;
mod parallel;
mod propagate;
mod queue;
mod solver;
mod status;
pub mod testing;

pub use self::{
    error::{Contradiction, SolverBuildError},
    hidden::{find_unique_possibility, set_unique_possibilities},
    propagate::{drain, propagate},
    queue::FoundPositions,
    solver::GridSolver,
    status::{GridStatus, grid_status},
};
