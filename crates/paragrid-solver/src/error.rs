//! Solver error types.

use paragrid_core::{CellError, Position, Value};

/// A contradiction: evidence that the current grid state cannot lead to a
/// solution.
///
/// Contradictions are expected and recoverable. They are absorbed at the
/// no-hypothesis solver boundary, where they become
/// [`GridStatus::Wrong`](crate::GridStatus::Wrong); in the worker pool the
/// first contradiction raised is stored, all workers drain out, and the
/// orchestrating thread re-raises it exactly once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum Contradiction {
    /// A cell domain was exhausted or an assignment lost a race with a
    /// concurrent removal.
    #[display("{_0}")]
    #[from]
    Cell(CellError),
    /// Two fixed cells of one unit hold the same value.
    #[display("value {value} already fixed at peer {position}")]
    DuplicateValue {
        /// The peer already holding the value.
        position: Position,
        /// The duplicated value.
        value: Value,
    },
    /// One cell matched two or more hidden singles of the same unit, which
    /// means the grid state was already inconsistent.
    #[display("cell {position} has several unique possibilities in one unit")]
    AmbiguousSingles {
        /// The cell with multiple unique candidates.
        position: Position,
    },
}

/// Errors raised when constructing a [`GridSolver`](crate::GridSolver).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverBuildError {
    /// The worker-thread pool could not be created.
    #[display("failed to build worker pool: {_0}")]
    #[from]
    Pool(rayon::ThreadPoolBuildError),
}
