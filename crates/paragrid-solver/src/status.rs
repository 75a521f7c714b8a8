//! Grid consistency and completeness checks.

use paragrid_core::{Grid, Possibilities};

/// The status of a grid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GridStatus {
    /// Every cell is fixed and no unit holds a duplicate value.
    #[display("solved correctly")]
    SolvedCorrectly,
    /// No duplicate values, but some cells are still undecided.
    #[display("incomplete")]
    Incomplete,
    /// Two fixed cells of one unit hold the same value: at the top level
    /// this grid has no solution, at a recursive level the current hypothesis
    /// branch is invalid.
    #[display("wrong")]
    Wrong,
}

/// Computes the status of `grid`.
///
/// `Wrong` as soon as any unit holds the same value in two fixed cells;
/// otherwise `SolvedCorrectly` when every cell is fixed, `Incomplete` when
/// not.
///
/// # Examples
///
/// ```
/// use paragrid_core::{Grid, Position, Value};
/// use paragrid_solver::{GridStatus, grid_status};
///
/// let grid = Grid::new(9)?;
/// assert_eq!(grid_status(&grid), GridStatus::Incomplete);
///
/// grid.cell(Position::new(0, 0)).set_value(Value::new(3))?;
/// grid.cell(Position::new(0, 3)).set_value(Value::new(3))?;
/// assert_eq!(grid_status(&grid), GridStatus::Wrong);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn grid_status(grid: &Grid) -> GridStatus {
    for unit in grid.peers().units() {
        let mut seen = Possibilities::EMPTY;
        for &position in unit {
            if let Some(value) = grid.cell(position).value() {
                if seen.contains(value) {
                    return GridStatus::Wrong;
                }
                seen.insert(value);
            }
        }
    }

    if grid.is_complete() {
        GridStatus::SolvedCorrectly
    } else {
        GridStatus::Incomplete
    }
}
