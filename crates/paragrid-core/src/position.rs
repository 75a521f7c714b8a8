//! Grid position representation.

use std::fmt::{self, Display};

/// A 0-indexed `(row, col)` coordinate on a grid.
///
/// Ordering is row-major (`derive`d from the field order), so sorting
/// positions yields the deterministic iteration order the solver uses for
/// "first encountered" tie-breaks.
///
/// # Examples
///
/// ```
/// use paragrid_core::Position;
///
/// let pos = Position::new(1, 3);
/// assert_eq!(pos.row(), 1);
/// assert_eq!(pos.col(), 3);
/// assert_eq!(pos.index(9), 12);
///
/// // Row-major ordering
/// assert!(Position::new(0, 8) < Position::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from row and column coordinates.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row coordinate.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column coordinate.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major cell index of this position on a grid of the
    /// given size.
    #[must_use]
    pub const fn index(self, grid_size: u8) -> usize {
        self.row as usize * grid_size as usize + self.col as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        assert_eq!(Position::new(0, 0).index(9), 0);
        assert_eq!(Position::new(0, 8).index(9), 8);
        assert_eq!(Position::new(1, 0).index(9), 9);
        assert_eq!(Position::new(8, 8).index(9), 80);
        assert_eq!(Position::new(1, 1).index(4), 5);
    }

    #[test]
    fn test_ordering_matches_index() {
        let a = Position::new(2, 7);
        let b = Position::new(3, 0);
        assert!(a < b);
        assert!(a.index(9) < b.index(9));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Position::new(4, 2)), "(4, 2)");
    }
}
