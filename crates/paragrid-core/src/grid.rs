//! The puzzle grid.

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::Arc,
};

use crate::{
    cell::Cell,
    peers::{RelatedPositions, related_positions},
    position::Position,
    value::{MAX_GRID_SIZE, Value},
};

/// Errors raised when constructing or parsing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The requested grid size is below the minimum of 4.
    #[display("grid size {size} is too small, minimum is 4")]
    SizeTooSmall {
        /// The rejected size.
        size: u8,
    },
    /// The requested grid size exceeds [`MAX_GRID_SIZE`].
    #[display("grid size {size} is too large, maximum is {MAX_GRID_SIZE}")]
    SizeTooLarge {
        /// The rejected size.
        size: u8,
    },
    /// The requested grid size is not a perfect square, so no block size can
    /// be derived from it.
    #[display("can't deduce block size from grid size {size}")]
    SizeNotSquare {
        /// The rejected size.
        size: u8,
    },
    /// A grid string did not contain a supported number of cells.
    #[display("grid string holds {cells} cells, expected 16 or 81")]
    UnsupportedCellCount {
        /// The number of significant characters found.
        cells: usize,
    },
    /// A grid string contained a character that is neither a digit nor an
    /// empty-cell marker.
    #[display("unexpected character {character:?} in grid string")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
    },
    /// A grid string contained a digit above the grid size.
    #[display("value {value} is out of range for a grid of size {size}")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The grid size derived from the string length.
        size: u8,
    },
}

/// Derives the block size of a grid, validating the grid size.
///
/// # Errors
///
/// Returns a [`GridError`] if `grid_size` is below 4, above
/// [`MAX_GRID_SIZE`], or not a perfect square.
pub(crate) fn block_size(grid_size: u8) -> Result<u8, GridError> {
    if grid_size < 4 {
        return Err(GridError::SizeTooSmall { size: grid_size });
    }
    if grid_size > MAX_GRID_SIZE {
        return Err(GridError::SizeTooLarge { size: grid_size });
    }
    let root = (1..=grid_size).find(|&b| b * b >= grid_size).unwrap_or(1);
    if root * root != grid_size {
        return Err(GridError::SizeNotSquare { size: grid_size });
    }
    Ok(root)
}

/// A square puzzle grid of `grid_size²` [`Cell`]s in row-major order.
///
/// The grid size and block size are immutable for the grid's lifetime. Cell
/// domains use interior mutability (atomics), so solving mutates cells
/// through a shared `&Grid`; `&mut` access is only needed for wholesale
/// restoration from a rollback snapshot.
///
/// Cloning a grid deep-copies every cell domain, which is how hypothesis
/// snapshots are taken.
///
/// # Examples
///
/// ```
/// use paragrid_core::{Grid, Position, Value};
///
/// let grid = Grid::new(9)?;
/// assert_eq!(grid.grid_size(), 9);
/// assert_eq!(grid.block_size(), 3);
///
/// grid.cell(Position::new(0, 0)).set_value(Value::new(5))?;
/// let snapshot = grid.clone();
/// assert_eq!(grid, snapshot);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Box<[Cell]>,
    grid_size: u8,
    block_size: u8,
    peers: Arc<RelatedPositions>,
}

impl Grid {
    /// Creates an empty grid (every cell holding the full candidate set).
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if `grid_size` is below 4, above
    /// [`MAX_GRID_SIZE`], or not a perfect square.
    pub fn new(grid_size: u8) -> Result<Self, GridError> {
        let block_size = block_size(grid_size)?;
        let cells = (0..grid_size)
            .flat_map(|row| (0..grid_size).map(move |col| Position::new(row, col)))
            .map(|position| Cell::new(position, grid_size))
            .collect();
        Ok(Self {
            cells,
            grid_size,
            block_size,
            peers: related_positions(grid_size),
        })
    }

    /// Returns the grid size (values run `1..=grid_size`).
    #[must_use]
    pub const fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// Returns the block size (`√grid_size`).
    #[must_use]
    pub const fn block_size(&self) -> u8 {
        self.block_size
    }

    /// Returns the precomputed peer groups for this grid's size.
    #[must_use]
    pub fn peers(&self) -> &RelatedPositions {
        &self.peers
    }

    /// Returns the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> &Cell {
        assert!(
            position.row() < self.grid_size && position.col() < self.grid_size,
            "position {position} outside grid of size {}",
            self.grid_size
        );
        &self.cells[position.index(self.grid_size)]
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Returns `true` if every cell is fixed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_fixed)
    }

    /// Overwrites every cell domain with the domains of `snapshot`.
    ///
    /// # Panics
    ///
    /// Panics if `snapshot` has a different grid size.
    pub fn restore_from(&mut self, snapshot: &Self) {
        assert_eq!(
            self.grid_size, snapshot.grid_size,
            "restoring from a snapshot of a different grid size"
        );
        for (cell, source) in self.cells.iter().zip(snapshot.cells.iter()) {
            cell.restore(source.possibilities());
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.grid_size == other.grid_size && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = if self.grid_size > 9 { 2 } else { 1 };
        for row in 0..self.grid_size {
            if row % self.block_size == 0 {
                write_rule(f, self.grid_size, self.block_size, width)?;
            }
            for col in 0..self.grid_size {
                if col % self.block_size == 0 {
                    write!(f, "|")?;
                }
                match self.cell(Position::new(row, col)).value() {
                    Some(value) => write!(f, "{value:>width$} ")?,
                    None => write!(f, "{:>width$} ", '*')?,
                }
            }
            writeln!(f, "|")?;
        }
        write_rule(f, self.grid_size, self.block_size, width)
    }
}

fn write_rule(
    f: &mut fmt::Formatter<'_>,
    grid_size: u8,
    block_size: u8,
    width: usize,
) -> fmt::Result {
    for col in 0..grid_size {
        if col % block_size == 0 {
            write!(f, "+")?;
        }
        write!(f, "{:-<1$}", "", width + 1)?;
    }
    writeln!(f, "+")
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses a grid from a digit string.
    ///
    /// Whitespace is ignored. `1`-`9` are cell values; `0`, `.`, `*` and `_`
    /// mark empty cells. The grid size is derived from the number of
    /// significant characters: 16 cells give a 4×4 grid, 81 a 9×9 grid.
    fn from_str(s: &str) -> Result<Self, GridError> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let grid_size = match symbols.len() {
            16 => 4,
            81 => 9,
            cells => return Err(GridError::UnsupportedCellCount { cells }),
        };

        let grid = Self::new(grid_size)?;
        for (index, &character) in symbols.iter().enumerate() {
            let value = match character {
                '0' | '.' | '*' | '_' => continue,
                '1'..='9' => character as u8 - b'0',
                _ => return Err(GridError::UnexpectedCharacter { character }),
            };
            if value > grid_size {
                return Err(GridError::ValueOutOfRange {
                    value,
                    size: grid_size,
                });
            }
            #[expect(clippy::cast_possible_truncation)]
            let position = Position::new(
                (index / usize::from(grid_size)) as u8,
                (index % usize::from(grid_size)) as u8,
            );
            grid.cell(position)
                .set_value(Value::new(value))
                .expect("fresh cells hold the full candidate set");
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_sizes() {
        assert_eq!(Grid::new(3).unwrap_err(), GridError::SizeTooSmall { size: 3 });
        assert_eq!(Grid::new(8).unwrap_err(), GridError::SizeNotSquare { size: 8 });
        assert_eq!(
            Grid::new(36).unwrap_err(),
            GridError::SizeTooLarge { size: 36 }
        );
    }

    #[test]
    fn test_block_size_derivation() {
        assert_eq!(Grid::new(4).unwrap().block_size(), 2);
        assert_eq!(Grid::new(9).unwrap().block_size(), 3);
        assert_eq!(Grid::new(16).unwrap().block_size(), 4);
        assert_eq!(Grid::new(25).unwrap().block_size(), 5);
    }

    #[test]
    fn test_clone_is_a_deep_copy() {
        let grid = Grid::new(4).unwrap();
        let snapshot = grid.clone();
        grid.cell(Position::new(0, 0)).set_value(Value::new(1)).unwrap();

        assert_ne!(grid, snapshot);
        assert_eq!(snapshot.cell(Position::new(0, 0)).value(), None);
    }

    #[test]
    fn test_restore_from_snapshot() {
        let mut grid = Grid::new(4).unwrap();
        let snapshot = grid.clone();
        grid.cell(Position::new(1, 1)).set_value(Value::new(3)).unwrap();

        grid.restore_from(&snapshot);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_parse_round_trip() {
        let grid: Grid = "
            1 2 . .
            . . . .
            . . 3 .
            . . . 4
        "
        .parse()
        .unwrap();

        assert_eq!(grid.grid_size(), 4);
        assert_eq!(grid.cell(Position::new(0, 0)).value(), Some(Value::new(1)));
        assert_eq!(grid.cell(Position::new(0, 1)).value(), Some(Value::new(2)));
        assert_eq!(grid.cell(Position::new(2, 2)).value(), Some(Value::new(3)));
        assert_eq!(grid.cell(Position::new(3, 3)).value(), Some(Value::new(4)));
        assert_eq!(grid.cell(Position::new(1, 0)).value(), None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "123".parse::<Grid>().unwrap_err(),
            GridError::UnsupportedCellCount { cells: 3 }
        );
        assert_eq!(
            "12x. .... .... ....".parse::<Grid>().unwrap_err(),
            GridError::UnexpectedCharacter { character: 'x' }
        );
        assert_eq!(
            "125. .... .... ....".parse::<Grid>().unwrap_err(),
            GridError::ValueOutOfRange { value: 5, size: 4 }
        );
    }

    #[test]
    fn test_display_marks_unset_cells() {
        let grid = Grid::new(4).unwrap();
        grid.cell(Position::new(0, 0)).set_value(Value::new(2)).unwrap();
        let rendered = grid.to_string();

        assert!(rendered.contains('2'));
        assert!(rendered.contains('*'));
        assert!(rendered.contains("+----+----+"));
    }
}
