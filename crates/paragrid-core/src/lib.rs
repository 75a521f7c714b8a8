//! Core data structures for constraint-grid puzzles.
//!
//! This crate provides the data model shared by the paragrid solver and
//! tools: values, positions, candidate bitsets, cells with atomically shared
//! domains, the grid itself, and precomputed peer groups.
//!
//! # Overview
//!
//! - [`value`]: the [`Value`] a cell can hold (`1..=grid_size`)
//! - [`position`]: 0-indexed row-major [`Position`] coordinates
//! - [`possibilities`]: the [`Possibilities`] candidate bitset with O(1)
//!   cardinality
//! - [`cell`]: a [`Cell`] owning one atomic candidate domain
//! - [`grid`]: the [`Grid`] of `grid_size²` cells, parsing and rendering
//! - [`peers`]: peer groups and units, memoized per grid size
//!
//! # Examples
//!
//! ```
//! use paragrid_core::{Grid, Position, Value};
//!
//! let grid = Grid::new(9)?;
//! let cell = grid.cell(Position::new(4, 4));
//!
//! cell.set_value(Value::new(5))?;
//! assert_eq!(cell.value(), Some(Value::new(5)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cell;
pub mod grid;
pub mod peers;
pub mod position;
pub mod possibilities;
pub mod value;

// Re-export commonly used types
pub use self::{
    cell::{Cell, CellError, RemoveOutcome},
    grid::{Grid, GridError},
    position::Position,
    possibilities::Possibilities,
    value::{MAX_GRID_SIZE, Value},
};
