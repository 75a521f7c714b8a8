//! Peer-group precomputation.
//!
//! For every position of a grid the solver repeatedly needs the other cells
//! of its row, column and block, their deduplicated union, and the full list
//! of units. All of these are pure functions of the grid size, so they are
//! computed once per distinct size and cached process-wide.
//!
//! # Examples
//!
//! ```
//! use paragrid_core::{Position, peers::{UnitKind, related_positions}};
//!
//! let peers = related_positions(9);
//! let pos = Position::new(0, 0);
//!
//! assert_eq!(peers.peers_of(pos, UnitKind::Row).len(), 8);
//! assert_eq!(peers.all_peers_of(pos).len(), 20);
//! assert_eq!(peers.units().len(), 27);
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
};

use crate::position::Position;

/// The three kinds of unit a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// The position's row.
    Row,
    /// The position's column.
    Column,
    /// The position's block (the `√grid_size × √grid_size` box).
    Block,
}

impl UnitKind {
    /// All unit kinds, in the order units are laid out in
    /// [`RelatedPositions::units`].
    pub const ALL: [Self; 3] = [Self::Row, Self::Column, Self::Block];
}

/// Precomputed peer groups and units for one grid size.
///
/// Per position: the three peer groups (each `grid_size − 1` positions,
/// excluding the position itself) and their deduplicated union in row-major
/// order. Per grid: the `3 · grid_size` units (rows, then columns, then
/// blocks), each holding `grid_size` positions including every member.
#[derive(Debug)]
pub struct RelatedPositions {
    grid_size: u8,
    rows: Vec<Vec<Position>>,
    columns: Vec<Vec<Position>>,
    blocks: Vec<Vec<Position>>,
    all: Vec<Vec<Position>>,
    units: Vec<Vec<Position>>,
}

impl RelatedPositions {
    fn compute(grid_size: u8, block_size: u8) -> Self {
        let cell_count = usize::from(grid_size) * usize::from(grid_size);
        let mut rows = Vec::with_capacity(cell_count);
        let mut columns = Vec::with_capacity(cell_count);
        let mut blocks = Vec::with_capacity(cell_count);
        let mut all = Vec::with_capacity(cell_count);

        for row in 0..grid_size {
            for col in 0..grid_size {
                let pos = Position::new(row, col);
                let row_peers: Vec<_> = (0..grid_size)
                    .map(|c| Position::new(row, c))
                    .filter(|&p| p != pos)
                    .collect();
                let col_peers: Vec<_> = (0..grid_size)
                    .map(|r| Position::new(r, col))
                    .filter(|&p| p != pos)
                    .collect();
                let block_peers: Vec<_> = block_positions(row / block_size, col / block_size, block_size)
                    .filter(|&p| p != pos)
                    .collect();

                let mut union: Vec<_> = row_peers
                    .iter()
                    .chain(&col_peers)
                    .chain(&block_peers)
                    .copied()
                    .collect();
                union.sort_unstable();
                union.dedup();

                rows.push(row_peers);
                columns.push(col_peers);
                blocks.push(block_peers);
                all.push(union);
            }
        }

        let mut units = Vec::with_capacity(3 * usize::from(grid_size));
        for row in 0..grid_size {
            units.push((0..grid_size).map(|c| Position::new(row, c)).collect());
        }
        for col in 0..grid_size {
            units.push((0..grid_size).map(|r| Position::new(r, col)).collect());
        }
        for block_row in 0..block_size {
            for block_col in 0..block_size {
                units.push(block_positions(block_row, block_col, block_size).collect());
            }
        }

        Self {
            grid_size,
            rows,
            columns,
            blocks,
            all,
            units,
        }
    }

    /// Returns the grid size these groups were computed for.
    #[must_use]
    pub const fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// Returns the peers of `position` within one unit kind, excluding the
    /// position itself.
    #[must_use]
    pub fn peers_of(&self, position: Position, kind: UnitKind) -> &[Position] {
        let index = position.index(self.grid_size);
        match kind {
            UnitKind::Row => &self.rows[index],
            UnitKind::Column => &self.columns[index],
            UnitKind::Block => &self.blocks[index],
        }
    }

    /// Returns the deduplicated union of all three peer groups of `position`,
    /// in row-major order, excluding the position itself.
    #[must_use]
    pub fn all_peers_of(&self, position: Position) -> &[Position] {
        &self.all[position.index(self.grid_size)]
    }

    /// Returns every unit of the grid: `grid_size` rows, then `grid_size`
    /// columns, then `grid_size` blocks.
    #[must_use]
    pub fn units(&self) -> &[Vec<Position>] {
        &self.units
    }
}

fn block_positions(
    block_row: u8,
    block_col: u8,
    block_size: u8,
) -> impl Iterator<Item = Position> {
    let base_row = block_row * block_size;
    let base_col = block_col * block_size;
    (0..block_size).flat_map(move |r| {
        (0..block_size).map(move |c| Position::new(base_row + r, base_col + c))
    })
}

/// Returns the peer groups for `grid_size`, computing them on first use and
/// reusing the cached copy afterwards.
///
/// # Panics
///
/// Panics if `grid_size` is not a valid grid size (below 4, above
/// [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE), or not a perfect square).
/// [`Grid::new`](crate::Grid::new) validates sizes before reaching this
/// point.
#[must_use]
pub fn related_positions(grid_size: u8) -> Arc<RelatedPositions> {
    static CACHE: OnceLock<Mutex<HashMap<u8, Arc<RelatedPositions>>>> = OnceLock::new();

    let block_size = crate::grid::block_size(grid_size)
        .unwrap_or_else(|err| panic!("invalid grid size: {err}"));

    let mut cache = CACHE
        .get_or_init(Mutex::default)
        .lock()
        .expect("peer-group cache poisoned");
    Arc::clone(
        cache
            .entry(grid_size)
            .or_insert_with(|| Arc::new(RelatedPositions::compute(grid_size, block_size))),
    )
}
