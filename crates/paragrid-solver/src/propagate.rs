//! Constraint propagation: removing a fixed value from its peers.

use paragrid_core::{Grid, Position, RemoveOutcome};

use crate::{error::Contradiction, queue::FoundPositions};

/// Propagates the value of the fixed cell at `position` to all of its peers.
///
/// Peers are split into already-fixed and not-yet-fixed from domain
/// snapshots. A fixed peer holding the same value is a
/// [`Contradiction::DuplicateValue`]; every unfixed peer gets the value
/// removed from its domain (which may exhaust it), and peers that become
/// fixed by that removal are pushed onto `queue` for further propagation.
///
/// # Errors
///
/// Returns a [`Contradiction`] when a peer already holds the propagated value
/// or a peer domain is exhausted by the removal.
///
/// # Panics
///
/// Panics if the cell at `position` has no value. Correct callers only
/// propagate from positions that were just fixed.
pub fn propagate(
    grid: &Grid,
    position: Position,
    queue: &FoundPositions,
) -> Result<(), Contradiction> {
    let value = grid
        .cell(position)
        .value()
        .unwrap_or_else(|| panic!("can't propagate from {position}: cell has no value"));

    let peers = grid.peers().all_peers_of(position);
    let snapshots: Vec<_> = peers
        .iter()
        .map(|&peer| (peer, grid.cell(peer).possibilities().single()))
        .collect();

    for &(peer, fixed) in &snapshots {
        if fixed == Some(value) {
            return Err(Contradiction::DuplicateValue {
                position: peer,
                value,
            });
        }
    }

    for &(peer, fixed) in &snapshots {
        if fixed.is_some() {
            continue;
        }
        if grid.cell(peer).remove_possibility(value)? == RemoveOutcome::BecameFixed {
            queue.push(peer);
        }
    }

    Ok(())
}

/// Pops and propagates queued positions until the queue is empty.
///
/// The single-threaded work-queue drain. The first contradiction aborts the
/// whole drain and discards the remaining queue; it is not resumed.
///
/// # Errors
///
/// Returns the first [`Contradiction`] hit by any propagation step.
pub fn drain(grid: &Grid, queue: &FoundPositions) -> Result<(), Contradiction> {
    while let Some(position) = queue.try_pop() {
        if let Err(contradiction) = propagate(grid, position, queue) {
            queue.clear();
            return Err(contradiction);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use paragrid_core::{CellError, Value};

    use super::*;

    fn fixed(grid: &Grid, row: u8, col: u8, value: u8) {
        grid.cell(Position::new(row, col))
            .set_value(Value::new(value))
            .unwrap();
    }

    #[test]
    fn test_removes_value_from_all_peers() {
        let grid = Grid::new(9).unwrap();
        let queue = FoundPositions::new();
        fixed(&grid, 4, 4, 7);

        propagate(&grid, Position::new(4, 4), &queue).unwrap();

        for &peer in grid.peers().all_peers_of(Position::new(4, 4)) {
            assert!(!grid.cell(peer).possibilities().contains(Value::new(7)));
        }
        // Unrelated cell untouched
        assert!(
            grid.cell(Position::new(8, 0))
                .possibilities()
                .contains(Value::new(7))
        );
    }

    #[test]
    fn test_enqueues_peer_that_becomes_fixed() {
        let grid = Grid::new(4).unwrap();
        let queue = FoundPositions::new();

        // Narrow (0, 1) down to {3, 4}, then fix 3 next to it.
        let neighbour = grid.cell(Position::new(0, 1));
        neighbour.remove_possibility(Value::new(1)).unwrap();
        neighbour.remove_possibility(Value::new(2)).unwrap();
        fixed(&grid, 0, 0, 3);

        propagate(&grid, Position::new(0, 0), &queue).unwrap();

        assert_eq!(neighbour.value(), Some(Value::new(4)));
        assert_eq!(queue.try_pop(), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_duplicate_fixed_peer_is_a_contradiction() {
        let grid = Grid::new(9).unwrap();
        let queue = FoundPositions::new();
        fixed(&grid, 0, 0, 5);
        fixed(&grid, 0, 7, 5);

        assert_eq!(
            propagate(&grid, Position::new(0, 0), &queue),
            Err(Contradiction::DuplicateValue {
                position: Position::new(0, 7),
                value: Value::new(5),
            })
        );
    }

    #[test]
    fn test_exhausted_peer_is_a_contradiction() {
        let grid = Grid::new(4).unwrap();
        let queue = FoundPositions::new();

        // (0, 1) can only hold 2; fixing 2 at (0, 0) empties it.
        for candidate in [1, 3, 4] {
            grid.cell(Position::new(0, 1))
                .remove_possibility(Value::new(candidate))
                .unwrap();
        }
        fixed(&grid, 0, 0, 2);

        assert_eq!(
            propagate(&grid, Position::new(0, 0), &queue),
            Err(Contradiction::Cell(CellError::DomainExhausted {
                position: Position::new(0, 1),
            }))
        );
    }

    #[test]
    #[should_panic(expected = "cell has no value")]
    fn test_propagating_an_unset_cell_panics() {
        let grid = Grid::new(9).unwrap();
        let queue = FoundPositions::new();
        let _ = propagate(&grid, Position::new(0, 0), &queue);
    }

    #[test]
    fn test_drain_cascades_until_empty() {
        let grid: Grid = "
            1 2 3 .
            . . . .
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        let queue = FoundPositions::new();
        for cell in &grid {
            if cell.is_fixed() {
                queue.push(cell.position());
            }
        }

        drain(&grid, &queue).unwrap();

        // (0, 3) is forced to 4 by the cascade.
        assert_eq!(grid.cell(Position::new(0, 3)).value(), Some(Value::new(4)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_discards_queue_on_contradiction() {
        let grid = Grid::new(9).unwrap();
        let queue = FoundPositions::new();
        fixed(&grid, 0, 0, 5);
        fixed(&grid, 0, 7, 5);
        queue.push(Position::new(0, 0));
        queue.push(Position::new(0, 7));

        assert!(drain(&grid, &queue).is_err());
        assert!(queue.is_empty());
    }
}
