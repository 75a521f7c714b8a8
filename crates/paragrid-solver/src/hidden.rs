//! Hidden-single deduction.
//!
//! A *hidden single* is a value that can only go in one cell of a unit, even
//! when that cell's own domain still lists other candidates. Two variants are
//! provided: a per-cell finder used by the partitioned parallel scan, and a
//! whole-grid bitset scan used on the single-threaded path.

use paragrid_core::{Grid, Position, Possibilities, Value, peers::UnitKind};

use crate::{error::Contradiction, queue::FoundPositions};

/// Finds a hidden single for the cell at `position`, if any.
///
/// For each unit kind containing the position, the residual is the cell's own
/// domain minus the union of all other members' domains. Exactly one residual
/// value means the cell is the only home for that value in the unit. More
/// than one residual is not treated as an error here: it signals no
/// deduction yet, and the remaining unit kinds are still scanned.
///
/// # Examples
///
/// ```
/// use paragrid_core::{Grid, Position, Value};
/// use paragrid_solver::find_unique_possibility;
///
/// let grid = Grid::new(4)?;
/// // Candidate 1 dropped everywhere in row 1 except (1, 1).
/// for col in [0, 2, 3] {
///     grid.cell(Position::new(1, col)).remove_possibility(Value::new(1))?;
/// }
///
/// assert_eq!(
///     find_unique_possibility(&grid, Position::new(1, 1)),
///     Some(Value::new(1))
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn find_unique_possibility(grid: &Grid, position: Position) -> Option<Value> {
    let own = grid.cell(position).possibilities();

    for kind in UnitKind::ALL {
        let mut residual = own;
        for &peer in grid.peers().peers_of(position, kind) {
            residual = residual & !grid.cell(peer).possibilities();
            if residual.is_empty() {
                break;
            }
        }
        if let Some(value) = residual.single() {
            return Some(value);
        }
    }

    None
}

/// Fixes every hidden single of the grid, enqueuing the affected positions.
///
/// The whole-grid bitset scan: per unit it accumulates `seen_once` (values
/// appearing in at least one domain) and `seen_more` (values appearing in two
/// or more domains, or in a fixed cell). Their difference is the set of
/// values with exactly one possible home in the unit; each cell then claims
/// the values of that set it contains.
///
/// # Errors
///
/// Returns [`Contradiction::AmbiguousSingles`] when one cell matches two or
/// more unique values of the same unit (an inconsistency not yet surfaced as
/// a wrong status), or a cell error when an assignment loses against a
/// concurrent removal.
pub fn set_unique_possibilities(
    grid: &Grid,
    queue: &FoundPositions,
) -> Result<(), Contradiction> {
    for unit in grid.peers().units() {
        let mut seen_once = Possibilities::EMPTY;
        let mut seen_more = Possibilities::EMPTY;
        for &position in unit {
            let domain = grid.cell(position).possibilities();
            seen_more = seen_more | (seen_once & domain);
            if domain.is_single() {
                seen_more = seen_more | domain;
            }
            seen_once = seen_once | domain;
        }

        let unique = seen_once ^ seen_more;
        if unique.is_empty() {
            continue;
        }

        for &position in unit {
            let cell = grid.cell(position);
            let domain = cell.possibilities();
            if domain.is_single() {
                continue;
            }
            let matches = domain & unique;
            if matches.is_empty() {
                continue;
            }
            if let Some(value) = matches.single() {
                cell.set_value(value)?;
                queue.push(position);
            } else {
                return Err(Contradiction::AmbiguousSingles { position });
            }
        }
    }

    Ok(())
}
