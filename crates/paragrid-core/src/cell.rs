//! A single grid cell and its atomically shared candidate domain.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{position::Position, possibilities::Possibilities, value::Value};

/// Errors raised by cell domain mutation.
///
/// Both variants are recoverable contradictions from the solver's point of
/// view: they mean the current grid state (or hypothesis branch) cannot lead
/// to a solution, not that the caller misused the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CellError {
    /// Removing a candidate left the cell with no candidate at all.
    #[display("domain exhausted at {position}")]
    DomainExhausted {
        /// The cell whose domain became empty.
        position: Position,
    },
    /// A value was assigned that is no longer a candidate of the cell.
    #[display("value {value} is not a candidate of cell {position}")]
    InvalidAssignment {
        /// The cell the assignment targeted.
        position: Position,
        /// The rejected value.
        value: Value,
    },
}

/// Outcome of a successful candidate removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The value was not a candidate; nothing changed.
    Unchanged,
    /// The value was removed; more than one candidate remains.
    Removed,
    /// The removal left exactly one candidate: the cell just became fixed.
    ///
    /// Under concurrent removals the atomic previous word guarantees exactly
    /// one caller observes this transition, so a newly fixed cell is enqueued
    /// for propagation exactly once.
    BecameFixed,
}

/// A cell: an immutable [`Position`] plus a candidate domain.
///
/// The domain is a single `AtomicU32` holding a [`Possibilities`] bitset,
/// which lets propagation workers mutate peer cells through a shared `&Grid`
/// without per-cell locks. A cell is *fixed* once exactly one candidate
/// remains.
///
/// # Examples
///
/// ```
/// use paragrid_core::{Cell, Position, Value};
///
/// let cell = Cell::new(Position::new(0, 0), 9);
/// assert!(!cell.is_fixed());
///
/// cell.set_value(Value::new(4))?;
/// assert_eq!(cell.value(), Some(Value::new(4)));
/// # Ok::<(), paragrid_core::CellError>(())
/// ```
#[derive(Debug)]
pub struct Cell {
    position: Position,
    domain: AtomicU32,
}

impl Cell {
    /// Creates a cell at `position` with the full candidate set for
    /// `grid_size`.
    ///
    /// # Panics
    ///
    /// Panics if `grid_size` exceeds [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE).
    #[must_use]
    pub fn new(position: Position, grid_size: u8) -> Self {
        Self {
            position,
            domain: AtomicU32::new(Possibilities::all(grid_size).bits()),
        }
    }

    /// Returns this cell's position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns a snapshot of the current candidate set.
    ///
    /// Under concurrent mutation the snapshot is a consistent single-word
    /// read; it may be stale by the time the caller inspects it.
    #[must_use]
    pub fn possibilities(&self) -> Possibilities {
        Possibilities::from_bits(self.domain.load(Ordering::Acquire))
    }

    /// Returns the cell's value if it is fixed, `None` otherwise.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.possibilities().single()
    }

    /// Returns `true` if exactly one candidate remains.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.possibilities().is_single()
    }

    /// Removes `value` from the domain. Removal of an absent value is an
    /// idempotent no-op reported as [`RemoveOutcome::Unchanged`].
    ///
    /// This is the sole emptiness-detection point: a removal that leaves the
    /// domain empty fails with [`CellError::DomainExhausted`].
    ///
    /// # Errors
    ///
    /// Returns [`CellError::DomainExhausted`] if the removal left no
    /// candidate.
    pub fn remove_possibility(&self, value: Value) -> Result<RemoveOutcome, CellError> {
        let before =
            Possibilities::from_bits(self.domain.fetch_and(!value.bit(), Ordering::AcqRel));
        let mut after = before;
        after.remove(value);

        if after.is_empty() {
            return Err(CellError::DomainExhausted {
                position: self.position,
            });
        }
        if after == before {
            Ok(RemoveOutcome::Unchanged)
        } else if after.is_single() {
            Ok(RemoveOutcome::BecameFixed)
        } else {
            Ok(RemoveOutcome::Removed)
        }
    }

    /// Collapses the domain to `{value}`.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidAssignment`] if `value` is not currently a
    /// candidate. Under a concurrent removal that races the assignment the
    /// compare-and-swap retries, so a lost race surfaces as this error rather
    /// than silent corruption.
    pub fn set_value(&self, value: Value) -> Result<(), CellError> {
        let bit = value.bit();
        let mut current = self.domain.load(Ordering::Acquire);
        loop {
            if current & bit == 0 {
                return Err(CellError::InvalidAssignment {
                    position: self.position,
                    value,
                });
            }
            match self
                .domain
                .compare_exchange_weak(current, bit, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    /// Overwrites the domain with a snapshot, used when restoring a grid from
    /// a rollback copy.
    pub(crate) fn restore(&self, possibilities: Possibilities) {
        self.domain.store(possibilities.bits(), Ordering::Release);
    }
}

impl Clone for Cell {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            domain: AtomicU32::new(self.possibilities().bits()),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.possibilities() == other.possibilities()
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> Cell {
        Cell::new(Position::new(1, 1), 9)
    }

    #[test]
    fn test_starts_with_full_domain() {
        let cell = cell();
        assert_eq!(cell.possibilities().len(), 9);
        assert!(!cell.is_fixed());
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let cell = cell();
        cell.set_value(Value::new(7)).unwrap();
        assert_eq!(cell.value(), Some(Value::new(7)));
        assert_eq!(cell.possibilities().len(), 1);
    }

    #[test]
    fn test_set_value_rejects_removed_candidate() {
        let cell = cell();
        cell.remove_possibility(Value::new(3)).unwrap();
        assert_eq!(
            cell.set_value(Value::new(3)),
            Err(CellError::InvalidAssignment {
                position: Position::new(1, 1),
                value: Value::new(3),
            })
        );
    }

    #[test]
    fn test_remove_reports_transition_to_fixed() {
        let cell = Cell::new(Position::new(0, 0), 4);
        assert_eq!(
            cell.remove_possibility(Value::new(1)).unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(
            cell.remove_possibility(Value::new(1)).unwrap(),
            RemoveOutcome::Unchanged
        );
        assert_eq!(
            cell.remove_possibility(Value::new(2)).unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(
            cell.remove_possibility(Value::new(3)).unwrap(),
            RemoveOutcome::BecameFixed
        );
        assert_eq!(cell.value(), Some(Value::new(4)));
    }

    #[test]
    fn test_removing_last_candidate_is_a_contradiction() {
        let cell = Cell::new(Position::new(2, 3), 4);
        cell.set_value(Value::new(2)).unwrap();
        assert_eq!(
            cell.remove_possibility(Value::new(2)),
            Err(CellError::DomainExhausted {
                position: Position::new(2, 3),
            })
        );
    }
}
