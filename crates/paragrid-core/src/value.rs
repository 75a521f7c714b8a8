//! Cell value representation.

use std::fmt::{self, Display};

/// The largest supported grid size.
///
/// Candidate sets are stored in a single 32-bit word, so the largest usable
/// size is 25 (the largest perfect square with at most 32 values).
pub const MAX_GRID_SIZE: u8 = 25;

/// A value a cell can hold, in the range `1..=grid_size`.
///
/// Values are not tied to a particular grid size at the type level; the grid
/// they belong to bounds them at construction time. `Value` only enforces the
/// global bound of [`MAX_GRID_SIZE`].
///
/// # Examples
///
/// ```
/// use paragrid_core::Value;
///
/// let value = Value::new(7);
/// assert_eq!(value.get(), 7);
/// assert_eq!(format!("{value}"), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(u8);

impl Value {
    /// Creates a value from its numeric representation.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range `1..=MAX_GRID_SIZE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paragrid_core::Value;
    ///
    /// assert_eq!(Value::new(1).get(), 1);
    /// assert_eq!(Value::new(25).get(), 25);
    /// ```
    ///
    /// ```should_panic
    /// use paragrid_core::Value;
    ///
    /// // This will panic
    /// let _ = Value::new(0);
    /// ```
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!(
            (1..=MAX_GRID_SIZE).contains(&value),
            "Value must be between 1 and {MAX_GRID_SIZE}, got {value}"
        );
        Self(value)
    }

    /// Returns the numeric representation of this value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the single-bit mask of this value inside a candidate bitset.
    ///
    /// Value `v` occupies bit `v - 1`.
    #[must_use]
    pub(crate) const fn bit(self) -> u32 {
        1 << (self.0 - 1)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Value> for u8 {
    fn from(value: Value) -> u8 {
        value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for v in 1..=MAX_GRID_SIZE {
            assert_eq!(Value::new(v).get(), v);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Value::new(1) < Value::new(2));
        assert!(Value::new(9) < Value::new(10));
    }

    #[test]
    fn test_bit_positions() {
        assert_eq!(Value::new(1).bit(), 0b1);
        assert_eq!(Value::new(4).bit(), 0b1000);
        assert_eq!(Value::new(25).bit(), 1 << 24);
    }

    #[test]
    #[should_panic(expected = "Value must be between 1 and 25, got 0")]
    fn test_zero_panics() {
        let _ = Value::new(0);
    }

    #[test]
    #[should_panic(expected = "Value must be between 1 and 25, got 26")]
    fn test_too_large_panics() {
        let _ = Value::new(26);
    }
}
