//! Candidate set for a single cell.
//!
//! This module provides [`Possibilities`], a fixed-width bitset over the
//! values `1..=grid_size`. Bit `v - 1` of the backing word is set when value
//! `v` is still a candidate. Cardinality is O(1) through a precomputed
//! byte-wise popcount table.
//!
//! # Examples
//!
//! ```
//! use paragrid_core::{Possibilities, Value};
//!
//! let mut candidates = Possibilities::all(4);
//! candidates.remove(Value::new(2));
//! candidates.remove(Value::new(4));
//! candidates.remove(Value::new(1));
//!
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates.single(), Some(Value::new(3)));
//! ```

use std::{
    fmt::{self, Debug},
    iter::FusedIterator,
    ops::{BitAnd, BitOr, BitXor, Not},
};

use crate::value::{MAX_GRID_SIZE, Value};

/// Number of set bits for every possible byte, built once at compile time.
const POPCOUNT: [u8; 256] = {
    let mut table = [0_u8; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = table[i / 2] + (i % 2) as u8;
        i += 1;
    }
    table
};

/// A set of candidate [`Value`]s, backed by a single 32-bit word.
///
/// The set itself carries no grid size; [`Possibilities::all`] bounds the
/// initial contents and removal only ever shrinks the set. An empty set is
/// representable but never a legal stable state for a cell; emptiness is
/// detected (and rejected) by [`Cell::remove_possibility`].
///
/// [`Cell::remove_possibility`]: crate::Cell::remove_possibility
///
/// # Examples
///
/// ```
/// use paragrid_core::{Possibilities, Value};
///
/// let a = Possibilities::all(9);
/// assert_eq!(a.len(), 9);
/// assert!(a.contains(Value::new(5)));
///
/// // Set operators
/// let b = Possibilities::from_iter([1, 2, 3].map(Value::new));
/// let c = Possibilities::from_iter([2, 3, 4].map(Value::new));
/// assert_eq!(b & c, Possibilities::from_iter([2, 3].map(Value::new)));
/// assert_eq!((b | c).len(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Possibilities(u32);

impl Possibilities {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates the full candidate set `{1, ..., grid_size}`.
    ///
    /// # Panics
    ///
    /// Panics if `grid_size` exceeds [`MAX_GRID_SIZE`].
    #[must_use]
    pub fn all(grid_size: u8) -> Self {
        assert!(
            grid_size <= MAX_GRID_SIZE,
            "grid size {grid_size} exceeds maximum {MAX_GRID_SIZE}"
        );
        Self((1_u32 << grid_size) - 1)
    }

    /// Reconstructs a set from its raw bit representation.
    #[must_use]
    pub(crate) const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub(crate) const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if `value` is still a candidate.
    #[must_use]
    pub const fn contains(self, value: Value) -> bool {
        self.0 & value.bit() != 0
    }

    /// Removes `value` from the set. Removing an absent value is a no-op.
    pub const fn remove(&mut self, value: Value) {
        self.0 &= !value.bit();
    }

    /// Inserts `value` into the set.
    pub const fn insert(&mut self, value: Value) {
        self.0 |= value.bit();
    }

    /// Returns the number of candidates left.
    ///
    /// O(1): four lookups in the precomputed byte popcount table.
    #[must_use]
    pub fn len(self) -> usize {
        self.0
            .to_le_bytes()
            .iter()
            .map(|&byte| usize::from(POPCOUNT[usize::from(byte)]))
            .sum()
    }

    /// Returns `true` if no candidate is left.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if exactly one candidate is left.
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Returns the sole remaining candidate, or `None` if the set does not
    /// have exactly one member.
    #[must_use]
    pub fn single(self) -> Option<Value> {
        self.is_single().then(|| self.smallest_unchecked())
    }

    /// Returns the smallest candidate, or `None` if the set is empty.
    #[must_use]
    pub fn smallest(self) -> Option<Value> {
        (!self.is_empty()).then(|| self.smallest_unchecked())
    }

    /// Returns an iterator over the candidates in ascending order.
    pub fn iter(self) -> Iter {
        Iter(self)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn smallest_unchecked(self) -> Value {
        Value::new(self.0.trailing_zeros() as u8 + 1)
    }
}

impl BitAnd for Possibilities {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Possibilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Possibilities {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for Possibilities {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl FromIterator<Value> for Possibilities {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for Possibilities {
    type Item = Value;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self)
    }
}

/// Iterator over the candidates of a [`Possibilities`] set, ascending.
#[derive(Debug, Clone)]
pub struct Iter(Possibilities);

impl Iterator for Iter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.0.smallest()?;
        self.0.remove(value);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.len();
        (len, Some(len))
    }
}

impl FusedIterator for Iter {}
impl ExactSizeIterator for Iter {}

impl Debug for Possibilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
