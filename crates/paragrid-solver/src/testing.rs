//! Test fixtures shared by unit tests, integration tests and benches.

use paragrid_core::Grid;

/// A 9×9 puzzle with 40 givens and a unique solution.
pub const PUZZLE_40_GIVENS: &str = "
    403020600
    900345001
    001876400
    008102900
    709060108
    006708200
    002689500
    800203009
    005010302
";

/// The unique solution of [`PUZZLE_40_GIVENS`].
pub const PUZZLE_40_SOLUTION: &str = "
    483921657
    967345821
    251876493
    548132976
    729564138
    136798245
    372689514
    814253769
    695417382
";

/// Parses a fixture grid.
///
/// # Panics
///
/// Panics if `text` is not a valid grid string; fixtures are expected to be
/// well formed.
#[must_use]
pub fn grid_fixture(text: &str) -> Grid {
    text.parse().expect("fixture grid must parse")
}
