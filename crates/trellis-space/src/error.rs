//! Error types for grid construction and lookup.

use std::fmt;

use trellis_core::Coord2;

/// Errors arising from grid construction or cell lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero rows or zero columns.
    EmptyGrid,
    /// A coordinate is outside the bounds of the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord2,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A glyph expected exactly once appears some other number of times.
    GlyphNotUnique {
        /// The glyph looked up.
        glyph: char,
        /// How many cells bear it.
        count: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            Self::CoordOutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord} out of bounds: {bounds}")
            }
            Self::GlyphNotUnique { glyph, count } => {
                write!(f, "expected exactly one '{glyph}', found {count}")
            }
        }
    }
}

impl std::error::Error for GridError {}
