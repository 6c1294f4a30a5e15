//! Cell coordinates and board bounds.
//!
//! A [`Coordinate`] is an ordered `(row, col)` pair of signed integers
//! with a canonical string form `"row,col"`. [`Dimensions`] describes the
//! inclusive rectangle `[0, rows) x [0, cols)` that bounds a board; cells
//! outside the rectangle never exist.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The position of a single cell on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Row index (signed; may be negative for out-of-bounds neighbours).
    pub row: i64,
    /// Column index.
    pub col: i64,
}

/// The eight Moore-neighbourhood offsets, `{-1,0,1}^2` minus the origin.
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Coordinate {
    /// Create a coordinate from a `(row, col)` pair.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The eight Moore-neighbourhood cells adjacent to this one.
    ///
    /// Neighbours are produced regardless of any board bounds; callers
    /// filter with [`Coordinate::in_bounds`] where needed.
    pub fn neighbours(self) -> [Self; 8] {
        NEIGHBOUR_OFFSETS.map(|(dr, dc)| Self::new(self.row + dr, self.col + dc))
    }

    /// Whether this coordinate lies within the given bounds.
    pub const fn in_bounds(self, dims: Dimensions) -> bool {
        self.row >= 0 && self.row < dims.rows && self.col >= 0 && self.col < dims.cols
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error parsing the canonical `"row,col"` coordinate form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid coordinate {0:?}: expected \"row,col\"")]
pub struct ParseCoordinateError(pub String);

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordinateError(s.to_owned()))?;
        let row = row
            .parse::<i64>()
            .map_err(|_| ParseCoordinateError(s.to_owned()))?;
        let col = col
            .parse::<i64>()
            .map_err(|_| ParseCoordinateError(s.to_owned()))?;
        Ok(Self { row, col })
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (i64, i64) {
    fn from(c: Coordinate) -> Self {
        (c.row, c.col)
    }
}

/// The `rows x cols` rectangle bounding a board. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Dimensions {
    /// Number of rows.
    pub rows: i64,
    /// Number of columns.
    pub cols: i64,
}

impl Dimensions {
    /// Create validated dimensions. Returns `None` unless both sides are
    /// at least 1.
    pub const fn new(rows: i64, cols: i64) -> Option<Self> {
        if rows >= 1 && cols >= 1 {
            Some(Self { rows, cols })
        } else {
            None
        }
    }

    /// Whether the given coordinate lies within this rectangle.
    pub const fn contains(self, cell: Coordinate) -> bool {
        cell.in_bounds(self)
    }
}

impl core::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
