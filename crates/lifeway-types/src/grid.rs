//! Dense wire-format grids and their validation.
//!
//! Clients upload and receive boards as dense 2-D matrices of 0/1 cells.
//! [`validate_grid`] is the single rectangularity check used at the
//! repository boundary; the sparse engine itself tolerates anything.

use crate::geometry::Dimensions;

/// A dense 2-D matrix of cells: `0` dead, `1` alive.
pub type Grid = Vec<Vec<u8>>;

/// Rejection reasons for an uploaded dense grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// The matrix has no rows or no columns.
    #[error("board must have at least one row and one column")]
    Empty,

    /// An inner row's length differs from the first row's.
    #[error("board rows must all have the same length (row {row} has {found}, expected {expected})")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length found at that row.
        found: usize,
        /// Expected length (from row 0).
        expected: usize,
    },

    /// A cell holds a value other than 0 or 1.
    #[error("cell ({row},{col}) must be 0 or 1, found {value}")]
    BadCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: u8,
    },
}

/// Validate a dense grid: non-empty, rectangular, all cells 0 or 1.
///
/// Returns the board's [`Dimensions`] on success.
///
/// # Errors
///
/// Returns a [`GridError`] naming the first violation found.
pub fn validate_grid(grid: &Grid) -> Result<Dimensions, GridError> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    let dims =
        i64::try_from(rows)
            .ok()
            .zip(i64::try_from(cols).ok())
            .and_then(|(r, c)| Dimensions::new(r, c))
            .ok_or(GridError::Empty)?;

    for (r, line) in grid.iter().enumerate() {
        if line.len() != cols {
            return Err(GridError::Ragged {
                row: r,
                found: line.len(),
                expected: cols,
            });
        }
        for (c, &value) in line.iter().enumerate() {
            if value > 1 {
                return Err(GridError::BadCell {
                    row: r,
                    col: c,
                    value,
                });
            }
        }
    }

    Ok(dims)
}
