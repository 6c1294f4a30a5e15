//! The sparse board representation.
//!
//! A board stores only its live cells, so one generation step costs
//! O(L) in the live-cell count: the engine evaluates each live cell and
//! its in-bounds neighbours (at most 9L cells) and applies the rules to
//! each. Births that would land outside the bounding rectangle are
//! suppressed.
//!
//! Boards are immutable values. [`SparseBoard::next_generation`] returns
//! a fresh board; two boards compare equal iff their dimensions and live
//! sets are equal, and [`SparseBoard::fingerprint`] is a canonical
//! encoding with the same equality.

use std::collections::BTreeSet;

use lifeway_types::{Coordinate, Dimensions, Grid};

use crate::rules::next_alive;

/// A Game of Life board holding a set of live coordinates and the
/// rectangle that bounds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseBoard {
    live: BTreeSet<Coordinate>,
    dims: Dimensions,
}

impl SparseBoard {
    /// Build a board from a dense 0/1 matrix.
    ///
    /// Dimensions are taken from the outer and first-inner lengths. Any
    /// non-zero cell counts as alive. Empty input yields an empty live
    /// set; rectangularity is the repository's concern, and short rows
    /// simply contribute fewer cells.
    pub fn from_dense(grid: &Grid) -> Self {
        let rows = i64::try_from(grid.len()).unwrap_or(i64::MAX);
        let cols = i64::try_from(grid.first().map_or(0, Vec::len)).unwrap_or(i64::MAX);
        let dims = Dimensions { rows, cols };

        let live = grid
            .iter()
            .enumerate()
            .flat_map(|(r, line)| {
                line.iter().enumerate().filter_map(move |(c, &cell)| {
                    (cell != 0).then(|| {
                        Coordinate::new(
                            i64::try_from(r).unwrap_or(i64::MAX),
                            i64::try_from(c).unwrap_or(i64::MAX),
                        )
                    })
                })
            })
            .collect();

        Self { live, dims }
    }

    /// Build a board directly from `(row, col)` pairs.
    ///
    /// Duplicates collapse; pairs outside the rectangle are silently
    /// dropped. This policy is applied uniformly -- the repository only
    /// ever stores in-bounds cells, so nothing observable depends on it.
    pub fn from_pairs(pairs: &[(i64, i64)], dims: Dimensions) -> Self {
        let live = pairs
            .iter()
            .map(|&(row, col)| Coordinate::new(row, col))
            .filter(|c| c.in_bounds(dims))
            .collect();
        Self { live, dims }
    }

    /// Materialise the dense `rows x cols` matrix of 0/1 cells.
    pub fn to_dense(&self) -> Grid {
        let rows = usize::try_from(self.dims.rows).unwrap_or(0);
        let cols = usize::try_from(self.dims.cols).unwrap_or(0);
        let mut grid = vec![vec![0u8; cols]; rows];
        for cell in &self.live {
            if let (Ok(r), Ok(c)) = (usize::try_from(cell.row), usize::try_from(cell.col))
                && let Some(slot) = grid.get_mut(r).and_then(|line| line.get_mut(c))
            {
                *slot = 1;
            }
        }
        grid
    }

    /// The live-cell set as sorted `(row, col)` pairs.
    pub fn to_pairs(&self) -> Vec<(i64, i64)> {
        self.live.iter().map(|&c| (c.row, c.col)).collect()
    }

    /// The board's bounding rectangle.
    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Membership test for a single cell.
    pub fn is_alive(&self, cell: Coordinate) -> bool {
        self.live.contains(&cell)
    }

    /// Count the live, in-bounds Moore neighbours of a cell.
    pub fn count_live_neighbours(&self, cell: Coordinate) -> u8 {
        let mut count = 0;
        for n in cell.neighbours() {
            if n.in_bounds(self.dims) && self.live.contains(&n) {
                count += 1;
            }
        }
        count
    }

    /// Compute the next generation as a new board with the same bounds.
    ///
    /// The evaluation set is every live cell plus every in-bounds
    /// neighbour of a live cell; no other cell can change state. An
    /// empty board therefore steps to an empty board.
    pub fn next_generation(&self) -> Self {
        let mut evaluate: BTreeSet<Coordinate> = BTreeSet::new();
        for &cell in &self.live {
            evaluate.insert(cell);
            for n in cell.neighbours() {
                if n.in_bounds(self.dims) {
                    evaluate.insert(n);
                }
            }
        }

        let live = evaluate
            .into_iter()
            .filter(|&cell| next_alive(self.is_alive(cell), self.count_live_neighbours(cell)))
            .collect();

        Self {
            live,
            dims: self.dims,
        }
    }

    /// Canonical, order-independent encoding of the board state.
    ///
    /// The live set iterates in sorted order, so equal boards produce
    /// equal strings and unequal live sets produce unequal ones. Used
    /// for equality comparison during cycle detection only; not
    /// cryptographic.
    pub fn fingerprint(&self) -> String {
        let mut out = format!("{}|", self.dims);
        for cell in &self.live {
            out.push_str(&cell.to_string());
            out.push(';');
        }
        out
    }
}
