//! The persisted board record.
//!
//! A record is created once when a seed is uploaded and never mutated
//! afterwards. The live-cell list is stored sparsely as `(row, col)`
//! pairs; the dense form is reconstructed on demand by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geometry::Dimensions;
use crate::ids::BoardId;

/// A write-once board record as stored in the durable backend and the
/// shared cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardRecord {
    /// The identifier minted at creation.
    pub board_id: BoardId,
    /// Sparse live-cell list as `(row, col)` pairs, all in bounds.
    pub cells: Vec<(i64, i64)>,
    /// The bounding rectangle.
    pub dimensions: Dimensions,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (equal to `created_at`; records are write-once).
    pub updated_at: DateTime<Utc>,
}

impl BoardRecord {
    /// Build a fresh record for a newly uploaded seed, stamping both
    /// timestamps with the current time.
    pub fn new(board_id: BoardId, cells: Vec<(i64, i64)>, dimensions: Dimensions) -> Self {
        let now = Utc::now();
        Self {
            board_id,
            cells,
            dimensions,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The working view of a board: identity, live cells, and bounds.
///
/// This is what the compute paths consume. It drops the persistence
/// timestamps so it can be rebuilt from any tier, including cache
/// entries that store only state and dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardSnapshot {
    /// The board's identifier.
    pub board_id: BoardId,
    /// Sparse live-cell list as `(row, col)` pairs, all in bounds.
    pub cells: Vec<(i64, i64)>,
    /// The bounding rectangle.
    pub dimensions: Dimensions,
}

impl From<&BoardRecord> for BoardSnapshot {
    fn from(record: &BoardRecord) -> Self {
        Self {
            board_id: record.board_id,
            cells: record.cells.clone(),
            dimensions: record.dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_stamps_matching_timestamps() {
        let dims = Dimensions::new(2, 2).expect("valid dims");
        let record = BoardRecord::new(BoardId::new(), vec![(0, 0), (1, 1)], dims);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.cells.len(), 2);
    }

    #[test]
    fn record_serde_round_trip() {
        let dims = Dimensions::new(3, 3).expect("valid dims");
        let record = BoardRecord::new(BoardId::new(), vec![(0, 1), (1, 1), (2, 1)], dims);
        let json = serde_json::to_string(&record).expect("serialize");
        let restored: BoardRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, record);
    }
}
