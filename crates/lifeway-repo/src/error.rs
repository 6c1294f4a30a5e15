//! Repository error type.
//!
//! Expected failures surface as explicit variants; shared-cache errors
//! never appear here -- the repository degrades to the durable backend
//! and logs them at `warn`.

use lifeway_db::DbError;
use lifeway_types::{BoardId, GridError};

/// Errors surfaced by the board repository.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A caller-supplied parameter or payload was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested board does not exist in the durable backend.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The durable backend failed.
    #[error("backend error: {0}")]
    Backend(#[from] DbError),
}

impl From<GridError> for RepoError {
    fn from(e: GridError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}
