//! API error type and response envelope.
//!
//! [`ApiError`] unifies the failure modes of the REST surface into a
//! single enum whose `IntoResponse` implementation produces the
//! `{"success": false, "error": ...}` envelope. Shared-cache failures
//! never reach this type; the repository swallows them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lifeway_repo::RepoError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed: bad matrix, non-UUID id, or an
    /// out-of-range parameter.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested board does not exist.
    #[error("Board not found")]
    NotFound,

    /// The durable backend failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::InvalidInput(msg) => Self::InvalidInput(msg),
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::Backend(db) => Self::Backend(db.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Backend(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_onto_api_errors() {
        let invalid = ApiError::from(RepoError::InvalidInput("bad".to_owned()));
        assert!(matches!(invalid, ApiError::InvalidInput(_)));

        let missing = ApiError::from(RepoError::NotFound(lifeway_types::BoardId::new()));
        assert!(matches!(missing, ApiError::NotFound));
    }

    #[test]
    fn not_found_message_is_stable() {
        assert_eq!(ApiError::NotFound.to_string(), "Board not found");
    }
}
