//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/boards` | Upload a seed, returning its fresh ID |
//! | `GET` | `/boards/{id}/next` | State one generation after the seed |
//! | `GET` | `/boards/{id}/state/{G}` | State G generations after the seed |
//! | `POST` | `/boards/{id}/final` | Initiate a final-state search, returning the websocket URL |
//!
//! Success bodies are wrapped in `{"success": true, "data": ...}`;
//! failures produce the [`ApiError`] envelope.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use lifeway_types::{BoardId, Grid};

use crate::error::ApiError;
use crate::protocol::{MAX_ATTEMPTS_LIMIT, max_attempts_in_bounds};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /boards`.
#[derive(Debug, Deserialize)]
pub struct CreateBoardBody {
    /// The dense seed matrix.
    pub board: Grid,
}

/// Body of `POST /boards/{id}/final`.
///
/// The field is optional at the serde level so that a missing or
/// negative value surfaces as a 400 with the envelope, not an
/// extractor rejection.
#[derive(Debug, Deserialize)]
pub struct FinalRequestBody {
    /// Attempt budget for the cycle detector.
    #[serde(rename = "maxAttempts")]
    pub max_attempts: Option<i64>,
}

// ---------------------------------------------------------------------------
// POST /boards -- upload a seed
// ---------------------------------------------------------------------------

/// Validate and persist an uploaded seed.
pub async fn create_board(
    State(state): State<SharedState>,
    Json(body): Json<CreateBoardBody>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = state.repo.create_board(&body.board).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": { "boardId": board_id },
        })),
    ))
}

// ---------------------------------------------------------------------------
// GET /boards/{id}/next -- next generation
// ---------------------------------------------------------------------------

/// Return the board's state one generation after the seed.
pub async fn get_next_generation(
    State(state): State<SharedState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_board_id(&id_str)?;
    let grid = state.repo.next_generation(board_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "state": grid },
    })))
}

// ---------------------------------------------------------------------------
// GET /boards/{id}/state/{G} -- state at generation G
// ---------------------------------------------------------------------------

/// Return the board's state `G` generations after the seed (`G` >= 1).
pub async fn get_state_at_generation(
    State(state): State<SharedState>,
    Path((id_str, gen_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_board_id(&id_str)?;
    let generation: u64 = gen_str.parse().map_err(|_| {
        ApiError::InvalidInput("generation must be a positive integer".to_owned())
    })?;
    if generation == 0 {
        return Err(ApiError::InvalidInput(
            "generation must be at least 1".to_owned(),
        ));
    }

    let grid = state.repo.state_at_generation(board_id, generation).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "state": grid, "generation": generation },
    })))
}

// ---------------------------------------------------------------------------
// POST /boards/{id}/final -- initiate a final-state search
// ---------------------------------------------------------------------------

/// Validate the request, confirm the board exists, and hand back the
/// websocket URL that streams the search.
pub async fn request_final_state(
    State(state): State<SharedState>,
    Path(id_str): Path<String>,
    Json(body): Json<FinalRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_board_id(&id_str)?;
    let max_attempts = body
        .max_attempts
        .and_then(|n| u64::try_from(n).ok())
        .filter(|&n| max_attempts_in_bounds(n))
        .ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "maxAttempts must be between 1 and {MAX_ATTEMPTS_LIMIT}"
            ))
        })?;

    // Confirm existence up front so the client learns about a bad ID
    // here rather than over the socket.
    state.repo.get_board(board_id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "success": true,
            "data": {
                "message": "Final state calculation initiated",
                "websocketUrl": state.websocket_url(board_id, max_attempts),
            },
        })),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a board ID from a path segment.
fn parse_board_id(s: &str) -> Result<BoardId, ApiError> {
    BoardId::parse(s)
        .map_err(|_| ApiError::InvalidInput(format!("boardId must be a UUID, got {s:?}")))
}
