//! The streaming session: one cycle-detector run per `WebSocket`.
//!
//! A client dials `GET /ws?boardId=<uuid>&maxAttempts=<int>`. The
//! session loads the board, runs the detector on a blocking worker, and
//! forwards progress frames in generation order, finishing with exactly
//! one `final` frame before a normal close. The detector is decoupled
//! from socket I/O by a bounded channel so a slow client applies
//! back-pressure instead of losing frames.
//!
//! Close codes: 1000 after `final`, 1008 for invalid parameters or an
//! unknown board, 1011 for unexpected failures.

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use lifeway_engine::{EngineError, SparseBoard, run_detection};
use lifeway_repo::RepoError;
use lifeway_types::BoardId;

use crate::protocol::{MAX_ATTEMPTS_LIMIT, SessionFrame, max_attempts_in_bounds};
use crate::state::{AppState, SharedState};

/// Progress frames buffered between the detector worker and the socket.
/// When full, the worker blocks until the client drains.
const PROGRESS_BUFFER: usize = 64;

/// Raw query parameters of a session request. Both are optional here so
/// that a missing value reaches the session as a policy violation
/// instead of an opaque extractor rejection.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// The board to evolve.
    #[serde(rename = "boardId")]
    pub board_id: Option<String>,
    /// Attempt budget for the detector.
    #[serde(rename = "maxAttempts")]
    pub max_attempts: Option<String>,
}

/// Upgrade an HTTP request to a `WebSocket` session.
///
/// # Route
///
/// `GET /ws?boardId=<uuid>&maxAttempts=<int>`
pub async fn ws_session(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state, params))
}

/// Handle the session lifecycle: validate, load, run, finish, close.
async fn handle_session(mut socket: WebSocket, state: Arc<AppState>, params: WsParams) {
    let (board_id, max_attempts) = match parse_params(&params) {
        Ok(parsed) => parsed,
        Err(message) => {
            debug!(%message, "Rejecting session parameters");
            fail(&mut socket, close_code::POLICY, &message).await;
            return;
        }
    };

    let snapshot = match state.repo.get_board(board_id).await {
        Ok(snapshot) => snapshot,
        Err(RepoError::NotFound(_)) => {
            fail(&mut socket, close_code::POLICY, "Board not found").await;
            return;
        }
        Err(e) => {
            warn!(%board_id, error = %e, "Board load failed for session");
            fail(&mut socket, close_code::ERROR, "Internal server error").await;
            return;
        }
    };

    let board = SparseBoard::from_pairs(&snapshot.cells, snapshot.dimensions);
    run_streaming(socket, board, board_id, max_attempts).await;
}

/// Drive the detector and forward its frames until the run or the
/// client ends the session.
async fn run_streaming(
    mut socket: WebSocket,
    board: SparseBoard,
    board_id: BoardId,
    max_attempts: u64,
) {
    let (tx, mut rx) = mpsc::channel::<SessionFrame>(PROGRESS_BUFFER);

    // The detector is CPU-bound; run it off the async executor. The
    // callback blocks on the channel, so a slow client throttles the
    // computation instead of dropping frames.
    let worker = tokio::task::spawn_blocking(move || {
        run_detection(&board, max_attempts, |generation, grid| {
            tx.blocking_send(SessionFrame::Progress {
                generation,
                state: grid.clone(),
            })
            .map_err(|_| EngineError::Cancelled("progress channel closed".to_owned()))
        })
    });

    let mut client_gone = false;
    loop {
        tokio::select! {
            frame = rx.recv() => {
                match frame {
                    Some(frame) => {
                        if send_frame(&mut socket, &frame).await.is_err() {
                            debug!(%board_id, "Client disconnected mid-stream");
                            client_gone = true;
                            break;
                        }
                    }
                    // Worker dropped its sender: the run is over.
                    None => break,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%board_id, "Client closed the session");
                        client_gone = true;
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            client_gone = true;
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%board_id, error = %e, "Socket error");
                        client_gone = true;
                        break;
                    }
                    _ => {
                        // Ignore client text/binary chatter.
                    }
                }
            }
        }
    }

    // Closing the receiver cancels the worker cooperatively at its next
    // progress send; nothing is written after the socket closes.
    drop(rx);

    match worker.await {
        Ok(Ok(outcome)) => {
            if client_gone {
                return;
            }
            debug!(%board_id, generation = outcome.generation(), "Detection finished");
            if send_frame(&mut socket, &SessionFrame::from(outcome)).await.is_ok() {
                close(&mut socket, close_code::NORMAL, "Calculation complete").await;
            }
        }
        Ok(Err(EngineError::Cancelled(_))) => {
            // Client went away mid-run; there is no one to tell.
        }
        Ok(Err(e)) => {
            warn!(%board_id, error = %e, "Detection failed");
            if !client_gone {
                fail(&mut socket, close_code::ERROR, &e.to_string()).await;
            }
        }
        Err(join_error) => {
            warn!(%board_id, error = %join_error, "Detection worker panicked");
            if !client_gone {
                fail(&mut socket, close_code::ERROR, "Internal server error").await;
            }
        }
    }
}

/// Validate the raw query parameters into a board ID and an attempt
/// budget.
fn parse_params(params: &WsParams) -> Result<(BoardId, u64), String> {
    let raw_id = params
        .board_id
        .as_deref()
        .ok_or_else(|| "boardId query parameter is required".to_owned())?;
    let board_id = BoardId::parse(raw_id)
        .map_err(|_| format!("boardId must be a UUID, got {raw_id:?}"))?;

    let raw_attempts = params
        .max_attempts
        .as_deref()
        .ok_or_else(|| "maxAttempts query parameter is required".to_owned())?;
    let max_attempts: u64 = raw_attempts
        .parse()
        .map_err(|_| format!("maxAttempts must be a positive integer, got {raw_attempts:?}"))?;
    if !max_attempts_in_bounds(max_attempts) {
        return Err(format!(
            "maxAttempts must be between 1 and {MAX_ATTEMPTS_LIMIT}"
        ));
    }

    Ok((board_id, max_attempts))
}

/// Serialize and send one frame as a text message.
async fn send_frame(socket: &mut WebSocket, frame: &SessionFrame) -> Result<(), ()> {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize session frame");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// Emit an error frame, then close with the given code.
async fn fail(socket: &mut WebSocket, code: u16, message: &str) {
    let _ = send_frame(
        socket,
        &SessionFrame::Error {
            error: message.to_owned(),
        },
    )
    .await;
    close(socket, code, message).await;
}

/// Send a close frame; the client may already be gone, which is fine.
async fn close(socket: &mut WebSocket, code: u16, reason: &str) {
    let _ = socket
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: reason.to_owned().into(),
        })))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(board_id: Option<&str>, max_attempts: Option<&str>) -> WsParams {
        WsParams {
            board_id: board_id.map(str::to_owned),
            max_attempts: max_attempts.map(str::to_owned),
        }
    }

    #[test]
    fn valid_parameters_parse() {
        let id = BoardId::new();
        let parsed = parse_params(&params(Some(&id.to_string()), Some("50")));
        assert_eq!(parsed.ok(), Some((id, 50)));
    }

    #[test]
    fn missing_parameters_are_policy_violations() {
        assert!(parse_params(&params(None, Some("5"))).is_err());
        assert!(parse_params(&params(Some("not-a-uuid"), None)).is_err());
    }

    #[test]
    fn malformed_parameters_are_rejected() {
        let id = BoardId::new().to_string();
        assert!(parse_params(&params(Some("garbage"), Some("5"))).is_err());
        assert!(parse_params(&params(Some(&id), Some("zero"))).is_err());
        assert!(parse_params(&params(Some(&id), Some("-3"))).is_err());
    }

    #[test]
    fn attempt_bounds_are_enforced() {
        let id = BoardId::new().to_string();
        assert!(parse_params(&params(Some(&id), Some("0"))).is_err());
        assert!(parse_params(&params(Some(&id), Some("100001"))).is_err());
        assert!(parse_params(&params(Some(&id), Some("100000"))).is_ok());
    }
}
