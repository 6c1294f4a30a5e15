//! Axum router construction.
//!
//! Assembles the REST routes and the `WebSocket` endpoint into a single
//! [`Router`] with CORS middleware enabled for cross-origin dashboard
//! access and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::SharedState;
use crate::ws;

/// Build the complete Axum router.
///
/// - `POST /boards` -- upload a seed
/// - `GET /boards/{id}/next` -- next generation
/// - `GET /boards/{id}/state/{generation}` -- state at a generation
/// - `POST /boards/{id}/final` -- initiate a final-state search
/// - `GET /ws` -- streaming session
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // REST API
        .route("/boards", post(handlers::create_board))
        .route("/boards/{id}/next", get(handlers::get_next_generation))
        .route(
            "/boards/{id}/state/{generation}",
            get(handlers::get_state_at_generation),
        )
        .route("/boards/{id}/final", post(handlers::request_final_state))
        // WebSocket
        .route("/ws", get(ws::ws_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
