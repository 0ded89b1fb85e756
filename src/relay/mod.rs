//! Relay — the broadcast intermediary shared by all whiteboard clients.
//!
//! SYSTEM CONTEXT
//! ==============
//! The relay owns the only shared mutable resource in the system: the fan-out
//! list of subscribers. Clients publish stroke events to the `/whiteboard`
//! websocket topic and the relay forwards each one to every other subscriber;
//! the snapshot endpoints under `/api/whiteboard` persist and serve full
//! board states. No client state lives here.

pub mod snapshots;
pub mod state;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::state::RelayState;

/// Assemble the relay router: the stroke topic plus snapshot persistence.
pub fn app(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/whiteboard", get(ws::handle_ws))
        .route("/api/whiteboard/save", post(snapshots::save_state))
        .route("/api/whiteboard/load", get(snapshots::load_state))
        .route("/api/whiteboard/currentState", get(snapshots::current_state))
        .route("/api/whiteboard/undo", post(snapshots::undo_state))
        .route("/api/whiteboard/redo", post(snapshots::redo_state))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
