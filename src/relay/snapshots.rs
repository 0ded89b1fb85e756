//! Snapshot endpoints — versioned save/load of the whole board.
//!
//! DESIGN
//! ======
//! Saving validates the client-stamped version and timestamp, then records
//! the snapshot in the store's save history. Loading returns the latest
//! stored state, or 404 before any save — clients treat both save and load
//! failures as recoverable and retry manually. Undo/redo navigate the save
//! history on the relay side without broadcasting anything: the stroke topic
//! carries stroke events only.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::relay::state::RelayState;
use crate::snapshot::Snapshot;

// =============================================================================
// SAVE / LOAD
// =============================================================================

pub async fn save_state(State(state): State<RelayState>, Json(snapshot): Json<Snapshot>) -> Response {
    if snapshot.time_stamp.is_empty() {
        warn!("rejecting snapshot without a timestamp");
        return (StatusCode::BAD_REQUEST, "Timestamp cannot be null or empty.").into_response();
    }
    if snapshot.version == 0 {
        warn!("rejecting snapshot with version 0");
        return (StatusCode::BAD_REQUEST, "Version must be greater than 0.").into_response();
    }

    info!(version = snapshot.version, strokes = snapshot.len(), "saving snapshot");
    state.snapshots.write().await.record(snapshot);
    (StatusCode::OK, "Whiteboard current state successfully saved.").into_response()
}

pub async fn load_state(State(state): State<RelayState>) -> Response {
    match state.snapshots.read().await.current() {
        Some(snapshot) => {
            info!(version = snapshot.version, strokes = snapshot.len(), "loading snapshot");
            Json(snapshot.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "No state found.").into_response(),
    }
}

/// The latest stored state without the not-found translation; `null` before
/// any save.
pub async fn current_state(State(state): State<RelayState>) -> Json<Option<Snapshot>> {
    Json(state.snapshots.read().await.current().cloned())
}

// =============================================================================
// SAVE HISTORY
// =============================================================================

pub async fn undo_state(State(state): State<RelayState>) -> &'static str {
    let changed = state.snapshots.write().await.undo();
    info!(changed, "snapshot undo");
    "Undo successful."
}

pub async fn redo_state(State(state): State<RelayState>) -> &'static str {
    let changed = state.snapshots.write().await.redo();
    info!(changed, "snapshot redo");
    "Redo successful."
}
