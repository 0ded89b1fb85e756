//! WebSocket relay — fans stroke events out to every other participant.
//!
//! DESIGN
//! ======
//! On upgrade, the connection is registered in the shared client map and a
//! `select!` loop begins:
//! - Inbound text frames are validated as stroke events and forwarded to all
//!   peers, sender excluded. Undecodable payloads are dropped and logged —
//!   they never reach peers and never tear down the connection.
//! - Payloads queued by peer broadcasts are written back to the socket.
//!
//! The raw payload text is forwarded rather than a re-serialization, so any
//! extra fields a newer client sends survive the hop. Delivery is
//! best-effort: a peer with a full queue is skipped, and no ordering is
//! coordinated across clients.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade (`?username=` optional) → register in the fan-out list
//! 2. Stroke events in → validate → forward to peers
//! 3. Close or socket error → deregister

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;

use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::relay::state::{ClientHandle, RelayState};
use crate::stroke::Stroke;

const CLIENT_QUEUE: usize = 256;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(
    State(state): State<RelayState>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    let username = params
        .get("username")
        .cloned()
        .unwrap_or_else(|| "Unknown user".to_owned());
    ws.on_upgrade(move |socket| run_ws(socket, state, username))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: RelayState, username: String) {
    let client_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::channel::<String>(CLIENT_QUEUE);

    state
        .clients
        .write()
        .await
        .insert(client_id, ClientHandle { username: username.clone(), tx });
    info!(%client_id, username, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        relay_stroke_event(&state, client_id, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            out = rx.recv() => {
                let Some(payload) = out else { break };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    state.clients.write().await.remove(&client_id);
    info!(%client_id, username, "ws: client disconnected");
}

// =============================================================================
// FAN-OUT
// =============================================================================

/// Validate one inbound payload as a stroke event and forward it to every
/// connected client except the sender. Returns how many peers it reached.
/// Separated from the socket loop so dispatch is testable without a live
/// websocket.
pub(crate) async fn relay_stroke_event(state: &RelayState, sender: Uuid, text: &str) -> usize {
    let stroke: Stroke = match serde_json::from_str(text) {
        Ok(stroke) => stroke,
        Err(e) => {
            warn!(%sender, error = %e, "ws: dropping invalid stroke event");
            return 0;
        }
    };
    info!(%sender, stroke_id = %stroke.id, shape = ?stroke.shape, points = stroke.point_count(), "ws: relaying stroke");

    let clients = state.clients.read().await;
    let mut forwarded = 0;
    for (client_id, client) in clients.iter() {
        if *client_id == sender {
            continue;
        }
        // Best-effort: skip peers whose queue is full.
        if client.tx.try_send(text.to_owned()).is_ok() {
            forwarded += 1;
        }
    }
    forwarded
}
