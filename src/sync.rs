//! Synchronization channel — durable-reconnecting pub/sub link to the relay.
//!
//! DESIGN
//! ======
//! `connect` spawns a background task that dials the relay and re-dials after
//! a fixed delay whenever the link drops; callers never observe individual
//! retry attempts, only delivered messages. Publishing is best-effort: when
//! the link is down the stroke is dropped and logged, never queued — the
//! local board and history stay authoritative for the sender regardless of
//! delivery. Remote strokes arrive on a bounded queue that the session's
//! event loop drains, so channel I/O never mutates shared state directly.
//!
//! LIFECYCLE
//! =========
//! 1. Dial → on failure, sleep the reconnect delay and dial again
//! 2. Connected → select over outbound publishes and inbound events
//! 3. Link drops → mark disconnected, back to 1
//! 4. Session drops its receiver → the loop winds down

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{info, warn};

use crate::stroke::Stroke;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const OUTBOUND_QUEUE: usize = 64;
const INCOMING_QUEUE: usize = 256;

// =============================================================================
// SINK SEAM
// =============================================================================

/// Outbound sink for committed strokes. The session controller holds this
/// seam so history routing can be tested without a live relay.
pub trait StrokeSink: Send + Sync {
    /// Serialize and send the stroke if the channel is connected; drop it
    /// with a logged warning otherwise. Never fails the caller.
    fn publish(&self, stroke: &Stroke);
}

// =============================================================================
// CHANNEL
// =============================================================================

/// Handle to the background relay connection.
pub struct SyncChannel {
    outbound: mpsc::Sender<String>,
    connected: Arc<AtomicBool>,
}

impl SyncChannel {
    /// Spawn the connect loop for the given relay URL. Returns the publish
    /// handle and the queue of remote strokes for the session's event loop.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn connect(url: impl Into<String>, reconnect_delay: Duration) -> (Self, mpsc::Receiver<Stroke>) {
        let (incoming_tx, incoming_rx) = mpsc::channel(INCOMING_QUEUE);
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE);
        let connected = Arc::new(AtomicBool::new(false));

        tokio::spawn(run_channel(
            url.into(),
            reconnect_delay,
            Arc::clone(&connected),
            outbound_rx,
            incoming_tx,
        ));

        (Self { outbound: outbound_tx, connected }, incoming_rx)
    }

    /// Whether the relay link is currently established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl StrokeSink for SyncChannel {
    fn publish(&self, stroke: &Stroke) {
        if !self.is_connected() {
            warn!(stroke_id = %stroke.id, "publish dropped: channel disconnected");
            return;
        }
        let json = match serde_json::to_string(stroke) {
            Ok(json) => json,
            Err(e) => {
                warn!(stroke_id = %stroke.id, error = %e, "publish dropped: serialization failed");
                return;
            }
        };
        if self.outbound.try_send(json).is_err() {
            warn!(stroke_id = %stroke.id, "publish dropped: outbound queue unavailable");
        }
    }
}

// =============================================================================
// CONNECT LOOP
// =============================================================================

async fn run_channel(
    url: String,
    reconnect_delay: Duration,
    connected: Arc<AtomicBool>,
    mut outbound: mpsc::Receiver<String>,
    incoming: mpsc::Sender<Stroke>,
) {
    loop {
        match connect_async(url.as_str()).await {
            Ok((ws, _)) => {
                info!(%url, "sync channel connected");
                connected.store(true, Ordering::SeqCst);
                run_connection(ws, &mut outbound, &incoming).await;
                connected.store(false, Ordering::SeqCst);
                warn!(%url, "sync channel disconnected");
            }
            Err(e) => {
                warn!(%url, error = %e, "sync channel connect failed");
            }
        }

        // The loop is otherwise process-lifetime; it winds down only once the
        // session has dropped its end of the stroke queue.
        if incoming.is_closed() {
            return;
        }
        tokio::time::sleep(reconnect_delay).await;
    }
}

/// Pump one established connection until it drops or the session goes away.
async fn run_connection(ws: WsStream, outbound: &mut mpsc::Receiver<String>, incoming: &mpsc::Sender<Stroke>) {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            msg = stream.next() => {
                let Some(Ok(msg)) = msg else { return };
                match msg {
                    Message::Text(text) => {
                        let Some(stroke) = decode_stroke(text.as_str()) else {
                            continue;
                        };
                        if incoming.send(stroke).await.is_err() {
                            return;
                        }
                    }
                    Message::Close(_) => return,
                    _ => {}
                }
            }
            out = outbound.recv() => {
                let Some(json) = out else { return };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    return;
                }
            }
        }
    }
}

/// Decode one wire event. Undecodable payloads are dropped and logged — they
/// never affect local state.
fn decode_stroke(text: &str) -> Option<Stroke> {
    match serde_json::from_str::<Stroke>(text) {
        Ok(stroke) => Some(stroke),
        Err(e) => {
            warn!(error = %e, "dropping undecodable stroke event");
            None
        }
    }
}
