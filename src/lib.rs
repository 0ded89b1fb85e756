//! Core engine for a collaborative freehand whiteboard.
//!
//! Multiple users draw on a shared canvas and see each other's strokes with
//! low latency; each participant keeps local undo/redo control and can
//! persist and restore the full board. This crate is that core: the stroke
//! data model, the per-client history state machine, the reconnecting
//! pub/sub channel that disseminates strokes through a relay, the versioned
//! snapshot save/load contract, and the relay itself. Rendering surfaces and
//! tool-selection UI are external collaborators reached through injected
//! seams.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`stroke`] | Stroke wire model, in-progress buffer, tool settings |
//! | [`history`] | Local undo/redo stacks over a client's own strokes |
//! | [`sync`] | Reconnecting websocket channel to the relay |
//! | [`snapshot`] | Versioned, timestamped full-board capture |
//! | [`gateway`] | HTTP save/load client for snapshots |
//! | [`session`] | Per-client orchestration of the above |
//! | [`relay`] | The broadcast relay server and snapshot endpoints |
//! | [`config`] | Environment-backed configuration |
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use inkboard::config::SessionConfig;
//! use inkboard::gateway::SnapshotGateway;
//! use inkboard::session::{Renderer, SessionController};
//! use inkboard::stroke::Stroke;
//! use inkboard::sync::SyncChannel;
//!
//! struct Canvas;
//!
//! impl Renderer for Canvas {
//!     fn render(&mut self, _strokes: &[Stroke]) {}
//!     fn clear_canvas(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SessionConfig::from_env();
//!     let (channel, remote) = SyncChannel::connect(config.connect_url(), config.reconnect_delay);
//!     let mut session = SessionController::new(
//!         Arc::new(channel),
//!         remote,
//!         SnapshotGateway::new(config.snapshot_api_url.clone()),
//!         Box::new(Canvas),
//!     );
//!
//!     session.pointer_down(10.0, 20.0);
//!     session.pointer_move(30.0, 40.0);
//!     session.pointer_up();
//!
//!     // Apply remote strokes until the channel winds down.
//!     session.run().await;
//! }
//! ```

pub mod config;
pub mod gateway;
pub mod history;
pub mod relay;
pub mod session;
pub mod snapshot;
pub mod stroke;
pub mod sync;
