//! Session controller — one client's orchestration of drawing, history,
//! sync, and rendering.
//!
//! DESIGN
//! ======
//! All board and history mutation happens through `&mut self` methods on the
//! caller's event loop: pointer events, undo/redo, remote receipt, and
//! snapshot load are serialized by construction, so no lock guards the board.
//! Locally-drawn strokes are committed to history and published to the relay
//! in the same step; remotely-received strokes are appended to the rendered
//! board only — a client can only undo its own strokes. The renderer and the
//! outbound sink are injected seams, never module-level singletons, so
//! independent sessions (and tests) cannot cross-contaminate.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::gateway::{GatewayError, SnapshotGateway};
use crate::history::HistoryManager;
use crate::stroke::{CurrentStroke, Stroke, Tool, ToolSettings};
use crate::sync::StrokeSink;

// =============================================================================
// RENDERER SEAM
// =============================================================================

/// External rendering collaborator. Receives the full ordered stroke list
/// after every board mutation and must support clearing the surface.
pub trait Renderer: Send {
    /// Draw the given strokes in exactly this order (later on top).
    fn render(&mut self, strokes: &[Stroke]);
    /// Wipe the drawing surface.
    fn clear_canvas(&mut self);
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Per-client session state and orchestration.
pub struct SessionController {
    settings: ToolSettings,
    current: Option<CurrentStroke>,
    history: HistoryManager,
    board: Vec<Stroke>,
    channel: Arc<dyn StrokeSink>,
    remote: mpsc::Receiver<Stroke>,
    gateway: SnapshotGateway,
    renderer: Box<dyn Renderer>,
}

impl SessionController {
    pub fn new(
        channel: Arc<dyn StrokeSink>,
        remote: mpsc::Receiver<Stroke>,
        gateway: SnapshotGateway,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            settings: ToolSettings::default(),
            current: None,
            history: HistoryManager::new(),
            board: Vec::new(),
            channel,
            remote,
            gateway,
            renderer,
        }
    }

    // =========================================================================
    // TOOL INPUT
    // =========================================================================

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        self.settings.line_width = line_width;
    }

    // =========================================================================
    // POINTER LIFECYCLE
    // =========================================================================

    /// Begin a stroke at the pointer-down position. An unfinished stroke in
    /// flight is discarded, matching a pointer-up the host never delivered.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.current = Some(CurrentStroke::begin(&self.settings, x, y));
    }

    /// Extend the in-progress stroke. No-op when the pointer is not down.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(current) = self.current.as_mut() {
            current.push_point(x, y);
        }
    }

    /// Finish and commit the in-progress stroke: into local history (clearing
    /// redo), onto the rendered board, and out to the relay. No-op when no
    /// stroke is in progress.
    pub fn pointer_up(&mut self) {
        let Some(current) = self.current.take() else {
            return;
        };
        let stroke = current.finish();

        self.history.commit(stroke.clone());
        self.channel.publish(&stroke);
        self.board.push(stroke);
        self.rerender();
    }

    /// The in-progress stroke, for live preview rendering.
    #[must_use]
    pub fn current_stroke(&self) -> Option<&CurrentStroke> {
        self.current.as_ref()
    }

    // =========================================================================
    // HISTORY
    // =========================================================================

    /// Undo the client's most recent own stroke. Remote strokes are untouched.
    /// Silent no-op when there is nothing to undo. Not broadcast.
    pub fn undo(&mut self) {
        let Some(stroke) = self.history.undo() else {
            return;
        };
        let id = stroke.id;
        self.board.retain(|s| s.id != id);
        self.rerender();
    }

    /// Restore the most recently undone stroke. Silent no-op when the redo
    /// stack is empty. Not broadcast.
    pub fn redo(&mut self) {
        let Some(stroke) = self.history.redo() else {
            return;
        };
        let stroke = stroke.clone();
        self.board.push(stroke);
        self.rerender();
    }

    /// Clear the board: empties the rendered state and both history stacks
    /// and wipes the canvas. Local-only — peers must clear independently.
    pub fn clear(&mut self) {
        self.current = None;
        self.board.clear();
        self.history.clear();
        self.renderer.clear_canvas();
    }

    // =========================================================================
    // REMOTE STROKES
    // =========================================================================

    /// Append one remotely-received stroke to the rendered board. It does not
    /// enter local history. Duplicate ids (at-least-once delivery) are
    /// dropped to preserve the board's unique-id invariant.
    pub fn apply_remote(&mut self, stroke: Stroke) {
        if self.insert_remote(stroke) {
            self.rerender();
        }
    }

    /// Drain every remote stroke currently queued by the sync channel,
    /// re-rendering once. Returns how many strokes were applied.
    pub fn drain_remote(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(stroke) = self.remote.try_recv() {
            if self.insert_remote(stroke) {
                applied += 1;
            }
        }
        if applied > 0 {
            self.rerender();
        }
        applied
    }

    /// Event-loop driver: await and apply remote strokes until the sync
    /// channel closes.
    pub async fn run(&mut self) {
        while let Some(stroke) = self.remote.recv().await {
            if self.insert_remote(stroke) {
                self.rerender();
            }
        }
    }

    fn insert_remote(&mut self, stroke: Stroke) -> bool {
        if self.board.iter().any(|s| s.id == stroke.id) {
            return false;
        }
        self.board.push(stroke);
        true
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    /// Save the full rendered board (own and remote strokes alike). Returns
    /// the version the save carried.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure for the user to retry; local state is
    /// untouched.
    pub async fn save(&mut self) -> Result<u32, GatewayError> {
        self.gateway.save(&self.board).await
    }

    /// Replace the entire rendered board with the latest stored snapshot.
    /// Loaded strokes bypass local history: they are not undoable unless
    /// re-committed. Returns the number of strokes loaded.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure; on error nothing is replaced.
    pub async fn load(&mut self) -> Result<usize, GatewayError> {
        let strokes = self.gateway.load().await?;
        self.board = strokes;
        self.rerender();
        Ok(self.board.len())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// The rendered board state, in z-order.
    #[must_use]
    pub fn board(&self) -> &[Stroke] {
        &self.board
    }

    /// The local undo/redo history.
    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Look up a board stroke by id.
    #[must_use]
    pub fn stroke(&self, id: &Uuid) -> Option<&Stroke> {
        self.board.iter().find(|s| s.id == *id)
    }

    fn rerender(&mut self) {
        self.renderer.render(&self.board);
    }
}
