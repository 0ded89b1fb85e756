//! Relay shared state — connected clients and the snapshot store.
//!
//! DESIGN
//! ======
//! `RelayState` is injected into Axum handlers via the `State` extractor. It
//! holds the fan-out list of connected clients and the in-memory snapshot
//! store. The persistence endpoint's internal storage is deliberately just
//! memory: clients consume it purely through the save/load request contract.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::snapshot::Snapshot;

// =============================================================================
// CLIENTS
// =============================================================================

/// One connected whiteboard participant.
pub struct ClientHandle {
    pub username: String,
    /// Sender for outgoing stroke event payloads.
    pub tx: mpsc::Sender<String>,
}

// =============================================================================
// SNAPSHOT STORE
// =============================================================================

/// Stack-based store of saved whiteboard states. Saving pushes the previous
/// state onto the undo stack and clears the redo stack; undo/redo navigate
/// the save history. `None` entries represent the state before any save.
#[derive(Default)]
pub struct SnapshotStore {
    current: Option<Snapshot>,
    undo: Vec<Option<Snapshot>>,
    redo: Vec<Option<Snapshot>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly saved state as current.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo.push(self.current.take());
        self.redo.clear();
        self.current = Some(snapshot);
    }

    /// Revert to the state before the most recent save. Returns whether a
    /// state change occurred.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        self.redo.push(self.current.take());
        self.current = previous;
        true
    }

    /// Restore the most recently undone state. Returns whether a state
    /// change occurred.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(self.current.take());
        self.current = next;
        true
    }

    /// The latest stored state, if any save has happened.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }
}

// =============================================================================
// RELAY STATE
// =============================================================================

/// Shared relay state, injected into Axum handlers via the State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct RelayState {
    /// Connected clients: connection id -> outbound payload sender.
    pub clients: Arc<RwLock<HashMap<Uuid, ClientHandle>>>,
    pub snapshots: Arc<RwLock<SnapshotStore>>,
}

impl RelayState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            snapshots: Arc::new(RwLock::new(SnapshotStore::new())),
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}
