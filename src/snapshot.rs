//! Snapshot — a versioned, timestamped full capture of a board.
//!
//! DESIGN
//! ======
//! The wire shape keys strokes by id (`drawingMessages`), so a snapshot
//! carries the full stroke set but not the board's z-order. Load payloads
//! that contain only `drawingMessages` still decode; `version` and
//! `timeStamp` default. The version counter is client-local and orders one
//! client's successive saves only — it is not a vector clock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::stroke::Stroke;

/// Full capture of a board state for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "drawingMessages", default)]
    pub drawing_messages: HashMap<Uuid, Stroke>,
    #[serde(default)]
    pub version: u32,
    /// RFC-3339 save time, stamped by the saving client.
    #[serde(rename = "timeStamp", default)]
    pub time_stamp: String,
}

impl Snapshot {
    /// Capture the given board state under a version number, stamped now.
    #[must_use]
    pub fn capture(strokes: &[Stroke], version: u32) -> Self {
        let drawing_messages = strokes
            .iter()
            .map(|stroke| (stroke.id, stroke.clone()))
            .collect();
        Self { drawing_messages, version, time_stamp: now_rfc3339() }
    }

    /// The captured strokes. The map loses board order, so strokes are
    /// returned sorted by id for a deterministic result.
    #[must_use]
    pub fn strokes(&self) -> Vec<Stroke> {
        let mut strokes: Vec<Stroke> = self.drawing_messages.values().cloned().collect();
        strokes.sort_by_key(|s| s.id);
        strokes
    }

    /// Number of strokes captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawing_messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawing_messages.is_empty()
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
