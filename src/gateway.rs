//! Snapshot gateway — versioned save/load of the full board over HTTP.
//!
//! DESIGN
//! ======
//! `save` builds a snapshot keyed by stroke id under the next client-local
//! version and POSTs it; `load` GETs the latest stored snapshot and returns
//! the complete stroke list. Both report failure to the caller for manual
//! retry — there is no automatic retry, and load is all-or-nothing: a payload
//! that fails to decode applies nothing.

use reqwest::StatusCode;
use tracing::info;

use crate::snapshot::Snapshot;
use crate::stroke::Stroke;

// =============================================================================
// TYPES
// =============================================================================

/// Recoverable save/load failures. The user may simply retry.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("snapshot request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("snapshot endpoint returned {0}")]
    Status(StatusCode),
}

/// HTTP client for the snapshot persistence endpoint.
pub struct SnapshotGateway {
    http: reqwest::Client,
    base_url: String,
    next_version: u32,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl SnapshotGateway {
    /// Create a gateway for a base URL such as
    /// `http://localhost:8080/api/whiteboard`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into(), next_version: 0 }
    }

    /// Version the next save will carry.
    #[must_use]
    pub fn next_version(&self) -> u32 {
        self.next_version + 1
    }

    /// Snapshot the given board state and transmit it. Returns the version
    /// the save carried. The counter advances per save operation, so a failed
    /// save still consumes a version.
    ///
    /// # Errors
    ///
    /// Returns a transport error or the endpoint's non-success status. The
    /// board state is untouched either way.
    pub async fn save(&mut self, strokes: &[Stroke]) -> Result<u32, GatewayError> {
        self.next_version += 1;
        let snapshot = Snapshot::capture(strokes, self.next_version);

        let response = self
            .http
            .post(format!("{}/save", self.base_url))
            .json(&snapshot)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        info!(version = snapshot.version, strokes = snapshot.len(), "snapshot saved");
        Ok(snapshot.version)
    }

    /// Fetch the latest stored snapshot and return its full stroke list.
    ///
    /// # Errors
    ///
    /// Returns a transport error, the endpoint's non-success status (404
    /// before any save), or a decode failure. No partial state is ever
    /// returned.
    pub async fn load(&self) -> Result<Vec<Stroke>, GatewayError> {
        let response = self
            .http
            .get(format!("{}/load", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        let snapshot: Snapshot = response.json().await?;
        info!(version = snapshot.version, strokes = snapshot.len(), "snapshot loaded");
        Ok(snapshot.strokes())
    }
}
