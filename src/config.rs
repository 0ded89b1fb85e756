//! Environment-backed configuration with sensible local defaults.

use std::time::Duration;

/// Fixed delay between relay connection attempts.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_RELAY_WS_URL: &str = "ws://localhost:8080/whiteboard";
const DEFAULT_SNAPSHOT_API_URL: &str = "http://localhost:8080/api/whiteboard";

/// Client-side session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebSocket endpoint of the relay's shared stroke topic.
    pub relay_ws_url: String,
    /// Base URL of the snapshot persistence endpoints.
    pub snapshot_api_url: String,
    /// Delay between connection attempts when the relay is unreachable.
    pub reconnect_delay: Duration,
    /// Display name announced to the relay, if any.
    pub username: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            relay_ws_url: DEFAULT_RELAY_WS_URL.to_owned(),
            snapshot_api_url: DEFAULT_SNAPSHOT_API_URL.to_owned(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            username: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to the
    /// local-relay defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let reconnect_ms: u64 = env_parse("RECONNECT_DELAY_MS", 5000);
        Self {
            relay_ws_url: std::env::var("RELAY_WS_URL").unwrap_or_else(|_| DEFAULT_RELAY_WS_URL.to_owned()),
            snapshot_api_url: std::env::var("SNAPSHOT_API_URL")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_API_URL.to_owned()),
            reconnect_delay: Duration::from_millis(reconnect_ms),
            username: std::env::var("CLIENT_USERNAME").ok(),
        }
    }

    /// The relay URL with the username query parameter applied, when set.
    #[must_use]
    pub fn connect_url(&self) -> String {
        match &self.username {
            Some(name) => format!("{}?username={name}", self.relay_ws_url),
            None => self.relay_ws_url.clone(),
        }
    }
}

/// Parse an environment variable, falling back to a default on absence or
/// parse failure.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// TESTS
// =============================================================================
