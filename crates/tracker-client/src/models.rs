//! Internal configuration and wire types for the tracker protocol.
//!
//! These types are internal to `tracker-client`. The public surface is
//! [`crate::TrackerClientConfig`] and plain item identifiers.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tracker URL used when the caller does not configure one.
pub const DEFAULT_TRACKER_URL: &str = "https://legacy-api.arpa.li";

/// Protocol revision sent with every work request.
pub const API_VERSION: &str = "2";

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Normalized, validated configuration bound to a client.
#[derive(Clone)]
pub struct TrackerConfig {
    /// Tracker base URL without a trailing slash
    pub tracker_url: String,
    /// Project name, trimmed
    pub project: String,
    /// Project version, trimmed
    pub project_version: String,
    /// Downloader identity, trimmed
    pub username: String,
    /// Basic auth password; `None` when not configured or empty
    pub password: Option<String>,
    /// Per-request timeout applied to the transport
    pub request_timeout: Duration,
}

impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("tracker_url", &self.tracker_url)
            .field("project", &self.project)
            .field("project_version", &self.project_version)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracker_url: "https://tracker.example.org".to_string(),
            project: "example".to_string(),
            project_version: "20240101.01".to_string(),
            username: "downloader".to_string(),
            password: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Body of a work acquisition request.
#[derive(Debug, Clone, Serialize)]
pub struct WorkRequest<'a> {
    pub downloader: &'a str,
    pub api_version: &'static str,
    pub version: &'a str,
}

/// Body returned by the tracker when it hands out work.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkResponse {
    /// Item identifiers, in the order the tracker assigned them
    #[serde(default)]
    pub items: Vec<String>,
    /// Queues the items were drawn from. Part of the wire contract, not read.
    #[serde(default)]
    #[allow(dead_code)]
    pub queues: Vec<String>,
}

/// Body of a completion report.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub downloader: &'a str,
    pub version: &'a str,
    pub items: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<&'a HashMap<String, u64>>,
}
