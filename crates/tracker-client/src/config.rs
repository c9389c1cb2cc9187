//! Public configuration for the tracker client.
//!
//! This module provides the caller-facing builder. The internal config is
//! derived from it when a client is created.

use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{TrackerConfig, DEFAULT_TRACKER_URL};

/// Configuration for the tracker client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use tracker_client::TrackerClientConfig;
/// use std::time::Duration;
///
/// let config = TrackerClientConfig::new("example-project", "20240101.01", "downloader")
///     .with_tracker_url("https://tracker.example.org/")
///     .with_password("secret")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct TrackerClientConfig {
    /// Project the downloader works for
    pub(crate) project: String,
    /// Version of the downloader for this project
    pub(crate) project_version: String,
    /// Tracker base URL; empty selects the default
    pub(crate) tracker_url: String,
    /// Downloader identity
    pub(crate) username: String,
    /// Optional basic auth password
    pub(crate) password: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl std::fmt::Debug for TrackerClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerClientConfig")
            .field("project", &self.project)
            .field("project_version", &self.project_version)
            .field("tracker_url", &self.tracker_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TrackerClientConfig {
    /// Create a configuration for the given project identity.
    ///
    /// The tracker URL defaults to `https://legacy-api.arpa.li` and the
    /// timeout to 30 seconds.
    pub fn new(
        project: impl Into<String>,
        project_version: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            project_version: project_version.into(),
            tracker_url: String::new(),
            username: username.into(),
            password: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the tracker base URL.
    ///
    /// An empty string selects the default tracker. One trailing `/` is
    /// stripped during validation.
    #[must_use]
    pub fn with_tracker_url(mut self, url: impl Into<String>) -> Self {
        self.tracker_url = url.into();
        self
    }

    /// Set the password used for HTTP basic authentication.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set an optional password.
    #[must_use]
    pub fn with_optional_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Normalize and validate this configuration.
    ///
    /// Every violation is collected before returning, so a config missing
    /// several fields reports all of them in one
    /// [`TrackerError::InvalidConfig`].
    pub(crate) fn validate(&self) -> TrackerResult<TrackerConfig> {
        let mut violations = Vec::new();

        let project = self.project.trim().to_string();
        if project.is_empty() {
            violations.push(empty_option("project"));
        } else if !is_header_safe(&project) {
            violations.push(unsafe_option("project"));
        }

        let project_version = self.project_version.trim().to_string();
        if project_version.is_empty() {
            violations.push(empty_option("project_version"));
        } else if !is_header_safe(&project_version) {
            violations.push(unsafe_option("project_version"));
        }

        let username = self.username.trim().to_string();
        if username.is_empty() {
            violations.push(empty_option("username"));
        } else if !is_header_safe(&username) {
            violations.push(unsafe_option("username"));
        }

        let tracker_url = normalize_tracker_url(&self.tracker_url);
        if !is_http_url(&tracker_url) {
            violations.push(format!(
                "option must be an absolute http(s) URL: tracker_url ({tracker_url:?})"
            ));
        }

        if self.timeout.is_zero() {
            violations.push("option must be greater than zero: timeout".to_string());
        }

        if !violations.is_empty() {
            return Err(TrackerError::InvalidConfig { violations });
        }

        Ok(TrackerConfig {
            tracker_url,
            project,
            project_version,
            username,
            password: self.password.clone().filter(|p| !p.is_empty()),
            request_timeout: self.timeout,
        })
    }
}

fn empty_option(name: &str) -> String {
    format!("option must not be empty: {name}")
}

fn unsafe_option(name: &str) -> String {
    format!("option must be a valid HTTP header value: {name}")
}

/// Identity fields are sent as request headers.
fn is_header_safe(value: &str) -> bool {
    HeaderValue::from_str(value).is_ok()
}

/// Substitute the default for an empty URL and strip one trailing slash.
fn normalize_tracker_url(url: &str) -> String {
    let url = if url.is_empty() {
        DEFAULT_TRACKER_URL
    } else {
        url
    };
    url.strip_suffix('/').unwrap_or(url).to_string()
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}
