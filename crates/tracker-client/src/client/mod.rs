//! Tracker client for acquiring work items and reporting completion.
//!
//! This module owns client construction and the request builder shared by
//! both call families; the operations live in `acquire` and `complete`.

mod acquire;
mod complete;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use crate::config::TrackerClientConfig;
use crate::error::TrackerResult;
use crate::http::{BasicAuth, HttpBackend, ReqwestBackend, TrackerRequest};
use crate::logging::{LeveledLogger, TracingLogger};
use crate::models::TrackerConfig;
use crate::url::build_endpoint_url;

/// Product token sent ahead of the project in the `user-agent` header.
const CLIENT_IDENTIFIER: &str = concat!("tracker-client/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Type Aliases
// ============================================================================

/// Default tracker client using the reqwest HTTP backend.
pub type DefaultTrackerClient = TrackerClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the tracker's acquire and done endpoints.
///
/// The client holds no mutable state after construction. It is `Send + Sync`
/// whenever its backend is, and may be shared (for example behind an `Arc`)
/// by any number of concurrent callers.
pub struct TrackerClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: TrackerConfig,
    pub(crate) logger: Arc<dyn LeveledLogger>,
}

impl<B: HttpBackend + std::fmt::Debug> std::fmt::Debug for TrackerClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerClient")
            .field("backend", &self.backend)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DefaultTrackerClient {
    /// Validate `config` and create a client backed by reqwest.
    ///
    /// No network traffic happens here.
    pub fn new(config: &TrackerClientConfig) -> TrackerResult<Self> {
        Self::with_logger(config, Arc::new(TracingLogger))
    }

    /// Like [`DefaultTrackerClient::new`], with client and transport events
    /// sent to `logger`.
    pub fn with_logger(
        config: &TrackerClientConfig,
        logger: Arc<dyn LeveledLogger>,
    ) -> TrackerResult<Self> {
        let config = config.validate()?;
        let backend = ReqwestBackend::with_logger(config.request_timeout, Arc::clone(&logger))?;
        Ok(Self {
            backend,
            config,
            logger,
        })
    }
}

impl<B: HttpBackend> TrackerClient<B> {
    /// Validate `config` and create a client over a custom transport.
    ///
    /// The configured timeout is the backend's responsibility here.
    pub fn with_backend(config: &TrackerClientConfig, backend: B) -> TrackerResult<Self> {
        Self::with_backend_and_logger(config, backend, Arc::new(TracingLogger))
    }

    /// Like [`TrackerClient::with_backend`], with client events sent to `logger`.
    pub fn with_backend_and_logger(
        config: &TrackerClientConfig,
        backend: B,
        logger: Arc<dyn LeveledLogger>,
    ) -> TrackerResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            backend,
            config,
            logger,
        })
    }

    /// Normalized project name.
    pub fn project(&self) -> &str {
        &self.config.project
    }

    /// Normalized project version.
    pub fn project_version(&self) -> &str {
        &self.config.project_version
    }

    /// Normalized downloader identity.
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Tracker base URL, without a trailing slash.
    pub fn tracker_url(&self) -> &str {
        &self.config.tracker_url
    }

    /// Build an authenticated request to `<tracker_url>/<project>/<path>`.
    pub(crate) fn new_request<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> TrackerResult<TrackerRequest> {
        let url = build_endpoint_url(&self.config, path)?;
        let body = serde_json::to_vec(body)?;

        let config = &self.config;
        let headers = vec![
            ("content-type", "application/json".to_string()),
            (
                "user-agent",
                format!(
                    "{CLIENT_IDENTIFIER} {}/{}",
                    config.project, config.project_version
                ),
            ),
            ("ateam-tracker-project", config.project.clone()),
            ("ateam-tracker-user", config.username.clone()),
            ("ateam-tracker-version", config.project_version.clone()),
        ];

        let basic_auth = config.password.as_ref().map(|password| BasicAuth {
            username: config.username.clone(),
            password: password.clone(),
        });

        Ok(TrackerRequest {
            method,
            url,
            headers,
            basic_auth,
            body,
        })
    }
}
