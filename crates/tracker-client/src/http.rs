//! HTTP backend abstraction for the tracker API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest; retries are left to whoever wraps or replaces it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{TrackerError, TrackerResult};
use crate::logging::{LeveledLogger, TracingLogger};

// ============================================================================
// Request / Response
// ============================================================================

/// Credentials for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A fully prepared outbound request.
#[derive(Debug, Clone)]
pub struct TrackerRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub basic_auth: Option<BasicAuth>,
    pub body: Vec<u8>,
}

impl TrackerRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and fully-read body of a tracker response.
#[derive(Debug, Clone, Default)]
pub struct TrackerResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Transport used by the tracker client.
///
/// Implementations must be safe to share between concurrent callers. When
/// `cancel` fires before the response is read, the call fails with
/// [`TrackerError::Cancelled`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send a request and read the whole response.
    async fn send(
        &self,
        request: TrackerRequest,
        cancel: Option<CancellationToken>,
    ) -> TrackerResult<TrackerResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// reqwest pools connections internally, so one backend should be shared by
/// all requests of a client.
pub struct ReqwestBackend {
    client: reqwest::Client,
    logger: Arc<dyn LeveledLogger>,
}

impl std::fmt::Debug for ReqwestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestBackend").finish_non_exhaustive()
    }
}

impl ReqwestBackend {
    /// Create a backend with the given request timeout and the default logger.
    pub fn new(timeout: Duration) -> TrackerResult<Self> {
        Self::with_logger(timeout, Arc::new(TracingLogger))
    }

    /// Create a backend that reports transport events to `logger`.
    pub fn with_logger(timeout: Duration, logger: Arc<dyn LeveledLogger>) -> TrackerResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, logger })
    }

    async fn exchange(&self, request: TrackerRequest) -> TrackerResult<TrackerResponse> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(auth) = request.basic_auth {
            builder = builder.basic_auth(auth.username, Some(auth.password));
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(TrackerResponse { status, body })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(
        &self,
        request: TrackerRequest,
        cancel: Option<CancellationToken>,
    ) -> TrackerResult<TrackerResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        self.logger.debug("performing request", &[("method", &method), ("url", &url)]);

        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(TrackerError::Cancelled),
                    result = self.exchange(request) => result,
                }
            }
            None => self.exchange(request).await,
        };

        match &result {
            Ok(response) if response.status >= 300 => self.logger.info(
                "tracker returned non-success status",
                &[
                    ("method", &method),
                    ("url", &url),
                    ("status", &response.status),
                ],
            ),
            Ok(_) => {}
            Err(TrackerError::Cancelled) => self
                .logger
                .warn("request cancelled", &[("method", &method), ("url", &url)]),
            Err(e) => self.logger.error(
                "request failed",
                &[("method", &method), ("url", &url), ("error", e)],
            ),
        }

        result
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub body: Vec<u8>,
    }

    impl CannedResponse {
        /// A response with the given status and no body.
        pub const fn status(status: u16) -> Self {
            Self {
                status,
                body: Vec::new(),
            }
        }

        /// A response with the given status and JSON body.
        pub fn json(status: u16, json: &serde_json::Value) -> Self {
            Self {
                status,
                body: serde_json::to_vec(json).unwrap(),
            }
        }

        /// A successful acquire response handing out `items`.
        pub fn work(items: &[&str]) -> Self {
            Self::json(200, &serde_json::json!({"items": items, "queues": []}))
        }
    }

    /// A fake HTTP backend that replays canned responses and records requests.
    pub struct FakeBackend {
        responses: Mutex<VecDeque<CannedResponse>>,
        default_response: Option<CannedResponse>,
        requests: Arc<Mutex<Vec<TrackerRequest>>>,
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                default_response: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Queue a response; queued responses are served in order.
        pub fn with_response(self, response: CannedResponse) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        /// Set the response served once the queue is empty.
        pub fn with_default(mut self, response: CannedResponse) -> Self {
            self.default_response = Some(response);
            self
        }

        /// Shared handle to the recorded requests.
        pub fn requests(&self) -> Arc<Mutex<Vec<TrackerRequest>>> {
            Arc::clone(&self.requests)
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn send(
            &self,
            request: TrackerRequest,
            cancel: Option<CancellationToken>,
        ) -> TrackerResult<TrackerResponse> {
            self.requests.lock().unwrap().push(request);

            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Err(TrackerError::Cancelled);
            }

            let canned = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .or_else(|| self.default_response.clone())
                .unwrap_or_else(|| CannedResponse::status(404));

            Ok(TrackerResponse {
                status: canned.status,
                body: canned.body,
            })
        }
    }
}
