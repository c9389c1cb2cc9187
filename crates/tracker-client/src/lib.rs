#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod logging;
mod models;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultTrackerClient, TrackerClient};

// Configuration
pub use config::TrackerClientConfig;

// Errors
pub use error::{TrackerError, TrackerResult};

// Transport
pub use http::{BasicAuth, HttpBackend, ReqwestBackend, TrackerRequest, TrackerResponse};

// Logging
pub use logging::{format_line, LeveledLogger, LogFields, TracingLogger};

// Re-exported so callers can build cancellation tokens without a direct dependency
pub use tokio_util::sync::CancellationToken;

// Silence unused dev-dependency warnings
#[cfg(test)]
use wiremock as _;
