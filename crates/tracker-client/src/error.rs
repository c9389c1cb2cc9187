//! Error taxonomy for tracker operations.
//!
//! The first three variants are the tracker's sentinel outcomes. Callers
//! match on them (or use the `is_*` helpers) instead of parsing messages.

use thiserror::Error;

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors returned by the tracker client.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker has no work to hand out right now. Back off and poll again.
    #[error("no tasks available")]
    NoTasksAvailable,

    /// The tracker does not know the configured project.
    #[error("this project doesn't exist")]
    NoSuchProject,

    /// The tracker answered with an unexpected HTTP status.
    #[error("invalid tracker response: {status}")]
    InvalidTrackerResponse {
        /// HTTP status code
        status: u16,
    },

    /// One or more configuration options were rejected.
    #[error("invalid tracker client configuration: {}", .violations.join("; "))]
    InvalidConfig {
        /// Every violation found, in field order
        violations: Vec<String>,
    },

    /// An operation was called with an argument it cannot accept.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// The caller's cancellation token fired before the tracker answered.
    #[error("request cancelled")]
    Cancelled,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Whether this is the "nothing to do right now" signal.
    pub const fn is_no_tasks_available(&self) -> bool {
        matches!(self, Self::NoTasksAvailable)
    }

    /// Whether the tracker reported that the project does not exist.
    pub const fn is_no_such_project(&self) -> bool {
        matches!(self, Self::NoSuchProject)
    }

    /// Status code carried by an `InvalidTrackerResponse`.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidTrackerResponse { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same call later may succeed.
    ///
    /// Covers the no-work signal, transport failures and 5xx responses.
    /// Configuration, argument, codec and request-building errors will fail
    /// again unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NoTasksAvailable => true,
            Self::Network(e) => !e.is_builder(),
            Self::InvalidTrackerResponse { status } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_messages() {
        assert_eq!(
            TrackerError::NoTasksAvailable.to_string(),
            "no tasks available"
        );
        assert_eq!(
            TrackerError::NoSuchProject.to_string(),
            "this project doesn't exist"
        );
        assert_eq!(
            TrackerError::InvalidTrackerResponse { status: 500 }.to_string(),
            "invalid tracker response: 500"
        );
    }

    #[test]
    fn test_invalid_config_lists_every_violation() {
        let error = TrackerError::InvalidConfig {
            violations: vec![
                "option must not be empty: project".to_string(),
                "option must not be empty: username".to_string(),
            ],
        };
        let msg = error.to_string();
        assert!(msg.contains("project"));
        assert!(msg.contains("username"));
    }

    #[test]
    fn test_status_only_for_invalid_response() {
        assert_eq!(
            TrackerError::InvalidTrackerResponse { status: 502 }.status(),
            Some(502)
        );
        assert_eq!(TrackerError::NoSuchProject.status(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(TrackerError::NoTasksAvailable.is_no_tasks_available());
        assert!(!TrackerError::NoTasksAvailable.is_no_such_project());
        assert!(TrackerError::NoSuchProject.is_no_such_project());
        assert!(!TrackerError::Cancelled.is_no_tasks_available());
    }

    #[test]
    fn test_is_retryable() {
        assert!(TrackerError::NoTasksAvailable.is_retryable());
        let server_error = TrackerError::InvalidTrackerResponse { status: 503 };
        let client_error = TrackerError::InvalidTrackerResponse { status: 400 };
        assert!(server_error.is_retryable());
        assert!(!client_error.is_retryable());
        assert!(!TrackerError::NoSuchProject.is_retryable());
        assert!(!TrackerError::Cancelled.is_retryable());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!TrackerError::from(json_err).is_retryable());
    }

    #[test]
    fn test_request_build_failure_is_not_retryable() {
        let builder_err = reqwest::Client::new()
            .post("https://tracker.example.org/example/request")
            .header("ateam-tracker-user", "ali\nce")
            .build()
            .unwrap_err();
        assert!(builder_err.is_builder());

        let err = TrackerError::from(builder_err);
        assert!(matches!(err, TrackerError::Network(_)));
        assert!(!err.is_retryable());
    }
}
