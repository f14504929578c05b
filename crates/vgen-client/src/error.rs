//! Client error types.

use thiserror::Error;

/// Result type for service client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the generation service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Service unavailable ({0}): {1}")]
    ServiceUnavailable(u16, String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Video is not ready yet: {0}")]
    NotReady(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Classify a non-success HTTP status.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::ServiceUnavailable(status, message),
            _ => Self::RequestFailed { status, message },
        }
    }

    /// HTTP status of the response that caused this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::ServiceUnavailable(status, _) => Some(*status),
            ClientError::RateLimited(_) => Some(429),
            ClientError::NotFound(_) => Some(404),
            ClientError::RequestFailed { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the error is transient.
    ///
    /// Transient errors are worth repeating unchanged: the poller keeps
    /// ticking through them instead of reporting a failure.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::ServiceUnavailable(..)
            | ClientError::RateLimited(_)
            | ClientError::Timeout(_) => true,
            ClientError::Network(e) => !e.is_decode() && !e.is_builder(),
            _ => false,
        }
    }
}
