//! Probe error types.

use thiserror::Error;

/// Reasons a probe produced no payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or protocol failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body is not valid UTF-8.
    #[error("Failed to decode body: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

impl FetchError {
    /// Whether the request hit the probe timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(e) if e.is_timeout())
    }
}
