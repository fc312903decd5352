//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// API error types.
///
/// Request errors render as a bare status code with an empty body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be decoded or failed validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body exceeded the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Unknown or malformed job id.
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Server socket error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
