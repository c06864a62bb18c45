//! Error definitions for response construction and framing.

use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while building or framing a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Header name is not a valid HTTP token.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    /// Header value contains bytes not allowed in a field value.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    /// Numeric status outside 100..=999.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// A body was supplied for a status that must not carry one.
    #[error("status {0} does not allow a body")]
    BodyNotAllowed(StatusCode),

    /// Structured payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for response operations.
pub type ResponseResult<T> = Result<T, ResponseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResponseError::InvalidStatus(42);
        assert_eq!(err.to_string(), "invalid status code: 42");

        let err = ResponseError::BodyNotAllowed(StatusCode::NOT_MODIFIED);
        assert_eq!(err.to_string(), "status 304 Not Modified does not allow a body");
    }
}
