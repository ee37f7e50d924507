//! Error types for TruckersMP API operations.
//!
//! Every request resolves to one of five failure kinds. The [`Error::from_status`]
//! classifier maps unsuccessful HTTP statuses onto them, decode problems become
//! [`Error::DecodeFailure`] and network problems arrive as [`Error::TransportFailure`].

use crate::transport::TransportError;
use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters of a response body kept on an error.
pub const MAX_BODY_FRAGMENT: usize = 512;

/// Main error type for TruckersMP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {body}")]
    NotFound {
        /// Fragment of the response body
        body: String,
    },

    /// The API rejected the request (4xx other than 404, or an unexpected status)
    #[error("Client request failed with status {status}: {body}")]
    ClientRequestFailure {
        /// HTTP status code returned by the API
        status: u16,
        /// Fragment of the response body
        body: String,
    },

    /// The API failed while handling the request (5xx)
    #[error("Server failure with status {status}: {body}")]
    ServerFailure {
        /// HTTP status code returned by the API
        status: u16,
        /// Fragment of the response body
        body: String,
    },

    /// The request never produced an HTTP response
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The response body was malformed or missing required fields
    #[error("Failed to decode response: {detail}")]
    DecodeFailure {
        /// What could not be decoded
        detail: String,
    },
}

/// Specialized result type for TruckersMP requests.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error response for serialization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail structure.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// HTTP status, when the API answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl Error {
    /// Classify an unsuccessful HTTP status.
    ///
    /// 404 is [`Error::NotFound`], 400-499 is [`Error::ClientRequestFailure`] and
    /// 500-599 is [`Error::ServerFailure`]. Anything else the API should never send
    /// on a failed call (1xx, 3xx, 600+) falls back to
    /// [`Error::ClientRequestFailure`] with the status preserved.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = body_fragment(body);
        match status {
            404 => Self::NotFound { body },
            400..=499 => Self::ClientRequestFailure { status, body },
            500..=599 => Self::ServerFailure { status, body },
            _ => Self::ClientRequestFailure { status, body },
        }
    }

    /// Build a [`Error::DecodeFailure`].
    #[must_use]
    pub fn decode(detail: impl Into<String>) -> Self {
        Self::DecodeFailure {
            detail: detail.into(),
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ClientRequestFailure { .. } => "CLIENT_REQUEST_FAILURE",
            Self::ServerFailure { .. } => "SERVER_FAILURE",
            Self::TransportFailure(_) => "TRANSPORT_FAILURE",
            Self::DecodeFailure { .. } => "DECODE_FAILURE",
        }
    }

    /// HTTP status carried by the error, if the API answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::ClientRequestFailure { status, .. } | Self::ServerFailure { status, .. } => {
                Some(*status)
            }
            Self::TransportFailure(_) | Self::DecodeFailure { .. } => None,
        }
    }

    /// Returns true when the resource simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Converts the error into an `ErrorResponse`.
    #[must_use]
    pub fn into_error_response(self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                status: self.status(),
                message: self.to_string(),
            },
        }
    }
}

/// Truncate a response body to at most [`MAX_BODY_FRAGMENT`] characters.
#[must_use]
pub fn body_fragment(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_FRAGMENT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportErrorKind;

    #[test]
    fn test_from_status_not_found() {
        let err = Error::from_status(404, "missing");
        assert_eq!(
            err,
            Error::NotFound {
                body: "missing".to_string()
            }
        );
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_from_status_client_range() {
        for status in [400, 401, 403, 409, 429, 499] {
            let err = Error::from_status(status, "nope");
            assert!(
                matches!(err, Error::ClientRequestFailure { status: s, .. } if s == status),
                "{status} should be a client failure"
            );
        }
    }

    #[test]
    fn test_from_status_server_range() {
        for status in [500, 502, 503, 504, 599] {
            let err = Error::from_status(status, "boom");
            assert!(matches!(err, Error::ServerFailure { status: s, .. } if s == status));
        }
    }

    #[test]
    fn test_from_status_unexpected_codes_default_to_client_failure() {
        for status in [100, 204, 301, 304, 600, 999] {
            let err = Error::from_status(status, "");
            assert_eq!(err.error_code(), "CLIENT_REQUEST_FAILURE");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::from_status(404, "").error_code(), "NOT_FOUND");
        assert_eq!(Error::from_status(400, "").error_code(), "CLIENT_REQUEST_FAILURE");
        assert_eq!(Error::from_status(500, "").error_code(), "SERVER_FAILURE");
        assert_eq!(
            Error::from(TransportError::new(TransportErrorKind::Timeout, "slow")).error_code(),
            "TRANSPORT_FAILURE"
        );
        assert_eq!(Error::decode("bad").error_code(), "DECODE_FAILURE");
    }

    #[test]
    fn test_error_display() {
        let err = Error::from_status(500, "upstream down");
        assert_eq!(err.to_string(), "Server failure with status 500: upstream down");

        let err = Error::decode("missing field `name`");
        assert_eq!(err.to_string(), "Failed to decode response: missing field `name`");
    }

    #[test]
    fn test_transport_failure_keeps_source() {
        let err: Error = TransportError::new(TransportErrorKind::Connect, "refused").into();
        let source = std::error::Error::source(&err).expect("transport cause");
        assert_eq!(source.to_string(), "connect: refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_body_fragment_truncates_long_bodies() {
        let body = "x".repeat(MAX_BODY_FRAGMENT + 100);
        let fragment = body_fragment(&body);
        assert_eq!(fragment.len(), MAX_BODY_FRAGMENT + 3);
        assert!(fragment.ends_with("..."));

        assert_eq!(body_fragment("short"), "short");
    }

    #[test]
    fn test_body_fragment_respects_char_boundaries() {
        let body = "é".repeat(MAX_BODY_FRAGMENT + 1);
        let fragment = body_fragment(&body);
        assert_eq!(fragment.chars().count(), MAX_BODY_FRAGMENT + 3);
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::DecodeFailure { .. }));
    }

    #[test]
    fn test_into_error_response() {
        let response = Error::from_status(429, "slow down").into_error_response();
        assert_eq!(response.error.code, "CLIENT_REQUEST_FAILURE");
        assert_eq!(response.error.status, Some(429));

        let json = serde_json::to_string(&Error::decode("bad").into_error_response()).unwrap();
        assert!(json.contains("DECODE_FAILURE"));
        assert!(!json.contains("status"));
    }
}
