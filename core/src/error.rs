//! Error types for the playground core.
//!
//! # Design
//! Failures are terminal where they occur: the registry logs them, the
//! request sender and upload controller turn them into display text. The
//! enum exists so hosts that want the cause (tests, the CLI) can inspect it.

use std::fmt;

use crate::http::TransportError;

/// Errors returned by the core's build and parse operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status where success was required.
    HttpError { status: u16, body: String },

    /// A response body could not be deserialized into the expected shape.
    DeserializationError(String),

    /// The host failed to complete the request.
    Transport(TransportError),

    /// The method text in the form is not an HTTP method we can send.
    InvalidMethod(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Transport(err) => write!(f, "{err}"),
            ApiError::InvalidMethod(method) => {
                write!(f, "unsupported HTTP method: {method:?}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err)
    }
}
