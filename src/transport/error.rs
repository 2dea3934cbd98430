//! Transport layer error types.

use crate::error::{EditorError, TransportFailure};

/// Failure below the HTTP status level: no response was obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Timeout")]
    Timeout,
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for TransportFailure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => TransportFailure::Timeout,
            TransportError::Connection(message) | TransportError::Request(message) => {
                TransportFailure::ConnectionFailed { message }
            }
        }
    }
}

impl From<TransportError> for EditorError {
    fn from(err: TransportError) -> Self {
        EditorError::Transport(err.into())
    }
}
