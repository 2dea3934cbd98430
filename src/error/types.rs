//! Main error type for the photo editor.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::categories::*;
use crate::types::OperationKind;

/// Result type alias for photo editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Coarse classification of an [`EditorError`], used by callers to pick the
/// guidance they show to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The client could not be configured.
    Configuration,
    /// The operation parameters were rejected before sending.
    InvalidRequest,
    /// The remote safety system rejected the whole request.
    BlockedByPolicy,
    /// Generation halted before completion.
    AbnormalFinish,
    /// The model answered without producing an image.
    NoImageReturned,
    /// Resource read, encoding, network or HTTP failure.
    TransportFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::BlockedByPolicy => "blocked_by_policy",
            ErrorKind::AbnormalFinish => "abnormal_finish",
            ErrorKind::NoImageReturned => "no_image_returned",
            ErrorKind::TransportFailure => "transport_failure",
        };
        f.write_str(name)
    }
}

/// Top-level error type for the photo editor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("{}", blocked_message(.reason, .message.as_deref()))]
    BlockedByPolicy {
        reason: String,
        message: Option<String>,
    },

    #[error(
        "Image generation for {context} stopped unexpectedly. Reason: {reason}. \
         This often relates to safety settings."
    )]
    AbnormalFinish { context: OperationKind, reason: String },

    #[error("{}", no_image_message(.context, .text.as_deref()))]
    NoImageReturned {
        context: OperationKind,
        text: Option<String>,
    },

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportFailure),
}

fn blocked_message(reason: &str, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("Request was blocked. Reason: {reason}. {message}"),
        None => format!("Request was blocked. Reason: {reason}."),
    }
}

fn no_image_message(context: &OperationKind, text: Option<&str>) -> String {
    let lead = format!("The AI model did not return an image for the {context}. ");
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => format!("{lead}The model responded with text: \"{text}\""),
        None => format!(
            "{lead}This can happen due to safety filters or if the request is too complex. \
             Please try rephrasing your prompt to be more direct."
        ),
    }
}

impl EditorError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Configuration(_) => ErrorKind::Configuration,
            EditorError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            EditorError::BlockedByPolicy { .. } => ErrorKind::BlockedByPolicy,
            EditorError::AbnormalFinish { .. } => ErrorKind::AbnormalFinish,
            EditorError::NoImageReturned { .. } => ErrorKind::NoImageReturned,
            EditorError::Transport(_) => ErrorKind::TransportFailure,
        }
    }

    /// Returns true if trying the same request again may succeed.
    ///
    /// Nothing in this crate retries; the hint is for the caller's UI.
    pub fn is_retryable(&self) -> bool {
        match self {
            EditorError::Transport(failure) => failure.is_transient(),
            _ => false,
        }
    }

    /// Returns the retry-after duration if the API supplied one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            EditorError::Transport(failure) => failure.retry_after(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EditorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EditorError::Transport(TransportFailure::Timeout)
        } else {
            // The URL may carry the API key as a query parameter.
            EditorError::Transport(TransportFailure::ConnectionFailed {
                message: err.without_url().to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Transport(TransportFailure::Deserialization {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for EditorError {
    fn from(err: url::ParseError) -> Self {
        EditorError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

impl From<base64::DecodeError> for EditorError {
    fn from(err: base64::DecodeError) -> Self {
        EditorError::Transport(TransportFailure::MalformedEncoding {
            message: format!("invalid base64 payload: {err}"),
        })
    }
}

impl From<image::ImageError> for EditorError {
    fn from(err: image::ImageError) -> Self {
        EditorError::Transport(TransportFailure::ImageProcessing {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        let blocked = EditorError::BlockedByPolicy {
            reason: "SAFETY".to_string(),
            message: None,
        };
        assert_eq!(blocked.kind(), ErrorKind::BlockedByPolicy);

        let transport = EditorError::Transport(TransportFailure::Timeout);
        assert_eq!(transport.kind(), ErrorKind::TransportFailure);

        let config = EditorError::Configuration(ConfigurationError::MissingApiKey);
        assert_eq!(config.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_blocked_message_with_and_without_explanation() {
        let bare = EditorError::BlockedByPolicy {
            reason: "OTHER".to_string(),
            message: None,
        };
        assert_eq!(bare.to_string(), "Request was blocked. Reason: OTHER.");

        let explained = EditorError::BlockedByPolicy {
            reason: "SAFETY".to_string(),
            message: Some("Prompt violates policy".to_string()),
        };
        assert_eq!(
            explained.to_string(),
            "Request was blocked. Reason: SAFETY. Prompt violates policy"
        );
    }

    #[test]
    fn test_no_image_message_embeds_text() {
        let err = EditorError::NoImageReturned {
            context: OperationKind::Filter,
            text: Some("  I cannot do that  ".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "The AI model did not return an image for the filter. \
             The model responded with text: \"I cannot do that\""
        );
    }

    #[test]
    fn test_no_image_message_generic_hint() {
        let err = EditorError::NoImageReturned {
            context: OperationKind::Edit,
            text: Some("   ".to_string()),
        };
        assert!(err.to_string().contains("more direct"));
    }

    #[test]
    fn test_error_is_retryable() {
        let rate_limit = EditorError::Transport(TransportFailure::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(rate_limit.is_retryable());
        assert_eq!(rate_limit.retry_after(), Some(Duration::from_secs(30)));

        let blocked = EditorError::BlockedByPolicy {
            reason: "SAFETY".to_string(),
            message: None,
        };
        assert!(!blocked.is_retryable());

        let malformed = EditorError::Transport(TransportFailure::MalformedEncoding {
            message: "bad".to_string(),
        });
        assert!(!malformed.is_retryable());
    }
}
