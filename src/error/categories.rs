//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Request validation errors raised before anything is sent to the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    #[error("A prompt is required for the {operation} operation")]
    EmptyPrompt { operation: String },

    #[error("Invalid part layout: {message}")]
    InvalidPartLayout { message: String },

    #[error("Unsupported media type: {mime_type}")]
    UnsupportedMediaType { mime_type: String },
}

/// Failures while reading or encoding a resource, or while talking to the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportFailure {
    #[error("Failed to read image resource {path}: {message}")]
    ResourceRead { path: String, message: String },

    #[error("Malformed image encoding: {message}")]
    MalformedEncoding { message: String },

    #[error("Unsupported image: {message}")]
    UnsupportedImage { message: String },

    #[error("Image processing failed: {message}")]
    ImageProcessing { message: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication rejected: {message}")]
    Authentication { message: String },

    #[error("Too many requests")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Request rejected by the API (HTTP {status}): {message}")]
    ApiRejected { status: u16, message: String },

    #[error("Service unavailable")]
    ServiceUnavailable { retry_after: Option<Duration> },

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to deserialize response: {message}")]
    Deserialization { message: String },
}

impl TransportFailure {
    /// Returns the retry-after duration carried by throttling failures.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            TransportFailure::RateLimited { retry_after }
            | TransportFailure::ServiceUnavailable { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Returns true for failures a caller may reasonably try again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportFailure::ConnectionFailed { .. }
                | TransportFailure::Timeout
                | TransportFailure::RateLimited { .. }
                | TransportFailure::ServiceUnavailable { .. }
                | TransportFailure::Server { .. }
        )
    }
}
