//! Structured logging for the photo editor.
//!
//! Fields are passed as JSON objects. [`StructuredLogger`] redacts
//! credentials and collapses inline image payloads before emitting.

use serde_json::Value;
use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";

/// Keys whose values are never logged.
const SENSITIVE_KEYS: [&str; 10] = [
    "api_key", "apiKey", "key",
    "token", "access_token", "secret",
    "password", "credential", "authorization", "x-goog-api-key",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger emitting `tracing` events with the fields rendered as JSON.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger.
    ///
    /// ```
    /// use integrations_photo_editor::observability::{Logger, StructuredLogger};
    /// use serde_json::json;
    ///
    /// let logger = StructuredLogger::new("photo_editor.editing");
    /// logger.info("Edit started", json!({"operation": "edit"}));
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }
}

/// Replaces credential values and shortens `data:` URLs and base64 blobs.
pub fn redact_fields(mut fields: Value) -> Value {
    match &mut fields {
        Value::Object(obj) => {
            for (key, value) in obj.iter_mut() {
                if SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    *value = Value::String(REDACTED.to_string());
                } else if key == "data" && value.is_string() {
                    *value = summarize_payload(value);
                } else {
                    *value = redact_fields(value.take());
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                *item = redact_fields(item.take());
            }
        }
        Value::String(text) if text.starts_with("data:") => {
            let header = text.split(',').next().unwrap_or("data:").to_string();
            *text = format!("{header},<{} chars>", text.len());
        }
        _ => {}
    }
    fields
}

fn summarize_payload(value: &Value) -> Value {
    let len = value.as_str().map_or(0, str::len);
    Value::String(format!("<{len} base64 chars>"))
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Debug) {
            let fields = redact_fields(fields);
            tracing::debug!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Info) {
            let fields = redact_fields(fields);
            tracing::info!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Warn) {
            let fields = redact_fields(fields);
            tracing::warn!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Error) {
            let fields = redact_fields(fields);
            tracing::error!(logger = %self.name, fields = %fields, "{}", message);
        }
    }
}

/// Logger writing plain lines to stderr, used when tracing is disabled.
pub struct DefaultLogger {
    prefix: String,
    level: LogLevel,
}

impl DefaultLogger {
    /// Creates a new default logger.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            level: LogLevel::Warn,
        }
    }

    /// Set the minimum log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[allow(clippy::print_stderr)]
    fn emit(&self, level: LogLevel, label: &str, message: &str, fields: Value) {
        if level <= self.level {
            eprintln!("[{}] {label}: {message} {}", self.prefix, redact_fields(fields));
        }
    }
}

impl Logger for DefaultLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.emit(LogLevel::Debug, "DEBUG", message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.emit(LogLevel::Info, "INFO", message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.emit(LogLevel::Warn, "WARN", message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.emit(LogLevel::Error, "ERROR", message, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_should_log() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Info);
        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Trace));
    }

    #[test]
    fn test_redact_credentials() {
        let redacted = redact_fields(json!({
            "api_key": "secret-key-123",
            "headers": {"x-goog-api-key": "k", "content-type": "application/json"},
            "model": "gemini-2.5-flash-image-preview"
        }));

        assert_eq!(redacted["api_key"], REDACTED);
        assert_eq!(redacted["headers"]["x-goog-api-key"], REDACTED);
        assert_eq!(redacted["headers"]["content-type"], "application/json");
        assert_eq!(redacted["model"], "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn test_redact_image_payloads() {
        let redacted = redact_fields(json!({
            "result": "data:image/png;base64,AAAABBBB",
            "parts": [{"inlineData": {"mimeType": "image/png", "data": "AAAABBBB"}}]
        }));

        assert_eq!(redacted["result"], "data:image/png;base64,<30 chars>");
        assert_eq!(redacted["parts"][0]["inlineData"]["data"], "<8 base64 chars>");
        assert_eq!(redacted["parts"][0]["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn test_default_logger_level_filtering() {
        let logger = DefaultLogger::new("test").with_level(LogLevel::Error);
        logger.warn("suppressed", json!({}));
        logger.error("emitted", json!({"api_key": "k"}));
    }
}
