//! Error mapping utilities for HTTP status codes and API error bodies.

use serde::Deserialize;

use super::categories::TransportFailure;

/// Structured API error response from Gemini.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detailed error information from API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Maps an HTTP status code and response body to a [`TransportFailure`].
///
/// The body is parsed as the Gemini error envelope when possible; otherwise the
/// raw text is used as the message.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> TransportFailure {
    let message = extract_message(body);

    match status {
        401 | 403 => TransportFailure::Authentication { message },

        404 => TransportFailure::ModelNotFound {
            model: extract_resource_name(&message),
        },

        429 => TransportFailure::RateLimited {
            // Filled in from headers by the response parser
            retry_after: None,
        },

        503 => TransportFailure::ServiceUnavailable { retry_after: None },

        500..=599 => TransportFailure::Server { status, message },

        _ => TransportFailure::ApiRejected { status, message },
    }
}

/// Maps an HTTP status code and plain message to a [`TransportFailure`].
pub fn map_http_status(status: u16, message: &str) -> TransportFailure {
    map_http_status_with_body(status, message.as_bytes())
}

fn extract_message(body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<ApiErrorResponse>(body) {
        return envelope.error.message;
    }

    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
    }

    String::from_utf8_lossy(body).trim().to_string()
}

/// Extracts a model name from an error message (simple heuristic).
fn extract_resource_name(message: &str) -> String {
    if let Some(found) = message
        .split_whitespace()
        .find(|s| s.starts_with("models/"))
    {
        return found
            .trim_matches(|c: char| {
                !c.is_alphanumeric() && c != '/' && c != '-' && c != '_' && c != '.'
            })
            .to_string();
    }

    for quote in ['\'', '"'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}
