//! HTTP response parser for the Gemini API.
//!
//! Maps non-2xx statuses to [`TransportFailure`], fills in `Retry-After` for
//! throttling responses, and records the server's request id for debugging.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{map_http_status_with_body, EditorResult, TransportFailure};
use super::http::HttpResponse;

/// Parser for HTTP responses from the Gemini API.
pub struct ResponseParser;

impl ResponseParser {
    /// Deserializes a 2xx response, or maps the error status.
    ///
    /// ```
    /// use integrations_photo_editor::transport::{ResponseParser, HttpResponse};
    /// use integrations_photo_editor::types::GenerateContentResponse;
    /// use bytes::Bytes;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse {
    ///     status: 200,
    ///     headers: HashMap::new(),
    ///     body: Bytes::from_static(b"{}"),
    /// };
    ///
    /// let parsed: GenerateContentResponse = ResponseParser::parse_response(response).unwrap();
    /// assert!(parsed.candidates.is_none());
    /// ```
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> EditorResult<T> {
        if response.is_success() {
            Ok(serde_json::from_slice(&response.body)?)
        } else {
            Err(Self::parse_error_response(&response).into())
        }
    }

    /// Maps an error response to a [`TransportFailure`].
    pub fn parse_error_response(response: &HttpResponse) -> TransportFailure {
        let retry_after = Self::parse_retry_after(&response.headers);
        let mut failure = map_http_status_with_body(response.status, &response.body);

        match &mut failure {
            TransportFailure::RateLimited { retry_after: slot }
            | TransportFailure::ServiceUnavailable { retry_after: slot } => *slot = retry_after,
            _ => {}
        }

        if let Some(id) = Self::extract_request_id(&response.headers) {
            tracing::debug!(
                request_id = %id,
                status = response.status,
                error = %failure,
                "API error response"
            );
        }

        failure
    }

    /// Parses `Retry-After` given in seconds. HTTP dates are ignored.
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the server-assigned request id, if any.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        const CANDIDATES: [&str; 3] = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| CANDIDATES.iter().any(|c| key.eq_ignore_ascii_case(c)))
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::types::GenerateContentResponse;
    use bytes::Bytes;

    fn create_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_successful_response() {
        let response = create_response(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]},"finishReason":"STOP"}]}"#,
        );
        let parsed: GenerateContentResponse = ResponseParser::parse_response(response).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("hi"));
    }

    #[test]
    fn test_parse_invalid_json_is_deserialization_failure() {
        let response = create_response(200, "<html>");
        let error = ResponseParser::parse_response::<GenerateContentResponse>(response).unwrap_err();
        assert!(matches!(
            error,
            EditorError::Transport(TransportFailure::Deserialization { .. })
        ));
    }

    #[test]
    fn test_parse_400_is_api_rejected() {
        let response = create_response(400, r#"{"error":{"code":400,"message":"Image too large"}}"#);
        let error = ResponseParser::parse_response::<GenerateContentResponse>(response).unwrap_err();
        assert_eq!(
            error,
            EditorError::Transport(TransportFailure::ApiRejected {
                status: 400,
                message: "Image too large".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_429_fills_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("Retry-After".to_string(), "60".to_string());
        let response = HttpResponse {
            status: 429,
            headers,
            body: Bytes::from_static(br#"{"error":{"message":"Resource exhausted"}}"#),
        };

        let error = ResponseParser::parse_response::<GenerateContentResponse>(response).unwrap_err();
        assert_eq!(error.retry_after(), Some(Duration::from_secs(60)));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_parse_503_fills_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "5".to_string());
        let response = HttpResponse {
            status: 503,
            headers,
            body: Bytes::from_static(b"overloaded"),
        };

        let failure = ResponseParser::parse_error_response(&response);
        assert_eq!(
            failure,
            TransportFailure::ServiceUnavailable {
                retry_after: Some(Duration::from_secs(5))
            }
        );
    }

    #[test]
    fn test_parse_retry_after_http_date_ignored() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "Wed, 21 Oct 2015 07:28:00 GMT".to_string());
        assert_eq!(ResponseParser::parse_retry_after(&headers), None);
    }

    #[test]
    fn test_extract_request_id_variants() {
        let mut headers = HashMap::new();
        headers.insert("X-Goog-Request-Id".to_string(), "goog123".to_string());
        assert_eq!(
            ResponseParser::extract_request_id(&headers),
            Some("goog123".to_string())
        );
        assert_eq!(ResponseParser::extract_request_id(&HashMap::new()), None);
    }
}
