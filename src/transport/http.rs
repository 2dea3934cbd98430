//! Request and response values exchanged with an [`HttpTransport`].

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use super::error::TransportError;
use crate::auth::{API_KEY_HEADER, API_KEY_QUERY_PARAM};

/// Case-insensitive lookup in a header map.
fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// An outgoing request.
///
/// `Debug` redacts the API key and prints only the body length, since
/// bodies carry whole base64 images.
#[derive(Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL, including the key query parameter when configured.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Serialized JSON body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    fn redacted_url(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(mut url) => {
                let pairs: Vec<(String, String)> = url
                    .query_pairs()
                    .map(|(k, v)| {
                        let v = if k == API_KEY_QUERY_PARAM { "[REDACTED]".into() } else { v };
                        (k.into_owned(), v.into_owned())
                    })
                    .collect();
                if !pairs.is_empty() {
                    url.query_pairs_mut().clear().extend_pairs(pairs);
                }
                url.to_string()
            }
            Err(_) => "<unparseable url>".to_string(),
        }
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: HashMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let v = if k.eq_ignore_ascii_case(API_KEY_HEADER) { "[REDACTED]" } else { v.as_str() };
                (k.as_str(), v)
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.redacted_url())
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Sends one request and buffers the whole response.
///
/// Implemented by [`ReqwestTransport`](super::ReqwestTransport) and by the
/// mock transport used in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and wait for the complete response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        let mut headers = HashMap::new();
        headers.insert("X-Goog-Api-Key".to_string(), "AIza-secret".to_string());
        headers.insert("x-request-id".to_string(), "req-9".to_string());
        HttpRequest {
            method: HttpMethod::Post,
            url: "https://example.com/v1beta/models/m:generateContent?key=AIza-secret".to_string(),
            headers,
            body: Some(Bytes::from_static(b"{\"contents\":[]}")),
        }
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = request();
        assert_eq!(request.header("X-REQUEST-ID"), Some("req-9"));
        assert_eq!(request.header("retry-after"), None);
    }

    #[test]
    fn test_debug_redacts_key_and_body() {
        let printed = format!("{:?}", request());
        assert!(!printed.contains("AIza-secret"));
        assert!(!printed.contains("contents"));
        assert!(printed.contains("req-9"));
        assert!(printed.contains("body_len: Some(15)"));
    }
}
