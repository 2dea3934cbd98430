//! Reqwest-based HTTP transport implementation.

use super::http::{HttpTransport, HttpRequest, HttpResponse, HttpMethod};
use super::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Reqwest-based HTTP transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport.
    ///
    /// Without a `timeout` the client waits for the model as long as the
    /// connection stays open; image generation can take tens of seconds.
    pub fn new(timeout: Option<Duration>, connect_timeout: Duration) -> Result<Self, TransportError> {
        let mut builder = Client::builder().connect_timeout(connect_timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    fn convert_headers(headers: HashMap<String, String>) -> reqwest::header::HeaderMap {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(&value),
            ) {
                header_map.insert(name, val);
            }
        }
        header_map
    }

    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Send,
    ReadBody,
}

/// Converts a reqwest failure, dropping the URL from the message since it
/// may carry `?key=`.
fn map_reqwest_error(error: reqwest::Error, stage: Stage) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout;
    }
    let error = error.without_url();
    match stage {
        Stage::Send => TransportError::Connection(error.to_string()),
        Stage::ReadBody => TransportError::Request(format!("Failed to read response body: {error}")),
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self.client
            .request(Self::convert_method(request.method), &request.url)
            .headers(Self::convert_headers(request.headers));

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, Stage::Send))?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, Stage::ReadBody))?;

        Ok(HttpResponse { status, headers, body })
    }
}
