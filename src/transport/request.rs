//! HTTP request builder for the Gemini API.
//!
//! Joins the API version and endpoint path onto the base URL, applies the
//! configured credential and serializes the JSON body.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::auth::AuthManager;
use crate::error::EditorResult;
use super::http::{HttpRequest, HttpMethod};

/// Header carrying the per-operation correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builder for HTTP requests to the Gemini API.
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl Clone for RequestBuilder {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            api_version: self.api_version.clone(),
            auth_manager: self.auth_manager.clone_box(),
        }
    }
}

impl RequestBuilder {
    /// Creates a new request builder.
    ///
    /// ```no_run
    /// use integrations_photo_editor::transport::RequestBuilder;
    /// use integrations_photo_editor::auth::ApiKeyAuthManager;
    /// use integrations_photo_editor::config::EditorConfig;
    /// use secrecy::SecretString;
    ///
    /// let config = EditorConfig::builder()
    ///     .api_key(SecretString::new("test-key".into()))
    ///     .build()
    ///     .unwrap();
    ///
    /// let builder = RequestBuilder::new(
    ///     config.base_url.clone(),
    ///     config.api_version.clone(),
    ///     Box::new(ApiKeyAuthManager::from_config(&config)),
    /// );
    /// ```
    pub fn new(base_url: Url, api_version: String, auth_manager: Box<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Builds the full URL for `path`, adding the key query parameter when
    /// that auth method is configured.
    pub fn build_url(&self, path: &str) -> EditorResult<Url> {
        let path = path.trim_start_matches('/');
        let version = self.api_version.trim_matches('/');

        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let mut url = base.join(&format!("{version}/{path}"))?;

        if let Some((name, value)) = self.auth_manager.credential().as_query_param() {
            url.query_pairs_mut().append_pair(name, value);
        }

        Ok(url)
    }

    /// Builds an HTTP request with an optional JSON body.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> EditorResult<HttpRequest> {
        let url = self.build_url(path)?;

        let mut headers = HashMap::new();

        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        if let Some((name, value)) = self.auth_manager.credential().as_header() {
            headers.insert(name.to_string(), value.to_string());
        }

        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let body = match body {
            Some(body) => Some(Bytes::from(serde_json::to_vec(body)?)),
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }

    /// Builds a JSON POST tagged with a correlation id.
    pub fn build_json_post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        request_id: &str,
    ) -> EditorResult<HttpRequest> {
        let mut extra = HashMap::new();
        extra.insert(REQUEST_ID_HEADER.to_string(), request_id.to_string());
        self.build_request(HttpMethod::Post, path, Some(body), Some(extra))
    }
}
