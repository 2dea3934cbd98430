//! Credential placement for outgoing model requests.
//!
//! The Gemini endpoint accepts the API key either in the `x-goog-api-key`
//! header or in the `key` query parameter. An [`AuthManager`] decides which
//! one a request carries; the request builder only applies the answer.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::{AuthMethod, EditorConfig};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "key";

/// A credential ready to be attached to one request.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as a request header.
    Header {
        /// Header name.
        name: &'static str,
        /// Header value.
        value: String,
    },
    /// Appended to the URL query string.
    QueryParam {
        /// Parameter name.
        name: &'static str,
        /// Parameter value.
        value: String,
    },
}

impl Credential {
    /// The header to add, if this credential travels as one.
    pub fn as_header(&self) -> Option<(&str, &str)> {
        match self {
            Credential::Header { name, value } => Some((name, value)),
            Credential::QueryParam { .. } => None,
        }
    }

    /// The query pair to add, if this credential travels in the URL.
    pub fn as_query_param(&self) -> Option<(&str, &str)> {
        match self {
            Credential::QueryParam { name, value } => Some((name, value)),
            Credential::Header { .. } => None,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (placement, name) = match self {
            Credential::Header { name, .. } => ("Header", name),
            Credential::QueryParam { name, .. } => ("QueryParam", name),
        };
        f.debug_struct(placement)
            .field("name", name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the credential for each outgoing request.
pub trait AuthManager: Send + Sync {
    /// Credential for the next request.
    fn credential(&self) -> Credential;

    /// Boxed copy, so request builders can be cloned.
    fn clone_box(&self) -> Box<dyn AuthManager>;
}

/// Static API key, placed according to an [`AuthMethod`].
#[derive(Clone)]
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    placement: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Key `api_key`, sent the way `placement` says.
    pub fn new(api_key: SecretString, placement: AuthMethod) -> Self {
        Self { api_key, placement }
    }

    /// Key and placement taken from the editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }

    /// How the key is attached.
    pub fn placement(&self) -> AuthMethod {
        self.placement
    }
}

impl fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("api_key", &"[REDACTED]")
            .field("placement", &self.placement)
            .finish()
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn credential(&self) -> Credential {
        let value = self.api_key.expose_secret().to_string();
        match self.placement {
            AuthMethod::Header => Credential::Header {
                name: API_KEY_HEADER,
                value,
            },
            AuthMethod::QueryParam => Credential::QueryParam {
                name: API_KEY_QUERY_PARAM,
                value,
            },
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}
