//! Configuration types for the photo editor client.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;
use crate::error::{EditorError, ConfigurationError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Image-capable model every operation is sent to.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Authentication method for API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use ?key= query parameter.
    QueryParam,
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Configuration for the photo editor client.
#[derive(Clone)]
pub struct EditorConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Model identifier used for every operation.
    pub model: String,
    /// Overall request timeout. `None` waits for the model indefinitely.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Enable tracing spans.
    pub enable_tracing: bool,
    /// Enable metrics.
    pub enable_metrics: bool,
    /// Log level.
    pub log_level: LogLevel,
    /// Authentication method.
    pub auth_method: AuthMethod,
}

impl EditorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::default()
    }

    /// Create configuration from the environment.
    ///
    /// Only the credential is read (`GEMINI_API_KEY`, then `API_KEY`);
    /// everything else takes its default.
    pub fn from_env() -> Result<Self, EditorError> {
        let api_key = api_key_from_env().ok_or(ConfigurationError::MissingApiKey)?;

        Self::builder().api_key(api_key).build()
    }
}

impl std::fmt::Debug for EditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("auth_method", &self.auth_method)
            .finish_non_exhaustive()
    }
}

/// Reads the API key from the first non-empty supported environment variable.
pub fn api_key_from_env() -> Option<SecretString> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .map(SecretString::new)
}

/// Builder for EditorConfig.
#[derive(Default)]
pub struct EditorConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    enable_tracing: Option<bool>,
    enable_metrics: Option<bool>,
    log_level: Option<LogLevel>,
    auth_method: Option<AuthMethod>,
}

impl EditorConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, EditorError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Set an overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enable or disable tracing.
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = Some(enable);
        self
    }

    /// Enable or disable metrics.
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = Some(enable);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<EditorConfig, EditorError> {
        let api_key = self.api_key
            .ok_or(ConfigurationError::MissingApiKey)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "model identifier must not be empty".to_string(),
            }
            .into());
        }

        Ok(EditorConfig {
            api_key,
            base_url,
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            model,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            enable_tracing: self.enable_tracing.unwrap_or(true),
            enable_metrics: self.enable_metrics.unwrap_or(true),
            log_level: self.log_level.unwrap_or_default(),
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}
