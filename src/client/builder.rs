//! Builder for creating photo editor client instances.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::auth::ApiKeyAuthManager;
use crate::config::{api_key_from_env, AuthMethod, EditorConfig, LogLevel};
use crate::error::{ConfigurationError, EditorError};
use crate::observability::create_stack_for;
use crate::services::{GeminiGateway, ModelGateway};
use crate::transport::{HttpTransport, ReqwestTransport};

use super::client::PhotoEditorClientImpl;

/// Builder for a [`PhotoEditorClientImpl`].
///
/// # Example
///
/// ```no_run
/// use integrations_photo_editor::PhotoEditorClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PhotoEditorClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PhotoEditorClientBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auth_method: Option<AuthMethod>,
    log_level: Option<LogLevel>,
    enable_tracing: Option<bool>,
    enable_metrics: Option<bool>,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    gateway: Option<Arc<dyn ModelGateway>>,
}

impl PhotoEditorClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: EditorConfig) -> Self {
        Self {
            api_key: Some(config.api_key),
            base_url: Some(config.base_url),
            api_version: Some(config.api_version),
            model: Some(config.model),
            timeout: config.timeout,
            connect_timeout: Some(config.connect_timeout),
            auth_method: Some(config.auth_method),
            log_level: Some(config.log_level),
            enable_tracing: Some(config.enable_tracing),
            enable_metrics: Some(config.enable_metrics),
            transport: None,
            gateway: None,
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL for the API.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the base URL from a string.
    pub fn base_url_str(mut self, url: &str) -> Result<Self, EditorError> {
        self.base_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets an overall request timeout. Without one, requests wait for the
    /// model as long as it takes.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Sets the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Enables or disables `tracing` spans and structured logs.
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = Some(enable);
        self
    }

    /// Enables or disables metrics.
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = Some(enable);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom model gateway, bypassing HTTP entirely (for testing).
    pub fn gateway(mut self, gateway: Arc<dyn ModelGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no API key was given and none is set in `GEMINI_API_KEY` or `API_KEY`
    /// - a configuration value is invalid
    /// - the HTTP transport cannot be created
    pub fn build(self) -> Result<PhotoEditorClientImpl, EditorError> {
        let api_key = self
            .api_key
            .or_else(api_key_from_env)
            .ok_or(ConfigurationError::MissingApiKey)?;

        let mut config = EditorConfig::builder().api_key(api_key);
        if let Some(url) = &self.base_url {
            config = config.base_url(url.as_str())?;
        }
        if let Some(version) = &self.api_version {
            config = config.api_version(version);
        }
        if let Some(model) = &self.model {
            config = config.model(model);
        }
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            config = config.connect_timeout(timeout);
        }
        if let Some(method) = self.auth_method {
            config = config.auth_method(method);
        }
        if let Some(level) = self.log_level {
            config = config.log_level(level);
        }
        if let Some(enable) = self.enable_tracing {
            config = config.enable_tracing(enable);
        }
        if let Some(enable) = self.enable_metrics {
            config = config.enable_metrics(enable);
        }
        let config = Arc::new(config.build()?);

        let (logger, _, _) = create_stack_for(&config, "client");

        let gateway: Arc<dyn ModelGateway> = match self.gateway {
            Some(gateway) => gateway,
            None => {
                let transport: Arc<dyn HttpTransport> = match self.transport {
                    Some(t) => t,
                    None => Arc::new(ReqwestTransport::new(config.timeout, config.connect_timeout)?),
                };
                let auth_manager = ApiKeyAuthManager::from_config(&config);
                let (gateway_logger, tracer, metrics) = create_stack_for(&config, "gateway");

                Arc::new(GeminiGateway::new(
                    Arc::clone(&config),
                    transport,
                    &auth_manager,
                    gateway_logger,
                    tracer,
                    metrics,
                ))
            }
        };

        logger.info(
            "Photo editor client initialized",
            serde_json::json!({
                "base_url": config.base_url.as_str(),
                "api_version": config.api_version,
                "model": config.model,
                "auth_method": format!("{:?}", config.auth_method),
            }),
        );

        Ok(PhotoEditorClientImpl::from_parts(config, gateway))
    }
}
