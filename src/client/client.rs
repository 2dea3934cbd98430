//! Main client implementation.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::observability::create_stack_for;
use crate::services::{EditingService, EditingServiceImpl, ModelGateway, ResponseInterpreter};

use super::builder::PhotoEditorClientBuilder;
use super::traits::PhotoEditorClient;

/// Photo editor client.
///
/// The editing service is created on first access and shared afterwards.
///
/// # Example
///
/// ```no_run
/// use integrations_photo_editor::{FilterRequest, ImageSource, PhotoEditorClient, PhotoEditorClientImpl};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PhotoEditorClientImpl::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .build()?;
///
/// let url = client
///     .editing()
///     .filter(FilterRequest {
///         image: ImageSource::path("photo.jpg"),
///         prompt: "Anime style".to_string(),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct PhotoEditorClientImpl {
    config: Arc<EditorConfig>,
    gateway: Arc<dyn ModelGateway>,
    editing_service: OnceCell<EditingServiceImpl>,
}

impl PhotoEditorClientImpl {
    /// Creates a new client builder.
    pub fn builder() -> PhotoEditorClientBuilder {
        PhotoEditorClientBuilder::new()
    }

    /// Creates a client from a configuration object.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        PhotoEditorClientBuilder::from_config(config).build()
    }

    /// Creates a client with the API key from `GEMINI_API_KEY` or `API_KEY`.
    pub fn from_env() -> EditorResult<Self> {
        Self::new(EditorConfig::from_env()?)
    }

    pub(super) fn from_parts(config: Arc<EditorConfig>, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            config,
            gateway,
            editing_service: OnceCell::new(),
        }
    }
}

impl PhotoEditorClient for PhotoEditorClientImpl {
    fn editing(&self) -> &dyn EditingService {
        self.editing_service.get_or_init(|| {
            let (logger, tracer, metrics) = create_stack_for(&self.config, "editing");
            let (interpreter_logger, _, _) = create_stack_for(&self.config, "interpreter");
            EditingServiceImpl::new(
                Arc::clone(&self.gateway),
                ResponseInterpreter::new(interpreter_logger),
                logger,
                tracer,
                metrics,
            )
        })
    }

    fn gateway(&self) -> &dyn ModelGateway {
        self.gateway.as_ref()
    }

    fn config(&self) -> &EditorConfig {
        &self.config
    }
}

impl std::fmt::Debug for PhotoEditorClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoEditorClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Create a client from configuration.
pub fn create_client(config: EditorConfig) -> EditorResult<Arc<dyn PhotoEditorClient>> {
    Ok(Arc::new(PhotoEditorClientImpl::new(config)?))
}

/// Create a client from environment variables.
pub fn create_client_from_env() -> EditorResult<Arc<dyn PhotoEditorClient>> {
    create_client(EditorConfig::from_env()?)
}
