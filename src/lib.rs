//! # Photo Editor
//!
//! Generative photo editing over the Google Gemini image model.
//!
//! ## Features
//!
//! - Localized edits around a hotspot, stylistic filters, global adjustments
//! - Canvas expansion (outpainting) with aspect-ratio presets and mask derivation
//! - Two-image composition and background removal
//! - Inline image encoding from files, bytes or `data:` URLs with MIME sniffing
//! - Strict response interpretation: policy blocks, abnormal finishes and
//!   text-only answers each surface as their own error
//! - Observability through `tracing` (structured logs, spans, metrics)
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_photo_editor::{create_client_from_env, EditRequest, Hotspot, ImageSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client_from_env()?;
//!
//!     let url = client
//!         .editing()
//!         .edit(EditRequest {
//!             image: ImageSource::path("portrait.jpg"),
//!             prompt: "remove the coffee mug".to_string(),
//!             hotspot: Hotspot::new(412, 87),
//!         })
//!         .await?;
//!
//!     println!("{}", &url[..40]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - client interface, builder and factory functions
//! - `config` - configuration types and builder
//! - `auth` - API key authentication
//! - `transport` - HTTP transport, request building and response parsing
//! - `error` - error types and taxonomy
//! - `types` - wire types and operation requests
//! - `image` - image encoding and canvas preparation
//! - `prompts` - instruction templates
//! - `services` - model gateway, response interpreter and editing operations
//! - `observability` - logging, tracing and metrics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod observability;
pub mod prompts;
pub mod services;
pub mod transport;
pub mod types;

// Test support, also used by the integration tests under `tests/`.
pub mod fixtures;
pub mod mocks;

pub use auth::{ApiKeyAuthManager, AuthManager, Credential};
pub use client::{
    create_client, create_client_from_env, PhotoEditorClient, PhotoEditorClientBuilder,
    PhotoEditorClientImpl,
};
pub use config::{
    AuthMethod, EditorConfig, EditorConfigBuilder, LogLevel, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MODEL,
};
pub use error::{
    map_http_status, map_http_status_with_body, ConfigurationError, EditorError, EditorResult,
    ErrorKind, RequestError, TransportFailure,
};
pub use crate::image::{ExpandCanvas, ImageEncoder, ImagePart, ImageSource, PreparedCanvas};
pub use services::{
    interpret_response, EditingService, EditingServiceImpl, GeminiGateway, ModelGateway,
    ModelRequest, ResponseInterpreter,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
pub use types::{
    AdjustRequest, AspectRatio, BackgroundFill, CompositeRequest, DataUrl, EditRequest,
    ExpandRequest, FilterRequest, GenerateContentResponse, HexColor, Hotspot, OperationKind,
    OperationRequest, RemoveBackgroundRequest,
};
