//! Client interface and factory for the photo editor.
//!
//! Provides `PhotoEditorClientImpl` with a builder, a lazily constructed
//! editing service and factory functions for client creation.

mod builder;
mod client;
mod traits;

pub use builder::PhotoEditorClientBuilder;
pub use client::{create_client, create_client_from_env, PhotoEditorClientImpl};
pub use traits::PhotoEditorClient;
