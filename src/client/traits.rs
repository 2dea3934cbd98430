//! Client trait definitions.

use crate::config::EditorConfig;
use crate::services::{EditingService, ModelGateway};

/// Entry point to the photo editing operations.
pub trait PhotoEditorClient: Send + Sync {
    /// Access the editing service.
    fn editing(&self) -> &dyn EditingService;

    /// Access the underlying model gateway.
    fn gateway(&self) -> &dyn ModelGateway;

    /// The configuration the client was built with.
    fn config(&self) -> &EditorConfig;
}
