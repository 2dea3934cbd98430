//! Model gateway: one `generateContent` round trip per editing operation.

mod service;
mod validation;

use async_trait::async_trait;

use crate::error::EditorResult;
use crate::types::{GenerateContentResponse, OperationKind, Part};

pub use service::GeminiGateway;
pub use validation::{validate_parts, MAX_IMAGE_PARTS};

/// Parts for a single model call plus the labels used to observe it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Operation the call belongs to.
    pub operation: OperationKind,
    /// Correlation id shared by logs, spans and the outgoing request.
    pub request_id: String,
    /// Image parts in order, followed by exactly one text part.
    pub parts: Vec<Part>,
}

impl ModelRequest {
    /// Number of inline image parts.
    pub fn image_count(&self) -> usize {
        self.parts.iter().filter(|p| p.is_inline()).count()
    }

    /// The instruction text, if the final part carries one.
    pub fn instruction(&self) -> Option<&str> {
        self.parts.last().and_then(|p| p.text.as_deref())
    }
}

/// Sends multimodal requests to the image model.
///
/// Implementations perform exactly one remote call per invocation: no
/// retries, no streaming.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends the parts and returns the parsed response.
    async fn generate(&self, request: ModelRequest) -> EditorResult<GenerateContentResponse>;
}
