//! Core types for the photo editor.
//!
//! Wire types for the Gemini `generateContent` call and the typed operation
//! requests that the editing UI fills in.

// Module declarations
pub mod content;
pub mod generation;
pub mod operations;

// Re-exports for content types
pub use content::{Blob, Content, Part, Role};

// Re-exports for generation types
pub use generation::{
    Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse, PromptFeedback,
    UsageMetadata,
};

// Re-exports for operation types
pub use operations::{
    AdjustRequest, AspectRatio, BackgroundFill, CompositeRequest, DataUrl, EditRequest, ExpandRequest,
    FilterRequest, HexColor, Hotspot, OperationKind, OperationRequest, RemoveBackgroundRequest,
};
