//! Editing operations: edit, filter, adjust, expand, composite and
//! background removal.

mod service;
mod validation;

use async_trait::async_trait;

use crate::error::EditorResult;
use crate::types::{
    AdjustRequest, CompositeRequest, DataUrl, EditRequest, ExpandRequest, FilterRequest,
    OperationRequest, RemoveBackgroundRequest,
};

pub use service::EditingServiceImpl;
pub use validation::{validate_hotspot, validate_prompt};

/// Generative photo editing over a model gateway.
///
/// Every operation validates its parameters, encodes the image(s), builds
/// the instruction, performs one model call and interprets the response.
/// Successful results are `data:` URLs.
#[async_trait]
pub trait EditingService: Send + Sync {
    /// Localized edit around a hotspot.
    async fn edit(&self, request: EditRequest) -> EditorResult<DataUrl>;

    /// Stylistic filter over the whole image.
    async fn filter(&self, request: FilterRequest) -> EditorResult<DataUrl>;

    /// Global photographic adjustment.
    async fn adjust(&self, request: AdjustRequest) -> EditorResult<DataUrl>;

    /// Generative fill of transparent or masked regions.
    async fn expand(&self, request: ExpandRequest) -> EditorResult<DataUrl>;

    /// Insertion of a second image into a background.
    async fn composite(&self, request: CompositeRequest) -> EditorResult<DataUrl>;

    /// Subject cut-out onto a transparent or solid background.
    async fn remove_background(&self, request: RemoveBackgroundRequest) -> EditorResult<DataUrl>;

    /// Dispatches any [`OperationRequest`].
    async fn apply(&self, request: OperationRequest) -> EditorResult<DataUrl> {
        match request {
            OperationRequest::Edit(r) => self.edit(r).await,
            OperationRequest::Filter(r) => self.filter(r).await,
            OperationRequest::Adjust(r) => self.adjust(r).await,
            OperationRequest::Expand(r) => self.expand(r).await,
            OperationRequest::Composite(r) => self.composite(r).await,
            OperationRequest::RemoveBackground(r) => self.remove_background(r).await,
        }
    }
}
