//! Editing service implementation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use super::validation::{validate_hotspot, validate_mask_dimensions, validate_prompt};
use super::EditingService;
use crate::error::EditorResult;
use crate::image::{mask_from_alpha, ImageEncoder, ImagePart};
use crate::observability::{EditorMetrics, Logger, SpanStatus, Tracer};
use crate::prompts;
use crate::services::gateway::{ModelGateway, ModelRequest};
use crate::services::interpreter::ResponseInterpreter;
use crate::types::{
    AdjustRequest, CompositeRequest, DataUrl, EditRequest, ExpandRequest, FilterRequest,
    OperationKind, Part, RemoveBackgroundRequest,
};

/// [`EditingService`] backed by a [`ModelGateway`].
///
/// Holds no per-request state; concurrent operations are independent.
pub struct EditingServiceImpl {
    gateway: Arc<dyn ModelGateway>,
    encoder: ImageEncoder,
    interpreter: ResponseInterpreter,
    logger: Box<dyn Logger>,
    tracer: Box<dyn Tracer>,
    metrics: EditorMetrics,
}

impl EditingServiceImpl {
    /// Create a new editing service.
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        interpreter: ResponseInterpreter,
        logger: Box<dyn Logger>,
        tracer: Box<dyn Tracer>,
        metrics: EditorMetrics,
    ) -> Self {
        Self {
            gateway,
            encoder: ImageEncoder::new(),
            interpreter,
            logger,
            tracer,
            metrics,
        }
    }

    /// Sends `images` followed by `instruction` and interprets the answer.
    async fn run(
        &self,
        operation: OperationKind,
        request_id: String,
        images: Vec<ImagePart>,
        instruction: String,
    ) -> EditorResult<DataUrl> {
        let payload_bytes: usize = images.iter().map(|image| image.data().len()).sum();
        self.metrics.record_payload(operation.as_str(), images.len(), payload_bytes);

        let parts: Vec<Part> = images
            .into_iter()
            .map(Part::from)
            .chain(std::iter::once(Part::text(instruction)))
            .collect();

        let response = self
            .gateway
            .generate(ModelRequest {
                operation,
                request_id: request_id.clone(),
                parts,
            })
            .await?;

        if let Some((reason, _)) = response.block_reason() {
            self.metrics.record_block(operation.as_str(), reason);
        }

        self.interpreter.interpret(&response, operation, &request_id)
    }

    /// Wraps one operation in a span, logging and outcome metrics.
    async fn observe<F>(
        &self,
        operation: OperationKind,
        request_id: &str,
        body: F,
    ) -> EditorResult<DataUrl>
    where
        F: std::future::Future<Output = EditorResult<DataUrl>> + Send,
    {
        let start = Instant::now();

        let mut span = self
            .tracer
            .start_span(&format!("photo_editor.editing.{}", operation.as_str()));
        span.set_attribute("operation", operation.as_str());
        span.set_attribute("request_id", request_id);

        let result = body.await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.metrics
            .record_outcome(operation.as_str(), result.as_ref().err().map(|e| e.kind()), duration_ms);

        match &result {
            Ok(_) => {
                span.set_status(SpanStatus::Ok);
                self.logger.info("Operation completed", json!({
                    "request_id": request_id,
                    "operation": operation.as_str(),
                    "duration_ms": duration_ms,
                }));
            }
            Err(e) => {
                span.set_status(SpanStatus::Error(e.to_string()));
                self.logger.warn("Operation failed", json!({
                    "request_id": request_id,
                    "operation": operation.as_str(),
                    "error_kind": e.kind().to_string(),
                    "retryable": e.is_retryable(),
                    "duration_ms": duration_ms,
                }));
            }
        }
        span.end();

        result
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl EditingService for EditingServiceImpl {
    async fn edit(&self, request: EditRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::Edit;
        let request_id = new_request_id();

        let body = async {
            validate_prompt(operation, &request.prompt)?;

            let image = self.encoder.load(&request.image).await?;
            validate_hotspot(request.hotspot, image.dimensions())?;

            self.logger.debug("Starting generative edit", json!({
                "request_id": request_id,
                "hotspot": {"x": request.hotspot.x, "y": request.hotspot.y},
                "source": request.image.describe(),
            }));

            let instruction = prompts::edit(&request.prompt, request.hotspot);
            self.run(operation, request_id.clone(), vec![image.into_part()], instruction)
                .await
        };

        self.observe(operation, &request_id, body).await
    }

    async fn filter(&self, request: FilterRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::Filter;
        let request_id = new_request_id();

        let body = async {
            validate_prompt(operation, &request.prompt)?;
            let image = self.encoder.encode(&request.image).await?;
            let instruction = prompts::filter(&request.prompt);
            self.run(operation, request_id.clone(), vec![image], instruction).await
        };

        self.observe(operation, &request_id, body).await
    }

    async fn adjust(&self, request: AdjustRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::Adjust;
        let request_id = new_request_id();

        let body = async {
            validate_prompt(operation, &request.prompt)?;
            let image = self.encoder.encode(&request.image).await?;
            let instruction = prompts::adjust(&request.prompt);
            self.run(operation, request_id.clone(), vec![image], instruction).await
        };

        self.observe(operation, &request_id, body).await
    }

    async fn expand(&self, request: ExpandRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::Expand;
        let request_id = new_request_id();

        let body = async {
            let base = self.encoder.load(&request.image).await?;

            // The model always gets base + mask + text.
            let mask = match &request.mask {
                Some(mask) => {
                    let mask = self.encoder.load(mask).await?;
                    validate_mask_dimensions(base.dimensions(), mask.dimensions())?;
                    mask.into_part()
                }
                None => {
                    self.logger.debug("Deriving expand mask from transparency", json!({
                        "request_id": request_id,
                        "source": request.image.describe(),
                    }));
                    let mask = mask_from_alpha(&base.bytes)?;
                    ImagePart::from_bytes(mime::IMAGE_PNG.as_ref(), &mask)
                }
            };

            let instruction = prompts::expand(&request.prompt);
            self.run(operation, request_id.clone(), vec![base.into_part(), mask], instruction)
                .await
        };

        self.observe(operation, &request_id, body).await
    }

    async fn composite(&self, request: CompositeRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::Composite;
        let request_id = new_request_id();

        let body = async {
            let background = self.encoder.encode(&request.background).await?;
            let insert = self.encoder.encode(&request.insert).await?;
            let instruction = prompts::composite();
            self.run(operation, request_id.clone(), vec![background, insert], instruction)
                .await
        };

        self.observe(operation, &request_id, body).await
    }

    async fn remove_background(&self, request: RemoveBackgroundRequest) -> EditorResult<DataUrl> {
        let operation = OperationKind::RemoveBackground;
        let request_id = new_request_id();

        let body = async {
            let image = self.encoder.encode(&request.image).await?;
            let instruction = prompts::remove_background(&request.fill);
            self.run(operation, request_id.clone(), vec![image], instruction).await
        };

        self.observe(operation, &request_id, body).await
    }
}
