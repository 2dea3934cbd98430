//! Turns a model response into an image `data:` URL or a classified error.

use serde_json::json;

use crate::error::{EditorError, EditorResult};
use crate::image::data_url;
use crate::observability::Logger;
use crate::types::{DataUrl, GenerateContentResponse, OperationKind};

/// Classifies a response in strict priority order:
///
/// 1. a non-empty prompt block reason is [`EditorError::BlockedByPolicy`],
///    even when an image is also present;
/// 2. the first inline-data part of the first candidate is the result;
/// 3. a finish reason other than `STOP` is [`EditorError::AbnormalFinish`];
/// 4. anything else is [`EditorError::NoImageReturned`], carrying the
///    model's trimmed text when there is some.
pub fn interpret_response(
    response: &GenerateContentResponse,
    context: OperationKind,
) -> EditorResult<DataUrl> {
    if let Some((reason, message)) = response.block_reason() {
        return Err(EditorError::BlockedByPolicy {
            reason: reason.to_string(),
            message: message.map(str::to_string),
        });
    }

    if let Some(blob) = response.first_inline_data() {
        return Ok(data_url(&blob.mime_type, &blob.data));
    }

    if let Some(reason) = response.finish_reason() {
        if !reason.is_normal() {
            return Err(EditorError::AbnormalFinish {
                context,
                reason: reason.to_string(),
            });
        }
    }

    let text = response
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Err(EditorError::NoImageReturned { context, text })
}

/// [`interpret_response`] with logging of every outcome.
pub struct ResponseInterpreter {
    logger: Box<dyn Logger>,
}

impl ResponseInterpreter {
    /// Create an interpreter logging through `logger`.
    pub fn new(logger: Box<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Classify `response` for the operation `context`.
    pub fn interpret(
        &self,
        response: &GenerateContentResponse,
        context: OperationKind,
        request_id: &str,
    ) -> EditorResult<DataUrl> {
        let result = interpret_response(response, context);

        match &result {
            Ok(url) => self.logger.info("Received image data", json!({
                "request_id": request_id,
                "operation": context.as_str(),
                "result": url,
            })),
            Err(EditorError::BlockedByPolicy { reason, .. }) => self.logger.error("Request was blocked", json!({
                "request_id": request_id,
                "operation": context.as_str(),
                "block_reason": reason,
            })),
            Err(EditorError::AbnormalFinish { reason, .. }) => self.logger.error("Image generation stopped unexpectedly", json!({
                "request_id": request_id,
                "operation": context.as_str(),
                "finish_reason": reason,
            })),
            Err(e) => self.logger.warn("Model response did not contain an image part", json!({
                "request_id": request_id,
                "operation": context.as_str(),
                "error": e.to_string(),
                "finish_reason": response.finish_reason().map(ToString::to_string),
            })),
        }

        result
    }
}
