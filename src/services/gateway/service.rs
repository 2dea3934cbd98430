//! Gemini-backed model gateway.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::validation::validate_parts;
use super::{ModelGateway, ModelRequest};
use crate::auth::AuthManager;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::observability::{EditorMetrics, Logger, SpanStatus, Tracer};
use crate::transport::{endpoints, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, Role};

/// Gateway calling `models/{model}:generateContent` over an [`HttpTransport`].
pub struct GeminiGateway {
    config: Arc<EditorConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
    tracer: Box<dyn Tracer>,
    metrics: EditorMetrics,
}

impl GeminiGateway {
    /// Create a new gateway.
    pub fn new(
        config: Arc<EditorConfig>,
        transport: Arc<dyn HttpTransport>,
        auth_manager: &dyn AuthManager,
        logger: Box<dyn Logger>,
        tracer: Box<dyn Tracer>,
        metrics: EditorMetrics,
    ) -> Self {
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager.clone_box(),
        );

        Self {
            config,
            transport,
            request_builder,
            logger,
            tracer,
            metrics,
        }
    }

    /// The model every request is sent to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn send(&self, request: ModelRequest) -> EditorResult<GenerateContentResponse> {
        let operation = request.operation.as_str();

        validate_parts(&request.parts)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some(Role::User),
                parts: request.parts,
            }],
        };

        let path = endpoints::generate_content(&self.config.model);
        let http_request = self
            .request_builder
            .build_json_post(&path, &body, &request.request_id)?;

        let start = Instant::now();
        let http_response = self.transport.send(http_request).await.map_err(|e| {
            let error = EditorError::from(e);
            self.logger.error("Model request failed before a response arrived", json!({
                "request_id": request.request_id,
                "operation": operation,
                "error": error.to_string(),
            }));
            error
        })?;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.metrics.record_request(operation, http_response.status, duration_ms);

        let status = http_response.status;
        let response: GenerateContentResponse =
            ResponseParser::parse_response(http_response).map_err(|e| {
                self.logger.error("Model request returned an error", json!({
                    "request_id": request.request_id,
                    "operation": operation,
                    "status": status,
                    "error": e.to_string(),
                }));
                e
            })?;

        if let Some(usage) = &response.usage_metadata {
            self.metrics.record_tokens(
                operation,
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0),
            );
        }

        self.logger.debug("Model response received", json!({
            "request_id": request.request_id,
            "operation": operation,
            "status": status,
            "duration_ms": duration_ms,
            "candidates": response.candidates.as_ref().map_or(0, Vec::len),
            "model_version": response.model_version,
        }));

        Ok(response)
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(&self, request: ModelRequest) -> EditorResult<GenerateContentResponse> {
        let mut span = self.tracer.start_span("photo_editor.gateway.generate");
        span.set_attribute("model", &self.config.model);
        span.set_attribute("operation", request.operation.as_str());
        span.set_attribute("request_id", &request.request_id);
        span.set_attribute("image_parts", &request.image_count().to_string());

        self.logger.debug("Sending model request", json!({
            "request_id": request.request_id,
            "operation": request.operation.as_str(),
            "model": self.config.model,
            "image_parts": request.image_count(),
        }));

        let result = self.send(request).await;

        match &result {
            Ok(response) => {
                let mut attributes = HashMap::new();
                if let Some(reason) = response.finish_reason() {
                    attributes.insert("finish_reason".to_string(), reason.to_string());
                }
                if let Some((reason, _)) = response.block_reason() {
                    attributes.insert("block_reason".to_string(), reason.to_string());
                }
                span.add_event("response.received", Some(attributes));
                span.set_status(SpanStatus::Ok);
            }
            Err(e) => span.set_status(SpanStatus::Error(e.to_string())),
        }
        span.end();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuthManager;
    use crate::error::{RequestError, TransportFailure};
    use crate::mocks::MockHttpTransport;
    use crate::observability::create_noop_stack;
    use crate::types::{Blob, OperationKind, Part};
    use secrecy::SecretString;

    fn gateway(transport: Arc<MockHttpTransport>) -> GeminiGateway {
        let config = EditorConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();
        let auth = ApiKeyAuthManager::from_config(&config);
        let (logger, tracer, metrics) = create_noop_stack("test");
        GeminiGateway::new(Arc::new(config), transport, &auth, logger, tracer, metrics)
    }

    fn request(parts: Vec<Part>) -> ModelRequest {
        ModelRequest {
            operation: OperationKind::Filter,
            request_id: "req-1".to_string(),
            parts,
        }
    }

    fn image() -> Part {
        Part::inline(Blob {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        })
    }

    #[tokio::test]
    async fn test_generate_posts_user_content() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, r#"{"candidates":[]}"#);
        let gateway = gateway(transport.clone());

        gateway
            .generate(request(vec![image(), Part::text("make it teal")]))
            .await
            .unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0]
            .url
            .ends_with("/v1beta/models/gemini-2.5-flash-image-preview:generateContent"));
        assert_eq!(sent[0].headers.get("x-request-id").unwrap(), "req-1");

        let body: serde_json::Value =
            serde_json::from_slice(sent[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(body["contents"][0]["parts"][1]["text"], "make it teal");
    }

    #[tokio::test]
    async fn test_invalid_layout_is_not_sent() {
        let transport = Arc::new(MockHttpTransport::new());
        let gateway = gateway(transport.clone());

        let err = gateway
            .generate(request(vec![Part::text("no image")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EditorError::InvalidRequest(RequestError::InvalidPartLayout { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_mapped() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(401, r#"{"error":{"message":"API key not valid"}}"#);
        let gateway = gateway(transport);

        let err = gateway
            .generate(request(vec![image(), Part::text("x")]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EditorError::Transport(TransportFailure::Authentication {
                message: "API key not valid".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_connection_error_is_transport_failure() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_error(crate::transport::TransportError::Timeout);
        let gateway = gateway(transport);

        let err = gateway
            .generate(request(vec![image(), Part::text("x")]))
            .await
            .unwrap_err();

        assert_eq!(err, EditorError::Transport(TransportFailure::Timeout));
        assert!(err.is_retryable());
    }
}
