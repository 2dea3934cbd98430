//! Mock implementations for testing.
//!
//! Transport, authentication, gateway and metrics doubles that let the
//! editing pipeline run without the network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::auth::{AuthManager, Credential};
use crate::error::EditorResult;
use crate::observability::MetricsRecorder;
use crate::services::gateway::{ModelGateway, ModelRequest};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::{Blob, Candidate, Content, FinishReason, GenerateContentResponse, Part, Role};

type Labels = Vec<(String, String)>;

/// Mock HTTP transport.
///
/// Responses are returned in the order they were enqueued; every request is
/// recorded. An empty queue answers with a connection error.
///
/// # Example
///
/// ```
/// use integrations_photo_editor::mocks::MockHttpTransport;
/// use integrations_photo_editor::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"candidates": []}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Post,
///     url: "https://example.com".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # }
/// ```
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the next response.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue a transport error.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Asserts that exactly `expected` requests were sent.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.requests.lock().unwrap().len();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection(
                    "No response configured in MockHttpTransport".to_string(),
                ))
            })
    }
}

/// Mock authentication manager.
///
/// ```
/// use integrations_photo_editor::mocks::MockAuthManager;
/// use integrations_photo_editor::auth::AuthManager;
///
/// let auth = MockAuthManager::new("test-api-key");
/// assert_eq!(
///     auth.credential().as_header(),
///     Some(("x-goog-api-key", "test-api-key"))
/// );
/// ```
#[derive(Clone)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Header authentication with `api_key`.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Query parameter authentication with `api_key`.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn credential(&self) -> Credential {
        let value = self.api_key.clone();
        if self.use_header {
            Credential::Header {
                name: "x-goog-api-key",
                value,
            }
        } else {
            Credential::QueryParam { name: "key", value }
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}

/// Mock model gateway.
///
/// Records every [`ModelRequest`] and answers from a queue. With nothing
/// queued it answers with a single PNG part so happy-path tests need no
/// setup.
#[derive(Default)]
pub struct MockModelGateway {
    responses: Mutex<VecDeque<EditorResult<GenerateContentResponse>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl MockModelGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the next result.
    pub fn enqueue(&self, result: EditorResult<GenerateContentResponse>) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// Enqueue a successful response.
    pub fn enqueue_response(&self, response: GenerateContentResponse) {
        self.enqueue(Ok(response));
    }

    /// Enqueue a response parsed from JSON.
    pub fn enqueue_json(&self, body: &str) {
        let response = serde_json::from_str(body).unwrap();
        self.enqueue_response(response);
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A response holding one inline image and a normal finish.
pub fn image_response(mime_type: &str, data: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: Some(Role::Model),
                parts: vec![Part::inline(Blob {
                    mime_type: mime_type.to_string(),
                    data: data.to_string(),
                })],
            }),
            finish_reason: Some(FinishReason::new(FinishReason::STOP)),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

#[async_trait]
impl ModelGateway for MockModelGateway {
    async fn generate(&self, request: ModelRequest) -> EditorResult<GenerateContentResponse> {
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(image_response("image/png", "iVBORw0KGgo=")))
    }
}

/// Mock metrics recorder capturing every call.
#[derive(Default)]
pub struct MockMetricsRecorder {
    counters: Mutex<Vec<(String, Labels)>>,
    histograms: Mutex<Vec<(String, f64, Labels)>>,
    gauges: Mutex<Vec<(String, f64, Labels)>>,
}

impl MockMetricsRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter increments in call order.
    pub fn counters(&self) -> Vec<(String, Labels)> {
        self.counters.lock().unwrap().clone()
    }

    /// Histogram observations in call order.
    pub fn histograms(&self) -> Vec<(String, f64, Labels)> {
        self.histograms.lock().unwrap().clone()
    }

    /// Gauge values in call order.
    pub fn gauges(&self) -> Vec<(String, f64, Labels)> {
        self.gauges.lock().unwrap().clone()
    }

    /// Counter increments recorded under `name`.
    pub fn counter_count(&self, name: &str) -> usize {
        self.counters
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .count()
    }
}

fn owned(labels: &[(&str, &str)]) -> Labels {
    labels
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl MetricsRecorder for MockMetricsRecorder {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        self.counters
            .lock()
            .unwrap()
            .push((name.to_string(), owned(labels)));
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.histograms
            .lock()
            .unwrap()
            .push((name.to_string(), value, owned(labels)));
    }

    fn record_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.gauges
            .lock()
            .unwrap()
            .push((name.to_string(), value, owned(labels)));
    }
}
