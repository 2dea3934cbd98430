//! Span tracking for editing operations.
//!
//! Spans are reported as one `tracing` event when they end. `operation`,
//! `request_id` and `model` are promoted to structured fields so log
//! pipelines can filter on them; any other attribute travels in `extra`.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Tracer trait for creating spans.
pub trait Tracer: Send + Sync {
    /// Start a new span, for example `photo_editor.gateway.generate`.
    fn start_span(&self, name: &str) -> Box<dyn Span>;
}

/// A traced operation.
pub trait Span: Send {
    /// Set an attribute on the span.
    fn set_attribute(&mut self, key: &str, value: &str);

    /// Set the span status.
    fn set_status(&mut self, status: SpanStatus);

    /// Record an event on the span.
    fn add_event(&mut self, name: &str, attributes: Option<HashMap<String, String>>);

    /// End the span and record its duration.
    fn end(self: Box<Self>);
}

/// Status of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanStatus {
    /// Operation completed successfully.
    Ok,
    /// Operation failed with an error message.
    Error(String),
}

/// Tracer that reports spans as `tracing` events.
pub struct TracingTracer {
    service_name: String,
}

impl TracingTracer {
    /// Tracer reporting under `service_name`.
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
        }
    }
}

impl Tracer for TracingTracer {
    fn start_span(&self, name: &str) -> Box<dyn Span> {
        Box::new(TracingSpan::started(&self.service_name, name))
    }
}

/// Span buffered in memory and reported through `tracing` when it ends.
pub struct TracingSpan {
    name: String,
    service_name: String,
    start: Instant,
    attributes: BTreeMap<String, String>,
    events: Vec<String>,
    status: Option<SpanStatus>,
}

impl TracingSpan {
    fn started(service_name: &str, name: &str) -> Self {
        tracing::trace!(service = %service_name, span_name = %name, "Span started");
        Self {
            name: name.to_string(),
            service_name: service_name.to_string(),
            start: Instant::now(),
            attributes: BTreeMap::new(),
            events: Vec::new(),
            status: None,
        }
    }

    /// Attribute value previously set on the span.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Names of the events recorded so far, in order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    fn field(&self, key: &str) -> &str {
        self.attribute(key).unwrap_or("")
    }

    fn extra(&self) -> BTreeMap<&str, &str> {
        self.attributes
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "operation" | "request_id" | "model"))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl Span for TracingSpan {
    fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    fn set_status(&mut self, status: SpanStatus) {
        self.status = Some(status);
    }

    fn add_event(&mut self, name: &str, attributes: Option<HashMap<String, String>>) {
        tracing::debug!(
            span_name = %self.name,
            request_id = %self.field("request_id"),
            event_name = %name,
            event_attributes = ?attributes.unwrap_or_default(),
            "Span event"
        );
        self.events.push(name.to_string());
    }

    fn end(self: Box<Self>) {
        let duration_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &self.status {
            Some(SpanStatus::Error(error)) => tracing::warn!(
                service = %self.service_name,
                span_name = %self.name,
                operation = %self.field("operation"),
                request_id = %self.field("request_id"),
                model = %self.field("model"),
                duration_ms,
                error = %error,
                extra = ?self.extra(),
                events = ?self.events,
                "Span failed"
            ),
            status => tracing::info!(
                service = %self.service_name,
                span_name = %self.name,
                operation = %self.field("operation"),
                request_id = %self.field("request_id"),
                model = %self.field("model"),
                duration_ms,
                status = if status.is_some() { "ok" } else { "unset" },
                extra = ?self.extra(),
                events = ?self.events,
                "Span ended"
            ),
        }
    }
}

/// No-op tracer used when tracing is disabled.
#[derive(Default)]
pub struct DefaultTracer;

impl DefaultTracer {
    /// Creates a new no-op tracer.
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for DefaultTracer {
    fn start_span(&self, _name: &str) -> Box<dyn Span> {
        Box::new(NoOpSpan)
    }
}

struct NoOpSpan;

impl Span for NoOpSpan {
    fn set_attribute(&mut self, _key: &str, _value: &str) {}
    fn set_status(&mut self, _status: SpanStatus) {}
    fn add_event(&mut self, _name: &str, _attributes: Option<HashMap<String, String>>) {}
    fn end(self: Box<Self>) {}
}
