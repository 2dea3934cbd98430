//! Observability: structured logging, spans and metrics.
//!
//! Each component is a trait with a `tracing`-backed implementation and a
//! quiet default, so services can be built with either stack.
//!
//! ```rust
//! use integrations_photo_editor::observability::{create_default_stack, SpanStatus};
//! use serde_json::json;
//!
//! let (logger, tracer, metrics) = create_default_stack("photo_editor");
//!
//! logger.info("Edit started", json!({"operation": "edit"}));
//! let mut span = tracer.start_span("photo_editor.editing.edit");
//! span.set_status(SpanStatus::Ok);
//! span.end();
//! metrics.record_outcome("edit", None, 1500);
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

use std::sync::Arc;

use crate::config::EditorConfig;

pub use logging::{redact_fields, DefaultLogger, Logger, StructuredLogger};
pub use metrics::{DefaultMetricsRecorder, EditorMetrics, MetricsRecorder, TracingMetricsRecorder};
pub use self::tracing::{DefaultTracer, Span, SpanStatus, Tracer, TracingSpan, TracingTracer};

/// Metric name prefix.
pub const METRICS_PREFIX: &str = "photo_editor";

/// Create the `tracing`-backed stack.
pub fn create_default_stack(
    service_name: &str,
) -> (Box<dyn Logger>, Box<dyn Tracer>, EditorMetrics) {
    (
        Box::new(StructuredLogger::new(service_name)),
        Box::new(TracingTracer::new(service_name)),
        EditorMetrics::new(METRICS_PREFIX, Arc::new(TracingMetricsRecorder::new())),
    )
}

/// Create a quiet stack: warnings to stderr, no spans, no metrics.
pub fn create_noop_stack(
    service_name: &str,
) -> (Box<dyn Logger>, Box<dyn Tracer>, EditorMetrics) {
    (
        Box::new(DefaultLogger::new(service_name)),
        Box::new(DefaultTracer::new()),
        EditorMetrics::new(METRICS_PREFIX, Arc::new(DefaultMetricsRecorder::new())),
    )
}

/// Create the stack selected by `config` for one service.
pub fn create_stack_for(
    config: &EditorConfig,
    service_name: &str,
) -> (Box<dyn Logger>, Box<dyn Tracer>, EditorMetrics) {
    let logger: Box<dyn Logger> = if config.enable_tracing {
        Box::new(StructuredLogger::new(service_name).with_level(config.log_level))
    } else {
        Box::new(DefaultLogger::new(service_name).with_level(config.log_level))
    };

    let tracer: Box<dyn Tracer> = if config.enable_tracing {
        Box::new(TracingTracer::new(service_name))
    } else {
        Box::new(DefaultTracer::new())
    };

    let recorder: Arc<dyn MetricsRecorder> = if config.enable_metrics {
        Arc::new(TracingMetricsRecorder::new())
    } else {
        Arc::new(DefaultMetricsRecorder::new())
    };

    (logger, tracer, EditorMetrics::new(METRICS_PREFIX, recorder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;

    #[test]
    fn test_create_default_stack() {
        let (logger, tracer, metrics) = create_default_stack("test");
        logger.info("test", json!({}));
        tracer.start_span("test").end();
        metrics.record_block("edit", "SAFETY");
    }

    #[test]
    fn test_create_noop_stack() {
        let (logger, tracer, _metrics) = create_noop_stack("test");
        logger.debug("test", json!({}));
        tracer.start_span("test").end();
    }

    #[test]
    fn test_create_stack_for_config() {
        let config = EditorConfig::builder()
            .api_key(SecretString::new("k".into()))
            .enable_tracing(false)
            .enable_metrics(false)
            .build()
            .unwrap();
        let (logger, tracer, _metrics) = create_stack_for(&config, "test");
        logger.info("quiet", json!({}));
        tracer.start_span("noop").end();
    }
}
