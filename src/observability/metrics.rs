//! Metrics for editing operations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ErrorKind;

/// Metrics recorder trait.
pub trait MetricsRecorder: Send + Sync {
    /// Increment a counter metric.
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]);

    /// Record a histogram value.
    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]);

    /// Record a gauge value.
    fn record_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]);
}

/// Editor-level metrics on top of a [`MetricsRecorder`].
///
/// Every metric name is prefixed, for example `photo_editor_operations_total`.
#[derive(Clone)]
pub struct EditorMetrics {
    prefix: String,
    recorder: Arc<dyn MetricsRecorder>,
}

impl EditorMetrics {
    /// Create a new metrics wrapper.
    pub fn new(prefix: &str, recorder: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            prefix: prefix.to_string(),
            recorder,
        }
    }

    /// Record one HTTP round trip to the model.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_request(&self, operation: &str, status: u16, duration_ms: u64) {
        let status = status.to_string();
        self.recorder.increment_counter(
            &format!("{}_requests_total", self.prefix),
            &[("operation", operation), ("status", &status)],
        );
        self.recorder.record_histogram(
            &format!("{}_request_duration_ms", self.prefix),
            duration_ms as f64,
            &[("operation", operation)],
        );
    }

    /// Record the final outcome of an operation; `None` means an image was
    /// returned.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_outcome(&self, operation: &str, error: Option<ErrorKind>, duration_ms: u64) {
        let outcome = error.map_or_else(|| "success".to_string(), |kind| kind.to_string());
        self.recorder.increment_counter(
            &format!("{}_operations_total", self.prefix),
            &[("operation", operation), ("outcome", &outcome)],
        );
        self.recorder.record_histogram(
            &format!("{}_operation_duration_ms", self.prefix),
            duration_ms as f64,
            &[("operation", operation)],
        );
    }

    /// Record the size of the inline payload sent to the model.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_payload(&self, operation: &str, images: usize, base64_bytes: usize) {
        self.recorder.record_histogram(
            &format!("{}_payload_bytes", self.prefix),
            base64_bytes as f64,
            &[("operation", operation)],
        );
        self.recorder.record_gauge(
            &format!("{}_images_per_request", self.prefix),
            images as f64,
            &[("operation", operation)],
        );
    }

    /// Record a prompt rejected by the safety system.
    pub fn record_block(&self, operation: &str, reason: &str) {
        self.recorder.increment_counter(
            &format!("{}_blocked_total", self.prefix),
            &[("operation", operation), ("reason", reason)],
        );
    }

    /// Record token usage reported by the model.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_tokens(&self, operation: &str, prompt_tokens: i32, candidate_tokens: i32) {
        self.recorder.record_histogram(
            &format!("{}_prompt_tokens", self.prefix),
            f64::from(prompt_tokens),
            &[("operation", operation)],
        );
        self.recorder.record_histogram(
            &format!("{}_candidate_tokens", self.prefix),
            f64::from(candidate_tokens),
            &[("operation", operation)],
        );
    }
}

/// Recorder emitting metrics as `tracing` events.
#[derive(Default)]
pub struct TracingMetricsRecorder;

impl TracingMetricsRecorder {
    /// Create a new tracing metrics recorder.
    pub fn new() -> Self {
        Self
    }
}

impl MetricsRecorder for TracingMetricsRecorder {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        let labels: HashMap<&str, &str> = labels.iter().copied().collect();
        tracing::debug!(metric_type = "counter", metric_name = name, metric_value = 1, labels = ?labels, "metric");
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let labels: HashMap<&str, &str> = labels.iter().copied().collect();
        tracing::debug!(metric_type = "histogram", metric_name = name, metric_value = value, labels = ?labels, "metric");
    }

    fn record_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let labels: HashMap<&str, &str> = labels.iter().copied().collect();
        tracing::debug!(metric_type = "gauge", metric_name = name, metric_value = value, labels = ?labels, "metric");
    }
}

/// No-op recorder used when metrics are disabled.
#[derive(Default)]
pub struct DefaultMetricsRecorder;

impl DefaultMetricsRecorder {
    /// Creates a new no-op recorder.
    pub fn new() -> Self {
        Self
    }
}

impl MetricsRecorder for DefaultMetricsRecorder {
    fn increment_counter(&self, _name: &str, _labels: &[(&str, &str)]) {}

    fn record_histogram(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}

    fn record_gauge(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockMetricsRecorder;

    #[test]
    fn test_record_outcome_labels() {
        let recorder = Arc::new(MockMetricsRecorder::new());
        let metrics = EditorMetrics::new("photo_editor", recorder.clone());

        metrics.record_outcome("expand", None, 1200);
        metrics.record_outcome("edit", Some(ErrorKind::BlockedByPolicy), 300);

        let counters = recorder.counters();
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[0].0, "photo_editor_operations_total");
        assert!(counters[0].1.contains(&("outcome".to_string(), "success".to_string())));
        assert!(counters[1].1.contains(&("outcome".to_string(), "blocked_by_policy".to_string())));
        assert_eq!(recorder.histograms().len(), 2);
    }

    #[test]
    fn test_record_request() {
        let recorder = Arc::new(MockMetricsRecorder::new());
        let metrics = EditorMetrics::new("photo_editor", recorder.clone());

        metrics.record_request("composite", 200, 4321);

        let counters = recorder.counters();
        assert_eq!(counters[0].0, "photo_editor_requests_total");
        assert!(counters[0].1.contains(&("status".to_string(), "200".to_string())));
        assert_eq!(recorder.histograms()[0].1, 4321.0);
    }

    #[test]
    fn test_noop_and_tracing_recorders() {
        let noop = DefaultMetricsRecorder::new();
        noop.increment_counter("c", &[("label", "value")]);
        noop.record_histogram("h", 1.0, &[]);
        noop.record_gauge("g", 2.0, &[]);

        let tracing = TracingMetricsRecorder::new();
        tracing.increment_counter("c", &[("operation", "edit")]);
        tracing.record_histogram("h", 1.0, &[]);
        tracing.record_gauge("g", 2.0, &[]);
    }
}
