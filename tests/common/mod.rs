//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use integrations_photo_editor::mocks::{MockMetricsRecorder, MockModelGateway};
use integrations_photo_editor::observability::{create_noop_stack, EditorMetrics, METRICS_PREFIX};
use integrations_photo_editor::types::Part;
use integrations_photo_editor::{EditingServiceImpl, ResponseInterpreter};

/// Opaque PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])))
}

/// PNG encoding of `image`.
pub fn encode(image: RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Editing service over `gateway` with a quiet observability stack.
pub fn service(gateway: Arc<MockModelGateway>) -> EditingServiceImpl {
    let (logger, tracer, metrics) = create_noop_stack("test");
    let (interpreter_logger, _, _) = create_noop_stack("test");
    EditingServiceImpl::new(
        gateway,
        ResponseInterpreter::new(interpreter_logger),
        logger,
        tracer,
        metrics,
    )
}

/// Editing service that records metrics into the returned recorder.
pub fn service_with_metrics(
    gateway: Arc<MockModelGateway>,
) -> (EditingServiceImpl, Arc<MockMetricsRecorder>) {
    let recorder = Arc::new(MockMetricsRecorder::new());
    let (logger, tracer, _) = create_noop_stack("test");
    let (interpreter_logger, _, _) = create_noop_stack("test");
    let service = EditingServiceImpl::new(
        gateway,
        ResponseInterpreter::new(interpreter_logger),
        logger,
        tracer,
        EditorMetrics::new(METRICS_PREFIX, recorder.clone()),
    );
    (service, recorder)
}

/// Decoded bytes of an inline part.
pub fn inline_bytes(part: &Part) -> Vec<u8> {
    let blob = part.inline_data.as_ref().expect("inline part");
    base64::engine::general_purpose::STANDARD
        .decode(&blob.data)
        .unwrap()
}
