//! Canvas and mask preparation for generative expand.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbaImage};

use crate::error::{EditorResult, RequestError};
use crate::types::AspectRatio;

/// Minimum difference between the target and current ratio worth expanding.
pub const ASPECT_TOLERANCE: f64 = 0.001;

/// Alpha below this counts as transparent when deriving a mask.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Largest canvas `prepare` will allocate, in pixels (50 megapixels).
pub const MAX_CANVAS_PIXELS: u64 = 50_000_000;

const MASK_FILL: Luma<u8> = Luma([255]);
const MASK_KEEP: Luma<u8> = Luma([0]);

/// The base image and mask ready to send to an expand request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCanvas {
    /// Original centred on a transparent canvas, PNG encoded.
    pub image: Bytes,
    /// White where content must be generated, black over the original. PNG.
    pub mask: Bytes,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Horizontal offset of the original within the canvas.
    pub offset_x: u32,
    /// Vertical offset of the original within the canvas.
    pub offset_y: u32,
}

/// Builds the transparent canvas and matching mask for an expand.
pub struct ExpandCanvas;

impl ExpandCanvas {
    /// Centres the encoded image `bytes` on a canvas of the target aspect
    /// ratio, keeping the original's pixels at full resolution.
    ///
    /// The canvas grows along one axis only: wider ratios add columns,
    /// taller ratios add rows.
    pub fn prepare(bytes: &[u8], aspect: AspectRatio) -> EditorResult<PreparedCanvas> {
        let target = aspect.validated()?;
        let original = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = original.dimensions();

        if width == 0 || height == 0 {
            return Err(invalid_aspect("source image has no pixels"));
        }

        let current = f64::from(width) / f64::from(height);
        if (target - current).abs() <= ASPECT_TOLERANCE {
            return Err(invalid_aspect(&format!(
                "image is already at ratio {current:.3}; nothing to expand"
            )));
        }

        let (canvas_width, canvas_height) = if target > current {
            (scaled(height, target)?.max(width), height)
        } else {
            (width, scaled(width, 1.0 / target)?.max(height))
        };

        let pixels = u64::from(canvas_width) * u64::from(canvas_height);
        if pixels > MAX_CANVAS_PIXELS {
            return Err(invalid_aspect(&format!(
                "canvas of {canvas_width}x{canvas_height} exceeds {MAX_CANVAS_PIXELS} pixels"
            )));
        }

        let offset_x = (canvas_width - width) / 2;
        let offset_y = (canvas_height - height) / 2;

        let mut canvas = RgbaImage::new(canvas_width, canvas_height);
        image::imageops::replace(&mut canvas, &original, i64::from(offset_x), i64::from(offset_y));

        let mask = GrayImage::from_fn(canvas_width, canvas_height, |x, y| {
            let inside_x = x >= offset_x && x < offset_x + width;
            let inside_y = y >= offset_y && y < offset_y + height;
            if inside_x && inside_y {
                MASK_KEEP
            } else {
                MASK_FILL
            }
        });

        tracing::debug!(
            original_width = width,
            original_height = height,
            canvas_width,
            canvas_height,
            "Prepared expand canvas"
        );

        Ok(PreparedCanvas {
            image: encode_png(DynamicImage::ImageRgba8(canvas))?,
            mask: encode_png(DynamicImage::ImageLuma8(mask))?,
            width: canvas_width,
            height: canvas_height,
            offset_x,
            offset_y,
        })
    }
}

/// Derives an expand mask from an image's transparency: white where alpha is
/// below [`ALPHA_THRESHOLD`], black elsewhere. Returns PNG bytes.
///
/// An image without transparent pixels has no fill region and is rejected.
pub fn mask_from_alpha(bytes: &[u8]) -> EditorResult<Bytes> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    if !rgba.pixels().any(|p| p[3] < ALPHA_THRESHOLD) {
        return Err(RequestError::InvalidParameter {
            parameter: "mask".to_string(),
            message: "image has no transparent pixels and no mask was given; nothing to expand"
                .to_string(),
        }
        .into());
    }

    let mask = GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        if rgba.get_pixel(x, y)[3] < ALPHA_THRESHOLD {
            MASK_FILL
        } else {
            MASK_KEEP
        }
    });
    encode_png(DynamicImage::ImageLuma8(mask))
}

fn encode_png(image: DynamicImage) -> EditorResult<Bytes> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(Bytes::from(buffer.into_inner()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(side: u32, ratio: f64) -> EditorResult<u32> {
    let value = (f64::from(side) * ratio).round();
    if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(invalid_aspect("resulting canvas size is out of range"))
    }
}

fn invalid_aspect(message: &str) -> crate::error::EditorError {
    RequestError::InvalidParameter {
        parameter: "aspect_ratio".to_string(),
        message: message.to_string(),
    }
    .into()
}
