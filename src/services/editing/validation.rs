//! Parameter checks for editing operations.

use crate::error::RequestError;
use crate::types::{Hotspot, OperationKind};

/// Requires a non-blank prompt. The text itself is passed on unchanged.
pub fn validate_prompt(operation: OperationKind, prompt: &str) -> Result<(), RequestError> {
    if prompt.trim().is_empty() {
        return Err(RequestError::EmptyPrompt {
            operation: operation.as_str().to_string(),
        });
    }
    Ok(())
}

/// Requires the hotspot to fall inside the image when its size is known.
pub fn validate_hotspot(hotspot: Hotspot, dimensions: Option<(u32, u32)>) -> Result<(), RequestError> {
    match dimensions {
        Some((width, height)) if hotspot.x >= width || hotspot.y >= height => {
            Err(RequestError::InvalidParameter {
                parameter: "hotspot".to_string(),
                message: format!(
                    "({}, {}) lies outside the {width}x{height} image",
                    hotspot.x, hotspot.y
                ),
            })
        }
        _ => Ok(()),
    }
}

/// Requires a supplied expand mask to cover the base image exactly.
///
/// Sizes that cannot be read from the headers are not compared.
pub fn validate_mask_dimensions(
    base: Option<(u32, u32)>,
    mask: Option<(u32, u32)>,
) -> Result<(), RequestError> {
    match (base, mask) {
        (Some(base), Some(mask)) if base != mask => Err(RequestError::InvalidParameter {
            parameter: "mask".to_string(),
            message: format!(
                "mask is {}x{} but the image is {}x{}",
                mask.0, mask.1, base.0, base.1
            ),
        }),
        _ => Ok(()),
    }
}
