//! Part layout checks applied before anything is sent.

use crate::error::RequestError;
use crate::types::Part;

/// Most images a single editing request carries (base, mask or insert).
pub const MAX_IMAGE_PARTS: usize = 3;

/// Checks for 1 to [`MAX_IMAGE_PARTS`] image parts followed by exactly one
/// text part.
pub fn validate_parts(parts: &[Part]) -> Result<(), RequestError> {
    let Some((last, images)) = parts.split_last() else {
        return Err(layout("request has no parts"));
    };

    if last.is_inline() || last.text.is_none() {
        return Err(layout("the final part must be the text instruction"));
    }

    if images.is_empty() {
        return Err(layout("at least one image part is required"));
    }

    if images.len() > MAX_IMAGE_PARTS {
        return Err(layout(&format!(
            "at most {MAX_IMAGE_PARTS} image parts are allowed, got {}",
            images.len()
        )));
    }

    for (index, part) in images.iter().enumerate() {
        let Some(blob) = &part.inline_data else {
            return Err(layout(&format!("part {index} must be an image")));
        };
        if part.text.is_some() {
            return Err(layout(&format!("image part {index} must not carry text")));
        }
        if blob.mime_type.trim().is_empty() || blob.data.is_empty() {
            return Err(layout(&format!("image part {index} is empty")));
        }
    }

    Ok(())
}

fn layout(message: &str) -> RequestError {
    RequestError::InvalidPartLayout {
        message: message.to_string(),
    }
}
