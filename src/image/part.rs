//! Inline image parts and their `data:` URL form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{EditorResult, TransportFailure};
use crate::types::{Blob, Part};

const DATA_URL_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// An image ready to embed in a request: MIME type plus standard base64
/// payload.
///
/// Parts are immutable once produced and are moved into exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    mime_type: String,
    data: String,
}

impl ImagePart {
    /// Creates a part from raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parses `data:<mime>;base64,<payload>`.
    ///
    /// The payload is checked to be valid base64 but kept as supplied.
    pub fn from_data_url(url: &str) -> EditorResult<Self> {
        let malformed = |detail: &str| TransportFailure::MalformedEncoding {
            message: format!("invalid data URL: {detail}"),
        };

        let rest = url
            .trim()
            .strip_prefix(DATA_URL_SCHEME)
            .ok_or_else(|| malformed("missing 'data:' scheme"))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| malformed("missing ',' separator"))?;

        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| malformed("payload is not base64 encoded"))?;

        if mime_type.is_empty() {
            return Err(malformed("missing MIME type").into());
        }

        STANDARD.decode(payload)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    /// The MIME type, for example `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Decodes the payload back into bytes.
    pub fn decode(&self) -> EditorResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.data)?)
    }

    /// Renders `data:<mime>;base64,<payload>`.
    pub fn to_data_url(&self) -> String {
        data_url(&self.mime_type, &self.data)
    }
}

impl From<ImagePart> for Part {
    fn from(image: ImagePart) -> Self {
        Part::inline(Blob {
            mime_type: image.mime_type,
            data: image.data,
        })
    }
}

/// Formats a `data:` URL from a MIME type and a base64 payload.
pub fn data_url(mime_type: &str, data: &str) -> String {
    format!("{DATA_URL_SCHEME}{mime_type}{BASE64_MARKER},{data}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    #[test]
    fn test_data_url_round_trip() {
        let part = ImagePart::from_data_url("data:image/png;base64,AAAA").unwrap();
        assert_eq!(part.mime_type(), "image/png");
        assert_eq!(part.data(), "AAAA");
        assert_eq!(part.to_data_url(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_data_url_without_separator() {
        let err = ImagePart::from_data_url("data:image/png;base64").unwrap_err();
        assert!(matches!(
            err,
            EditorError::Transport(TransportFailure::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_data_url_without_mime() {
        assert!(ImagePart::from_data_url("data:;base64,AAAA").is_err());
        assert!(ImagePart::from_data_url("image/png;base64,AAAA").is_err());
        assert!(ImagePart::from_data_url("data:image/png,AAAA").is_err());
    }

    #[test]
    fn test_data_url_with_bad_payload() {
        let err = ImagePart::from_data_url("data:image/png;base64,not base64!").unwrap_err();
        assert!(matches!(
            err,
            EditorError::Transport(TransportFailure::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_into_part() {
        let part: Part = ImagePart::from_bytes("image/jpeg", &[1, 2, 3]).into();
        let blob = part.inline_data.unwrap();
        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(blob.data, "AQID");
    }
}
