//! Image encoder: turns a file, raw bytes or a `data:` URL into an
//! [`ImagePart`].

use std::io::Cursor;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use super::part::ImagePart;
use crate::error::{EditorResult, RequestError, TransportFailure};

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk, read asynchronously.
    Path(PathBuf),
    /// Raw encoded image bytes with an optional declared MIME type.
    Bytes {
        /// Encoded image (PNG, JPEG, ...).
        bytes: Bytes,
        /// Declared MIME type; must be `image/*` when present.
        mime_type: Option<String>,
    },
    /// A `data:<mime>;base64,<payload>` URL, typically a previous result.
    DataUrl(String),
}

impl ImageSource {
    /// Image read from a file.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Image held in memory; the format is sniffed from the bytes.
    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes {
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    /// Image held in memory with a declared MIME type.
    pub fn bytes_with_mime(bytes: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self::Bytes {
            bytes: bytes.into(),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Image carried in a `data:` URL.
    pub fn data_url(url: impl Into<String>) -> Self {
        Self::DataUrl(url.into())
    }

    /// Short description for logs. Never includes payload bytes.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Path(path) => format!("file:{}", path.display()),
            ImageSource::Bytes { bytes, .. } => format!("bytes:{}", bytes.len()),
            ImageSource::DataUrl(url) => format!("data_url:{}", url.len()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::bytes(bytes)
    }
}

/// Decoded image bytes with the MIME type they were identified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Encoded image bytes.
    pub bytes: Bytes,
    /// Identified MIME type.
    pub mime_type: String,
}

impl LoadedImage {
    /// Pixel dimensions read from the image header, when the format is one
    /// this crate can decode.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(self.bytes.as_ref()))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }

    /// Consumes the image into an inline part.
    pub fn into_part(self) -> ImagePart {
        ImagePart::from_bytes(self.mime_type, &self.bytes)
    }
}

/// Reads image sources and encodes them as inline parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEncoder;

impl ImageEncoder {
    /// Creates an encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encodes a source as an inline part.
    ///
    /// `data:` URLs are validated and passed through without re-encoding.
    pub async fn encode(&self, source: &ImageSource) -> EditorResult<ImagePart> {
        if let ImageSource::DataUrl(url) = source {
            let part = ImagePart::from_data_url(url)?;
            ensure_image_mime(part.mime_type())?;
            return Ok(part);
        }

        let loaded = self.load(source).await?;
        tracing::debug!(
            source = %source.describe(),
            mime_type = %loaded.mime_type,
            size = loaded.bytes.len(),
            "Encoded image part"
        );
        Ok(loaded.into_part())
    }

    /// Reads a source into raw bytes and identifies its MIME type.
    pub async fn load(&self, source: &ImageSource) -> EditorResult<LoadedImage> {
        match source {
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    TransportFailure::ResourceRead {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                })?;
                let mime_type = identify(&bytes, None)?;
                Ok(LoadedImage {
                    bytes: Bytes::from(bytes),
                    mime_type,
                })
            }
            ImageSource::Bytes { bytes, mime_type } => {
                let mime_type = identify(bytes, mime_type.as_deref())?;
                Ok(LoadedImage {
                    bytes: bytes.clone(),
                    mime_type,
                })
            }
            ImageSource::DataUrl(url) => {
                let part = ImagePart::from_data_url(url)?;
                ensure_image_mime(part.mime_type())?;
                Ok(LoadedImage {
                    bytes: Bytes::from(part.decode()?),
                    mime_type: part.mime_type().to_string(),
                })
            }
        }
    }
}

/// Picks the MIME type for `bytes`.
///
/// The magic number wins; a declared type is used only when the format
/// cannot be sniffed, and must be an `image/*` type either way.
fn identify(bytes: &[u8], declared: Option<&str>) -> EditorResult<String> {
    if let Some(declared) = declared {
        ensure_image_mime(declared)?;
    }

    if bytes.is_empty() {
        return Err(TransportFailure::UnsupportedImage {
            message: "image is empty".to_string(),
        }
        .into());
    }

    match image::guess_format(bytes) {
        Ok(format) => {
            let sniffed = format.to_mime_type();
            if let Some(declared) = declared {
                if !declared.eq_ignore_ascii_case(sniffed) {
                    tracing::debug!(
                        declared = declared,
                        sniffed = sniffed,
                        "Declared MIME type differs from image content"
                    );
                }
            }
            Ok(sniffed.to_string())
        }
        Err(err) => match declared {
            Some(declared) => Ok(declared.to_string()),
            None => Err(TransportFailure::UnsupportedImage {
                message: format!("unrecognised image format: {err}"),
            }
            .into()),
        },
    }
}

fn ensure_image_mime(mime_type: &str) -> EditorResult<()> {
    let parsed: mime::Mime = mime_type
        .parse()
        .map_err(|_| RequestError::UnsupportedMediaType {
            mime_type: mime_type.to_string(),
        })?;

    if parsed.type_() != mime::IMAGE {
        return Err(RequestError::UnsupportedMediaType {
            mime_type: mime_type.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[tokio::test]
    async fn test_sniffs_png_bytes() {
        let part = ImageEncoder::new()
            .encode(&ImageSource::bytes(PNG_MAGIC.to_vec()))
            .await
            .unwrap();
        assert_eq!(part.mime_type(), "image/png");
        assert_eq!(part.decode().unwrap(), PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_sniffed_type_wins_over_declared() {
        let part = ImageEncoder::new()
            .encode(&ImageSource::bytes_with_mime(JPEG_MAGIC.to_vec(), "image/png"))
            .await
            .unwrap();
        assert_eq!(part.mime_type(), "image/jpeg");
    }

    #[tokio::test]
    async fn test_declared_type_used_when_unsniffable() {
        let part = ImageEncoder::new()
            .encode(&ImageSource::bytes_with_mime(vec![1, 2, 3, 4], "image/heic"))
            .await
            .unwrap();
        assert_eq!(part.mime_type(), "image/heic");
    }

    #[tokio::test]
    async fn test_non_image_declared_type_rejected() {
        let err = ImageEncoder::new()
            .encode(&ImageSource::bytes_with_mime(PNG_MAGIC.to_vec(), "text/plain"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidRequest(RequestError::UnsupportedMediaType { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_bytes_rejected() {
        let err = ImageEncoder::new()
            .encode(&ImageSource::bytes(vec![1, 2, 3, 4]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Transport(TransportFailure::UnsupportedImage { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_resource_read() {
        let err = ImageEncoder::new()
            .encode(&ImageSource::path("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Transport(TransportFailure::ResourceRead { .. })
        ));
    }

    #[tokio::test]
    async fn test_data_url_passes_through() {
        let part = ImageEncoder::new()
            .encode(&ImageSource::data_url("data:image/webp;base64,AAAA"))
            .await
            .unwrap();
        assert_eq!(part.to_data_url(), "data:image/webp;base64,AAAA");
    }

    #[test]
    fn test_describe_hides_payload() {
        let source = ImageSource::data_url("data:image/png;base64,SECRETPIXELS");
        assert!(!source.describe().contains("SECRETPIXELS"));
    }
}
