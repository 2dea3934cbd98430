//! Image encoding from files, bytes and data URLs.

mod common;

use std::io::Write;

use base64::Engine;
use common::png;
use integrations_photo_editor::error::{EditorError, RequestError, TransportFailure};
use integrations_photo_editor::{ImageEncoder, ImagePart, ImageSource};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_file_round_trip() {
    // Arrange
    let bytes = png(10, 6);
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&bytes).unwrap();

    // Act
    let part = ImageEncoder::new()
        .encode(&ImageSource::path(file.path()))
        .await
        .unwrap();

    // Assert
    assert_eq!(part.mime_type(), "image/png");
    assert_eq!(part.decode().unwrap(), bytes);
    assert_eq!(
        part.data(),
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );
}

#[tokio::test]
async fn test_misleading_extension_uses_content_type() {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(&png(3, 3)).unwrap();

    let part = ImageEncoder::new()
        .encode(&ImageSource::path(file.path()))
        .await
        .unwrap();

    assert_eq!(part.mime_type(), "image/png");
}

#[tokio::test]
async fn test_loaded_dimensions() {
    let loaded = ImageEncoder::new()
        .load(&ImageSource::bytes(png(31, 17)))
        .await
        .unwrap();

    assert_eq!(loaded.dimensions(), Some((31, 17)));
}

#[tokio::test]
async fn test_empty_file_is_unsupported() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let err = ImageEncoder::new()
        .encode(&ImageSource::path(file.path()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EditorError::Transport(TransportFailure::UnsupportedImage { .. })
    ));
}

#[tokio::test]
async fn test_non_image_data_url_rejected() {
    let err = ImageEncoder::new()
        .encode(&ImageSource::data_url("data:text/plain;base64,aGVsbG8="))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EditorError::InvalidRequest(RequestError::UnsupportedMediaType {
            mime_type: "text/plain".to_string()
        })
    );
}

#[test]
fn test_data_url_round_trip() {
    let part = ImagePart::from_bytes("image/png", &png(2, 2));
    let url = part.to_data_url();

    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(ImagePart::from_data_url(&url).unwrap(), part);
}

#[test]
fn test_malformed_data_urls() {
    for url in [
        "image/png;base64,AAAA",
        "data:image/png,AAAA",
        "data:;base64,AAAA",
        "data:image/png;base64,@@@",
    ] {
        let err = ImagePart::from_data_url(url).unwrap_err();
        assert!(
            matches!(err, EditorError::Transport(TransportFailure::MalformedEncoding { .. })),
            "{url} gave {err:?}"
        );
    }
}
