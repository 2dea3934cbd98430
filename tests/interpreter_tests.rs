//! Response interpretation against recorded responses.

use integrations_photo_editor::error::{EditorError, ErrorKind};
use integrations_photo_editor::fixtures::load_response;
use integrations_photo_editor::{interpret_response, OperationKind};
use pretty_assertions::assert_eq;

#[test]
fn test_image_success_returns_first_inline_part() {
    let response = load_response("image_success");

    let url = interpret_response(&response, OperationKind::Edit).unwrap();

    assert!(url.starts_with("data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB"));
}

#[test]
fn test_block_wins_over_image() {
    let response = load_response("blocked_with_image");

    let err = interpret_response(&response, OperationKind::Composite).unwrap_err();

    assert_eq!(
        err,
        EditorError::BlockedByPolicy {
            reason: "SAFETY".to_string(),
            message: Some("The prompt was flagged by the safety filter.".to_string()),
        }
    );
}

#[test]
fn test_image_safety_finish_is_abnormal() {
    let response = load_response("safety_finish");

    let err = interpret_response(&response, OperationKind::Expand).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AbnormalFinish);
    assert!(err.to_string().contains("Image generation for expansion stopped unexpectedly"));
    assert!(err.to_string().contains("IMAGE_SAFETY"));
}

#[test]
fn test_text_only_carries_trimmed_text() {
    let response = load_response("text_only");

    let err = interpret_response(&response, OperationKind::Filter).unwrap_err();

    assert_eq!(
        err,
        EditorError::NoImageReturned {
            context: OperationKind::Filter,
            text: Some(
                "I can't generate an image of that person with a different ethnicity.".to_string()
            ),
        }
    );
}

#[test]
fn test_empty_response_names_operation() {
    let response = load_response("empty");

    for kind in OperationKind::ALL {
        let err = interpret_response(&response, kind).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoImageReturned);
        assert!(err.to_string().contains(&format!("for the {kind}.")));
    }
}
