use docmeta_core::UploadReply;
use docmeta_engine::{decode_reply, FailureKind};

#[test]
fn success_without_original_filename_uses_metadata_filename() {
    let body = br#"{"success": true, "metadata": {"filename": "a.pdf", "word_count": 3}}"#;
    let UploadReply::Success {
        metadata,
        original_filename,
    } = decode_reply(body).unwrap()
    else {
        panic!("expected success");
    };
    assert_eq!(original_filename, "a.pdf");
    assert_eq!(metadata.title, None);
    assert!(metadata.keywords.is_empty());
}

#[test]
fn success_without_metadata_is_decode_failure() {
    let err = decode_reply(br#"{"success": true}"#).unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[test]
fn failure_without_message_gets_placeholder() {
    assert_eq!(
        decode_reply(br#"{"error": "No file part"}"#).unwrap(),
        UploadReply::Failure {
            error: "No file part".to_string()
        }
    );
    assert_eq!(
        decode_reply(br#"{"success": false}"#).unwrap(),
        UploadReply::Failure {
            error: "Unknown error".to_string()
        }
    );
}
