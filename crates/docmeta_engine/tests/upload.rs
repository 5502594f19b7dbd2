use std::path::Path;
use std::sync::{Arc, Mutex};

use docmeta_core::{SelectedFile, UploadReply};
use docmeta_engine::{
    select_local_file, EngineEvent, FailureKind, ProgressSink, ReqwestUploader, UploadSettings,
    Uploader,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> SelectedFile {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, contents).unwrap();
    select_local_file(Path::new(&file_path)).unwrap()
}

fn uploader_for(server: &MockServer, chunk_size: usize) -> ReqwestUploader {
    ReqwestUploader::new(UploadSettings {
        server_url: server.uri(),
        chunk_size,
        ..UploadSettings::default()
    })
}

/// Entity types are deliberately out of alphabetical order.
const SUCCESS_BODY: &str = r#"{
    "success": true,
    "original_filename": "notes.txt",
    "metadata": {
        "title": "Notes",
        "filename": "notes.txt",
        "file_size": 10,
        "word_count": 2,
        "processing_date": "2024-05-01 10:00:00",
        "language": "English",
        "keywords": [{"text": "data", "score": 0.9}],
        "entities": {"PERSON": [], "ORG": ["Acme"]},
        "summary": "Short.",
        "readability_score": 12.3
    }
}"#;

fn json_reply(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), "application/json")
}

#[tokio::test]
async fn upload_posts_multipart_file_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(json_reply(200, SUCCESS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "0123456789");
    let sink = Arc::new(TestSink::default());

    let reply = uploader_for(&server, 4)
        .upload(3, &file, sink.clone())
        .await
        .expect("upload ok");

    let UploadReply::Success {
        metadata,
        original_filename,
    } = reply
    else {
        panic!("expected success reply");
    };
    assert_eq!(original_filename, "notes.txt");
    assert_eq!(metadata.word_count, 2);
    assert_eq!(metadata.entities.keys().collect::<Vec<_>>(), vec!["PERSON", "ORG"]);

    let progress: Vec<(u64, Option<u64>)> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::BytesSent {
                session_id: 3,
                sent,
                total,
            } => Some((sent, total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(4, Some(10)), (8, Some(10)), (10, Some(10))]);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"notes.txt\""));
    assert!(body.to_lowercase().contains("content-type: text/plain"));
    assert!(body.contains("0123456789"));
}

#[tokio::test]
async fn non_success_status_is_transport_failure_regardless_of_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(json_reply(500, SUCCESS_BODY))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "hello");
    let err = uploader_for(&server, 1024)
        .upload(1, &file, Arc::new(TestSink::default()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn application_failure_is_returned_as_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "File type not allowed"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "hello");
    let reply = uploader_for(&server, 1024)
        .upload(1, &file, Arc::new(TestSink::default()))
        .await
        .unwrap();
    assert_eq!(
        reply,
        UploadReply::Failure {
            error: "File type not allowed".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "hello");
    let err = uploader_for(&server, 1024)
        .upload(1, &file, Arc::new(TestSink::default()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn missing_file_is_io_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut file = write_file(&dir, "notes.txt", "hello");
    file.location = dir.path().join("gone.txt");

    let err = uploader_for(&server, 1024)
        .upload(1, &file, Arc::new(TestSink::default()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "notes.txt", "hello");
    let uploader = ReqwestUploader::new(UploadSettings {
        server_url: "http://127.0.0.1:9".to_string(),
        ..UploadSettings::default()
    });
    let err = uploader
        .upload(1, &file, Arc::new(TestSink::default()))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
