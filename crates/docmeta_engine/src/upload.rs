use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use docmeta_core::{DocumentMetadata, SelectedFile, SessionId, UploadReply};
use docmeta_logging::{docmeta_debug, docmeta_info, docmeta_warn};
use futures_util::stream::{self, StreamExt};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{EngineEvent, FailureKind, UploadError};

/// Multipart field holding the raw upload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Base URL of the analysis service; `/upload` is appended.
    pub server_url: String,
    /// `None` leaves connection timeouts to the transport defaults.
    pub connect_timeout: Option<Duration>,
    /// Size of the body chunks that progress is reported for.
    pub chunk_size: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            connect_timeout: None,
            chunk_size: 64 * 1024,
        }
    }
}

impl UploadSettings {
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.server_url.trim_end_matches('/'))
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        session_id: SessionId,
        file: &SelectedFile,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<UploadReply, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        session_id: SessionId,
        file: &SelectedFile,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<UploadReply, UploadError> {
        let data = tokio::fs::read(&file.location)
            .await
            .map_err(|err| UploadError::new(FailureKind::Io, err.to_string()))?;
        let total = data.len() as u64;
        let client = self.build_client()?;

        let body = progress_body(Bytes::from(data), self.settings.chunk_size, session_id, sink);
        let part = Part::stream_with_length(body, total)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.settings.upload_url();
        docmeta_info!(
            "Uploading session={} name={} bytes={} to {}",
            session_id,
            file.name,
            total,
            url
        );
        let response = client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            docmeta_warn!("Upload session={} rejected with {}", session_id, status);
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        docmeta_debug!("Upload session={} reply {} bytes", session_id, body.len());
        decode_reply(&body)
    }
}

/// Splits the payload into chunks and reports each one as it is handed to the connection.
fn progress_body(
    data: Bytes,
    chunk_size: usize,
    session_id: SessionId,
    sink: Arc<dyn ProgressSink>,
) -> reqwest::Body {
    let total = data.len() as u64;
    let chunk_size = chunk_size.max(1);
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(chunk_size)
        .map(|start| data.slice(start..(start + chunk_size).min(data.len())))
        .collect();

    let mut sent = 0u64;
    let stream = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        sink.emit(EngineEvent::BytesSent {
            session_id,
            sent,
            total: Some(total),
        });
        Ok::<Bytes, std::io::Error>(chunk)
    });
    reqwest::Body::wrap_stream(stream)
}

#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    success: bool,
    metadata: Option<DocumentMetadata>,
    original_filename: Option<String>,
    error: Option<String>,
}

/// Decodes a 2xx body into the service's success or failure reply.
pub fn decode_reply(body: &[u8]) -> Result<UploadReply, UploadError> {
    let wire: WireReply = serde_json::from_slice(body)
        .map_err(|err| UploadError::new(FailureKind::Decode, err.to_string()))?;

    if !wire.success {
        return Ok(UploadReply::Failure {
            error: wire.error.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let metadata = wire.metadata.ok_or_else(|| {
        UploadError::new(FailureKind::Decode, "success reply without metadata")
    })?;
    let original_filename = wire
        .original_filename
        .unwrap_or_else(|| metadata.filename.clone());
    Ok(UploadReply::Success {
        metadata,
        original_filename,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
