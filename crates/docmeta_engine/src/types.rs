use std::fmt;

use docmeta_core::{SessionId, UploadReply};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Request body bytes handed to the connection so far.
    BytesSent {
        session_id: SessionId,
        sent: u64,
        total: Option<u64>,
    },
    UploadCompleted {
        session_id: SessionId,
        result: Result<UploadReply, UploadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered with a non-2xx status.
    HttpStatus(u16),
    Timeout,
    Network,
    /// The file to upload could not be read.
    Io,
    /// A 2xx body that is not a well-formed service reply.
    Decode,
    /// The engine worker is gone.
    Unavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "file read error"),
            FailureKind::Decode => write!(f, "malformed reply"),
            FailureKind::Unavailable => write!(f, "upload engine unavailable"),
        }
    }
}
