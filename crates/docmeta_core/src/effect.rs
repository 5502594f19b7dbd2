use std::fmt;

use crate::{ExportFile, SelectedFile, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show a blocking notification to the user.
    Notify(Notification),
    StartTransfer {
        session_id: SessionId,
        file: SelectedFile,
    },
    StartProgressClock,
    StopProgressClock,
    /// Offer the file to the user as a download.
    SaveExport(ExportFile),
    ClearFileInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Why a request did not produce a usable 2xx JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    HttpStatus(u16),
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::HttpStatus(code) => write!(f, "Server error: {code}"),
            TransportFailure::Network(detail) => write!(f, "{detail}"),
            TransportFailure::InvalidResponse(detail) => write!(f, "invalid response: {detail}"),
        }
    }
}
