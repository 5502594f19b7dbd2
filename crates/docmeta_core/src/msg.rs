use crate::{SelectedFile, SessionId, TransportFailure, UploadReply};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file through the upload target or the file picker.
    FileSelected(SelectedFile),
    /// User dropped one or more files onto the upload target.
    FilesDropped(Vec<SelectedFile>),
    /// Progress clock tick.
    ProgressTick,
    /// Transport reported bytes written for a session's request body.
    BytesSent {
        session_id: SessionId,
        sent: u64,
        total: Option<u64>,
    },
    /// Transport finished a session's request.
    TransferFinished {
        session_id: SessionId,
        result: Result<UploadReply, TransportFailure>,
    },
    /// User clicked Download.
    DownloadClicked,
    /// User clicked New upload.
    ResetClicked,
}
