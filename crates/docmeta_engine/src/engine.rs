use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use docmeta_core::{SelectedFile, SessionId};
use docmeta_logging::docmeta_error;

use crate::upload::{ChannelProgressSink, ProgressSink, ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, FailureKind, UploadError};

enum EngineCommand {
    Upload {
        session_id: SessionId,
        file: SelectedFile,
    },
}

/// Runs uploads on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Self {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    docmeta_error!("Failed to start upload runtime: {}", err);
                    fail_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(handle_command(uploader, command, event_tx));
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn upload(&self, session_id: SessionId, file: SelectedFile) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Upload { session_id, file });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// `Disconnected` means the worker is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        match self.event_rx.lock() {
            Ok(rx) => rx.recv_timeout(timeout),
            Err(_) => Err(RecvTimeoutError::Disconnected),
        }
    }
}

/// Every upload command ends in exactly one `UploadCompleted`, even when the
/// upload task panics.
async fn handle_command(
    uploader: Arc<dyn Uploader>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload { session_id, file } => {
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            let task =
                tokio::spawn(async move { uploader.upload(session_id, &file, sink).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    docmeta_error!("Upload session={} task failed: {}", session_id, err);
                    Err(UploadError::new(
                        FailureKind::Unavailable,
                        format!("upload task failed: {err}"),
                    ))
                }
            };
            let _ = event_tx.send(EngineEvent::UploadCompleted { session_id, result });
        }
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(EngineCommand::Upload { session_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::UploadCompleted {
            session_id,
            result: Err(UploadError::new(FailureKind::Unavailable, reason.clone())),
        });
    }
}
