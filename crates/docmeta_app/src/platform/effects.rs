use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use docmeta_core::{Effect, Msg, Notification, Severity, TransportFailure};
use docmeta_engine::{save_export, EngineEvent, EngineHandle, FailureKind, UploadError};
use docmeta_logging::{docmeta_debug, docmeta_error, docmeta_info, docmeta_warn};

const EVENT_WAIT: Duration = Duration::from_millis(200);

/// What running an effect produced that the caller should surface.
#[derive(Debug, Default)]
pub struct EffectReport {
    pub notifications: Vec<Notification>,
    pub saved_exports: Vec<PathBuf>,
}

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    msg_tx: mpsc::Sender<Msg>,
    tick_interval: Duration,
    clock: Option<Arc<AtomicBool>>,
    forwarding: Arc<AtomicBool>,
    export_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        msg_tx: mpsc::Sender<Msg>,
        tick_interval: Duration,
        export_dir: PathBuf,
    ) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
            msg_tx,
            tick_interval,
            clock: None,
            forwarding: Arc::new(AtomicBool::new(true)),
            export_dir,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> EffectReport {
        let mut report = EffectReport::default();
        for effect in effects {
            match effect {
                Effect::Notify(notification) => {
                    match notification.severity {
                        Severity::Error => docmeta_error!("{}", notification.message),
                        Severity::Warning => docmeta_warn!("{}", notification.message),
                        Severity::Information => docmeta_info!("{}", notification.message),
                    }
                    report.notifications.push(notification);
                }
                Effect::StartTransfer { session_id, file } => {
                    docmeta_info!(
                        "StartTransfer session={} name={} type={} bytes={}",
                        session_id,
                        file.name,
                        file.mime_type,
                        file.byte_size
                    );
                    self.engine.upload(session_id, file);
                }
                Effect::StartProgressClock => self.start_clock(),
                Effect::StopProgressClock => self.stop_clock(),
                Effect::SaveExport(export) => match save_export(&self.export_dir, &export) {
                    Ok(path) => report.saved_exports.push(path),
                    Err(err) => {
                        docmeta_error!("Failed to save {}: {}", export.filename, err);
                        report.notifications.push(Notification::error(format!(
                            "Error saving {}: {err}",
                            export.filename
                        )));
                    }
                },
                Effect::ClearFileInput => {
                    // no-op; the CLI has no file picker to clear
                }
            }
        }
        report
    }

    fn start_clock(&mut self) {
        self.stop_clock();
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let msg_tx = self.msg_tx.clone();
        let interval = self.tick_interval;
        thread::spawn(move || loop {
            thread::sleep(interval);
            if !flag.load(Ordering::Relaxed) || msg_tx.send(Msg::ProgressTick).is_err() {
                break;
            }
        });
        self.clock = Some(running);
    }

    fn stop_clock(&mut self) {
        if let Some(running) = self.clock.take() {
            running.store(false, Ordering::Relaxed);
        }
    }

    /// Forwards engine events as messages until the runner is dropped or the
    /// engine worker goes away.
    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        let running = self.forwarding.clone();
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                match engine.recv_timeout(EVENT_WAIT) {
                    Ok(event) => {
                        if msg_tx.send(map_event(event)).is_err() {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        docmeta_warn!("Upload engine stopped; no further events");
                        break;
                    }
                }
            }
        });
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.stop_clock();
        self.forwarding.store(false, Ordering::Relaxed);
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BytesSent {
            session_id,
            sent,
            total,
        } => Msg::BytesSent {
            session_id,
            sent,
            total,
        },
        EngineEvent::UploadCompleted { session_id, result } => {
            if let Err(err) = &result {
                docmeta_warn!("Upload session={} failed: {}", session_id, err);
            } else {
                docmeta_debug!("Upload session={} completed", session_id);
            }
            Msg::TransferFinished {
                session_id,
                result: result.map_err(map_failure),
            }
        }
    }
}

pub(crate) fn map_failure(err: UploadError) -> TransportFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => TransportFailure::HttpStatus(code),
        FailureKind::Decode => TransportFailure::InvalidResponse(err.message),
        FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::Io
        | FailureKind::Unavailable => TransportFailure::Network(err.to_string()),
    }
}
