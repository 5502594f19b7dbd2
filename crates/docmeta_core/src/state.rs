use std::path::PathBuf;

use crate::view_model::{render_metadata, AppViewModel, NumberFormat, ProgressView};
use crate::{DocumentMetadata, ProgressEstimator, DEFAULT_MAX_UPLOAD_BYTES};

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Transferring,
    Succeeded,
    Failed,
}

impl Phase {
    /// Resting phases accept a new selection; `Failed` behaves like `Idle`.
    pub fn is_at_rest(self) -> bool {
        !matches!(self, Phase::Validating | Phase::Transferring)
    }
}

/// A file chosen by the user, described by what the browser-like picker reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub byte_size: u64,
    /// Where the bytes can be read from when the transfer starts.
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub id: SessionId,
    pub file: SelectedFile,
    pub phase: Phase,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub estimator: ProgressEstimator,
    pub max_upload_bytes: Option<u64>,
    pub number_format: NumberFormat,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            estimator: ProgressEstimator::default(),
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
            number_format: NumberFormat::default(),
        }
    }
}

/// The held result of the last successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldResult {
    pub metadata: DocumentMetadata,
    pub original_filename: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: PipelineSettings,
    session: Option<UploadSession>,
    last_session_id: SessionId,
    progress_visible: bool,
    progress_failed: bool,
    results_visible: bool,
    held: Option<HeldResult>,
    clock_running: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PipelineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map(|session| session.phase)
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    pub fn held_result(&self) -> Option<&HeldResult> {
        self.held.as_ref()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn view(&self) -> AppViewModel {
        let results = match (&self.held, self.results_visible) {
            (Some(held), true) => Some(render_metadata(
                &held.metadata,
                &held.original_filename,
                &self.settings.number_format,
            )),
            _ => None,
        };
        AppViewModel {
            phase: self.phase(),
            selected_file: self.session.as_ref().map(|s| s.file.name.clone()),
            progress: ProgressView {
                visible: self.progress_visible,
                percent: self.session.as_ref().map(|s| s.progress).unwrap_or(0),
                failed: self.progress_failed,
            },
            results,
            can_download: self.held.is_some(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a fresh session in `Validating`, dropping any previous one.
    pub(crate) fn begin_session(&mut self, file: SelectedFile) -> SessionId {
        self.last_session_id += 1;
        let id = self.last_session_id;
        self.session = Some(UploadSession {
            id,
            file,
            phase: Phase::Validating,
            progress: 0,
        });
        self.mark_dirty();
        id
    }

    /// Moves the current session into `Transferring` with a zeroed, visible indicator.
    pub(crate) fn start_transfer(&mut self) -> Option<SessionId> {
        let session = self.session.as_mut()?;
        session.phase = Phase::Transferring;
        session.progress = 0;
        let id = session.id;
        self.progress_visible = true;
        self.progress_failed = false;
        self.clock_running = self.settings.estimator.needs_clock();
        self.mark_dirty();
        Some(id)
    }

    /// Returns the in-flight session when `id` still refers to it.
    pub(crate) fn transferring_session(&mut self, id: SessionId) -> Option<&mut UploadSession> {
        self.session
            .as_mut()
            .filter(|s| s.id == id && s.phase == Phase::Transferring)
    }

    pub(crate) fn set_progress(&mut self, percent: u8) {
        if let Some(session) = self.session.as_mut() {
            if session.progress != percent {
                session.progress = percent;
                self.dirty = true;
            }
        }
    }

    /// Stops the clock; returns whether it was running.
    pub(crate) fn stop_clock(&mut self) -> bool {
        std::mem::take(&mut self.clock_running)
    }

    pub(crate) fn finish_session(&mut self, phase: Phase) {
        if let Some(session) = self.session.as_mut() {
            session.phase = phase;
        }
        self.mark_dirty();
    }

    pub(crate) fn mark_progress_failed(&mut self) {
        self.progress_failed = true;
        self.mark_dirty();
    }

    pub(crate) fn hold_result(&mut self, metadata: DocumentMetadata, original_filename: String) {
        self.held = Some(HeldResult {
            metadata,
            original_filename,
        });
        self.results_visible = true;
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        self.session = None;
        self.progress_visible = false;
        self.progress_failed = false;
        self.results_visible = false;
        self.held = None;
        self.clock_running = false;
        self.mark_dirty();
    }
}
