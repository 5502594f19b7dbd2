use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use docmeta_core::{update, AppState, Msg, Notification, Phase, Severity};
use docmeta_engine::{select_local_file, EngineHandle};
use docmeta_logging::docmeta_debug;

use super::config::AppConfig;
use super::effects::{EffectReport, EffectRunner};
use super::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded,
    Failed,
    Rejected,
}

pub struct UploadOptions {
    pub export: bool,
    pub export_dir: PathBuf,
}

/// Drives one upload through the pipeline: every input is a `Msg` handled in
/// arrival order on this thread.
pub fn run_upload(
    config: &AppConfig,
    paths: &[PathBuf],
    options: UploadOptions,
    out: &mut dyn Write,
) -> Result<UploadOutcome> {
    let files = paths
        .iter()
        .map(|path| select_local_file(path))
        .collect::<Result<Vec<_>, _>>()
        .context("reading selected files")?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let engine = EngineHandle::new(config.upload_settings());
    let mut runner = EffectRunner::new(
        engine,
        msg_tx,
        config.tick_interval(),
        options.export_dir,
    );
    let mut session = Session {
        state: AppState::with_settings(config.pipeline_settings()),
        last_progress: None,
    };

    let first = if files.len() == 1 {
        Msg::FileSelected(files.into_iter().next().context("no file selected")?)
    } else {
        Msg::FilesDropped(files)
    };
    session.dispatch(first, &mut runner, out)?;

    while !session.state.phase().is_at_rest() {
        let msg = msg_rx.recv().context("message queue closed")?;
        session.dispatch(msg, &mut runner, out)?;
    }
    if session.last_progress.is_some() {
        writeln!(out)?;
    }

    let outcome = match session.state.phase() {
        Phase::Succeeded => UploadOutcome::Succeeded,
        Phase::Failed => UploadOutcome::Failed,
        _ => UploadOutcome::Rejected,
    };

    if let Some(lines) = render::render_results(&session.state.view()) {
        for line in lines {
            writeln!(out, "{line}")?;
        }
    }

    if options.export {
        session.dispatch(Msg::DownloadClicked, &mut runner, out)?;
    }
    Ok(outcome)
}

struct Session {
    state: AppState,
    last_progress: Option<String>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg, runner: &mut EffectRunner, out: &mut dyn Write) -> Result<()> {
        docmeta_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        let report = runner.run(effects);
        if was_dirty {
            if let Some(line) = render::progress_line(&view) {
                if self.last_progress.as_deref() != Some(line.as_str()) {
                    write!(out, "\r{line}")?;
                    out.flush()?;
                    self.last_progress = Some(line);
                }
            }
        }
        surface(report, out)
    }
}

fn surface(report: EffectReport, out: &mut dyn Write) -> Result<()> {
    for Notification { severity, message } in report.notifications {
        let prefix = match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "note",
        };
        eprintln!("{prefix}: {message}");
    }
    for path in report.saved_exports {
        writeln!(out, "Saved metadata to {}", path.display())?;
    }
    Ok(())
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FileSelected(_) => "FileSelected",
        Msg::FilesDropped(_) => "FilesDropped",
        Msg::ProgressTick => "ProgressTick",
        Msg::BytesSent { .. } => "BytesSent",
        Msg::TransferFinished { .. } => "TransferFinished",
        Msg::DownloadClicked => "DownloadClicked",
        Msg::ResetClicked => "ResetClicked",
    }
}
