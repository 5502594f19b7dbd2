use crate::{
    build_export, validate_file, AppState, Effect, Msg, Notification, Phase, SelectedFile,
    SessionId, TransportFailure, UploadReply,
};

pub const UPLOAD_IN_PROGRESS_MESSAGE: &str = "An upload is already in progress.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => acquire_file(&mut state, file),
        Msg::FilesDropped(files) => match files.into_iter().next() {
            Some(file) => acquire_file(&mut state, file),
            None => Vec::new(),
        },
        Msg::ProgressTick => {
            if state.phase() == Phase::Transferring && state.is_clock_running() {
                let estimator = state.settings().estimator;
                let current = state.session().map_or(0, |session| session.progress);
                state.set_progress(estimator.on_tick(current));
            }
            Vec::new()
        }
        Msg::BytesSent {
            session_id,
            sent,
            total,
        } => {
            let estimator = state.settings().estimator;
            if let Some(session) = state.transferring_session(session_id) {
                let next = estimator.on_bytes_sent(session.progress, sent, total);
                state.set_progress(next);
            }
            Vec::new()
        }
        Msg::TransferFinished { session_id, result } => {
            transfer_finished(&mut state, session_id, result)
        }
        Msg::DownloadClicked => match state.held_result() {
            None => Vec::new(),
            Some(held) => match build_export(&held.metadata) {
                Ok(file) => vec![Effect::SaveExport(file)],
                Err(err) => vec![Effect::Notify(Notification::error(format!(
                    "Error exporting metadata: {err}"
                )))],
            },
        },
        Msg::ResetClicked => {
            let clock_was_running = state.stop_clock();
            state.reset();
            let mut effects = Vec::with_capacity(2);
            if clock_was_running {
                effects.push(Effect::StopProgressClock);
            }
            effects.push(Effect::ClearFileInput);
            effects
        }
    };

    (state, effects)
}

fn acquire_file(state: &mut AppState, file: SelectedFile) -> Vec<Effect> {
    // One request per session; a selection during a transfer is turned away.
    if !state.phase().is_at_rest() {
        return vec![Effect::Notify(Notification::warning(
            UPLOAD_IN_PROGRESS_MESSAGE,
        ))];
    }

    // A rejected file leaves the current session and display as they are.
    if let Err(err) = validate_file(&file, state.settings().max_upload_bytes) {
        return vec![Effect::Notify(Notification::error(err.to_string()))];
    }
    state.begin_session(file.clone());

    let Some(session_id) = state.start_transfer() else {
        return Vec::new();
    };
    let mut effects = Vec::with_capacity(2);
    if state.is_clock_running() {
        effects.push(Effect::StartProgressClock);
    }
    effects.push(Effect::StartTransfer { session_id, file });
    effects
}

fn transfer_finished(
    state: &mut AppState,
    session_id: SessionId,
    result: Result<UploadReply, TransportFailure>,
) -> Vec<Effect> {
    // Replies for sessions that were reset or replaced are dropped.
    if state.transferring_session(session_id).is_none() {
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    if state.stop_clock() {
        effects.push(Effect::StopProgressClock);
    }

    match result {
        Err(failure) => {
            state.mark_progress_failed();
            state.finish_session(Phase::Failed);
            effects.push(Effect::Notify(Notification::error(format!(
                "Error uploading file: {failure}"
            ))));
        }
        Ok(reply) => {
            state.set_progress(100);
            match reply {
                UploadReply::Success {
                    metadata,
                    original_filename,
                } => {
                    state.hold_result(metadata, original_filename);
                    state.finish_session(Phase::Succeeded);
                }
                UploadReply::Failure { error } => {
                    state.finish_session(Phase::Failed);
                    effects.push(Effect::Notify(Notification::error(format!("Error: {error}"))));
                }
            }
        }
    }
    effects
}
