use docmeta_core::{update, AppState, Msg};

#[test]
fn tick_while_idle_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ProgressTick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn download_and_reset_while_idle_leave_state_alone() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::DownloadClicked);
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (mut next, effects) = update(state, Msg::ResetClicked);
    assert!(next.consume_dirty());
    assert_eq!(next, AppState::new());
    assert_eq!(effects, vec![docmeta_core::Effect::ClearFileInput]);
}
