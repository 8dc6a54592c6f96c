//! Tests for AppState.

use super::*;
use crate::config::ViewerConfig;
use crate::model::{ColumnError, SessionError};
use std::io::Cursor;

fn state() -> AppState<Cursor<Vec<u8>>> {
    let session =
        HexSession::from_reader("mem", Cursor::new(vec![0u8; 32]), &ViewerConfig::default())
            .unwrap();
    AppState::new(session)
}

#[test]
fn new_state_is_viewing_with_session() {
    let state = state();
    assert_eq!(state.mode, Mode::Viewing);
    assert!(state.session().is_some());
    assert!(!state.is_failed());
    assert_eq!(state.status_message, None);
}

#[test]
fn failed_state_has_no_session() {
    let state: AppState<Cursor<Vec<u8>>> = AppState::failed("File not found: /x");
    assert!(state.is_failed());
    assert!(state.session().is_none());
    assert_eq!(
        state.mode,
        Mode::Failed {
            message: "File not found: /x".to_string()
        }
    );
}

#[test]
fn toggle_help_round_trips() {
    let mut state = state();
    state.toggle_help();
    assert!(state.help_visible());
    state.toggle_help();
    assert_eq!(state.mode, Mode::Viewing);
}

#[test]
fn toggle_help_ignored_in_goto_prompt() {
    let mut state = state();
    state.mode = Mode::GotoPrompt {
        text: "1".to_string(),
        cursor: 1,
    };
    state.toggle_help();
    assert!(matches!(state.mode, Mode::GotoPrompt { .. }));
}

#[test]
fn record_keeps_error_until_next_success() {
    let mut state = state();

    state.record(Err(SessionError::from(ColumnError::EmptyColumn { column: 1 })));
    assert!(state
        .status_message
        .as_deref()
        .is_some_and(|m| m.contains("Column 1")));

    state.record(Ok(()));
    assert_eq!(state.status_message, None);
}
