//! Keyboard action handler.
//!
//! Maps a [`KeyAction`] onto the session and the mode machine. Session
//! failures are recorded on the state, never returned: the previous view
//! stays on screen and the status line shows the error.

use super::goto_input_handler::{activate_goto_input, submit_goto};
use crate::model::KeyAction;
use crate::state::AppState;
use std::io::{Read, Seek};

/// Handle one action. Returns true when the application should quit.
///
/// While help is shown only navigation, help and quit get through. After a
/// failed open every action quits.
pub fn handle_action<R: Read + Seek>(state: &mut AppState<R>, action: KeyAction) -> bool {
    if state.is_failed() || action == KeyAction::Quit {
        return true;
    }

    match action {
        KeyAction::Help => {
            state.toggle_help();
            return false;
        }
        _ if state.help_visible() && !action.is_navigation() => return false,
        KeyAction::StartGoto => {
            state.mode = activate_goto_input(std::mem::take(&mut state.mode));
            return false;
        }
        _ => {}
    }

    let Some(session) = state.session_mut() else {
        return false;
    };
    let page = session.height() as i64;

    let result = match action {
        KeyAction::ScrollDown => session.scroll(1),
        KeyAction::ScrollUp => session.scroll(-1),
        KeyAction::PageDown => session.scroll(page),
        KeyAction::PageUp => session.scroll(-page),
        KeyAction::GotoStart => session.goto_line(0),
        KeyAction::GotoEnd => session.goto_line(i64::MAX),
        KeyAction::ActivatePlugin(selector) => session.activate_plugin(selector),
        KeyAction::SetPreview => session.set_preview(),
        KeyAction::UnsetPreview => session.unset_preview(),
        KeyAction::Refresh => session.refresh(),
        KeyAction::StartGoto | KeyAction::Help | KeyAction::Quit => Ok(()),
    };
    state.record(result);
    false
}

/// Close the goto prompt and jump to what was typed.
///
/// No-op outside the prompt. Unparsable text is ignored by the session.
pub fn submit_goto_prompt<R: Read + Seek>(state: &mut AppState<R>) {
    let (mode, text) = submit_goto(std::mem::take(&mut state.mode));
    state.mode = mode;

    let (Some(text), Some(session)) = (text, state.session_mut()) else {
        return;
    };
    let result = session.goto(&text);
    state.record(result);
}

/// Resize the session to `height` visible rows.
pub fn handle_resize<R: Read + Seek>(state: &mut AppState<R>, height: usize) {
    let Some(session) = state.session_mut() else {
        return;
    };
    if session.height() == height.max(1) {
        return;
    }
    let result = session.resize(height);
    state.record(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::state::Mode;
    use crate::plugins::DROP_SELECTOR;
    use crate::state::HexSession;
    use std::io::Cursor;

    fn state_of(len: usize) -> AppState<Cursor<Vec<u8>>> {
        let config = ViewerConfig {
            bytes_per_line: 8,
            viewport_height: 10,
            ..ViewerConfig::default()
        };
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        AppState::new(HexSession::from_reader("mem", Cursor::new(data), &config).unwrap())
    }

    fn current_line(state: &AppState<Cursor<Vec<u8>>>) -> Option<u64> {
        state.session().and_then(HexSession::current_line)
    }

    #[test]
    fn quit_returns_true() {
        let mut state = state_of(64);
        assert!(handle_action(&mut state, KeyAction::Quit));
    }

    #[test]
    fn scroll_actions_move_cursor() {
        let mut state = state_of(800);

        assert!(!handle_action(&mut state, KeyAction::ScrollDown));
        assert_eq!(current_line(&state), Some(1));

        handle_action(&mut state, KeyAction::PageDown);
        assert_eq!(current_line(&state), Some(11));

        handle_action(&mut state, KeyAction::PageUp);
        handle_action(&mut state, KeyAction::ScrollUp);
        assert_eq!(current_line(&state), Some(0));
    }

    #[test]
    fn goto_end_and_start() {
        let mut state = state_of(800);

        handle_action(&mut state, KeyAction::GotoEnd);
        assert_eq!(current_line(&state), Some(99));

        handle_action(&mut state, KeyAction::GotoStart);
        assert_eq!(current_line(&state), Some(0));
    }

    #[test]
    fn help_blocks_decoder_actions_but_not_navigation() {
        let mut state = state_of(800);
        handle_action(&mut state, KeyAction::Help);
        assert!(state.help_visible());

        handle_action(&mut state, KeyAction::ActivatePlugin(DROP_SELECTOR));
        handle_action(&mut state, KeyAction::ScrollDown);

        let session = state.session().unwrap();
        assert_eq!(session.active_plugin(), -1);
        assert_eq!(session.current_line(), Some(1));

        handle_action(&mut state, KeyAction::Help);
        assert_eq!(state.mode, Mode::Viewing);
    }

    #[test]
    fn unknown_plugin_is_reported_in_status() {
        let mut state = state_of(64);

        assert!(!handle_action(&mut state, KeyAction::ActivatePlugin(9)));
        let message = state.status_message.clone().unwrap_or_default();
        assert!(message.contains('9'), "status was {message:?}");

        handle_action(&mut state, KeyAction::ScrollDown);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn start_goto_opens_prompt_and_submit_jumps() {
        let mut state = state_of(800);
        handle_action(&mut state, KeyAction::StartGoto);
        state.mode = Mode::GotoPrompt {
            text: "0x2a".to_string(),
            cursor: 4,
        };

        submit_goto_prompt(&mut state);

        assert_eq!(state.mode, Mode::Viewing);
        assert_eq!(current_line(&state), Some(42));
    }

    #[test]
    fn submit_of_garbage_keeps_line() {
        let mut state = state_of(800);
        handle_action(&mut state, KeyAction::ScrollDown);
        state.mode = Mode::GotoPrompt {
            text: "zz".to_string(),
            cursor: 2,
        };

        submit_goto_prompt(&mut state);

        assert_eq!(current_line(&state), Some(1));
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn failed_state_quits_on_any_action() {
        let mut state: AppState<Cursor<Vec<u8>>> = AppState::failed("File not found: x");
        assert!(handle_action(&mut state, KeyAction::ScrollDown));
    }

    #[test]
    fn resize_changes_session_height() {
        let mut state = state_of(800);
        handle_resize(&mut state, 5);
        assert_eq!(state.session().map(HexSession::height), Some(5));
    }
}
