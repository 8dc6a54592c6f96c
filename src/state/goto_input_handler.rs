//! Goto prompt input handling (pure state transitions).
//!
//! Handles text input for the Mode::GotoPrompt variant.
//! All functions are pure - no side effects, testable without TUI.

use crate::state::Mode;

/// Byte index of character position `cursor` in `text`.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Handle character input when in GotoPrompt mode.
/// Inserts the character at cursor position and advances cursor.
///
/// Returns updated Mode. No-op in other modes.
pub fn handle_char_input(mode: Mode, ch: char) -> Mode {
    match mode {
        Mode::GotoPrompt { mut text, cursor } => {
            text.insert(byte_index(&text, cursor), ch);
            Mode::GotoPrompt {
                text,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Handle backspace when in GotoPrompt mode.
/// Deletes character before cursor if cursor > 0.
///
/// Returns updated Mode. No-op in other modes.
pub fn handle_backspace(mode: Mode) -> Mode {
    match mode {
        Mode::GotoPrompt { mut text, cursor } if cursor > 0 => {
            text.remove(byte_index(&text, cursor - 1));
            Mode::GotoPrompt {
                text,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move cursor left by one position.
/// Saturates at 0 (does not wrap).
///
/// Returns updated Mode. No-op in other modes.
pub fn handle_cursor_left(mode: Mode) -> Mode {
    match mode {
        Mode::GotoPrompt { text, cursor } => Mode::GotoPrompt {
            text,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move cursor right by one position.
/// Saturates at text length (does not wrap).
///
/// Returns updated Mode. No-op in other modes.
pub fn handle_cursor_right(mode: Mode) -> Mode {
    match mode {
        Mode::GotoPrompt { text, cursor } => {
            let max_cursor = text.chars().count();
            Mode::GotoPrompt {
                text,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Open the goto prompt.
/// Transitions from Viewing to GotoPrompt with empty text and cursor at 0.
///
/// No-op in other modes.
pub fn activate_goto_input(mode: Mode) -> Mode {
    match mode {
        Mode::Viewing => Mode::GotoPrompt {
            text: String::new(),
            cursor: 0,
        },
        other => other,
    }
}

/// Close the goto prompt without jumping.
///
/// No-op outside GotoPrompt.
pub fn cancel_goto(mode: Mode) -> Mode {
    match mode {
        Mode::GotoPrompt { .. } => Mode::Viewing,
        other => other,
    }
}

/// Close the goto prompt, handing back the typed text.
///
/// Returns the new Mode and the text to jump to; the text is `None` outside
/// GotoPrompt. Parsing happens in the session.
pub fn submit_goto(mode: Mode) -> (Mode, Option<String>) {
    match mode {
        Mode::GotoPrompt { text, .. } => (Mode::Viewing, Some(text)),
        other => (other, None),
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "goto_input_handler_tests.rs"]
mod tests;
