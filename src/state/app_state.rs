//! Application state and transitions.
//!
//! AppState is the root state type of the interactive shell: the open
//! session (if opening succeeded), the input mode, and the last error to
//! show in the status line.

use super::session::HexSession;
use crate::model::SessionError;
use std::fs::File;
use tracing::warn;

// ===== Mode =====

/// Input mode of the shell.
/// Sum type enforces exactly one mode at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys drive the session through the key bindings.
    #[default]
    Viewing,
    /// User is typing a goto address.
    GotoPrompt {
        /// Text typed so far.
        text: String,
        /// Cursor position in characters.
        cursor: usize,
    },
    /// Help overlay is shown.
    Help,
    /// The file could not be opened; any key quits.
    Failed {
        /// What went wrong.
        message: String,
    },
}

// ===== AppState =====

/// Application state.
///
/// # State Machine
///
/// - Viewing → GotoPrompt (`g`) → Viewing (Enter submits, Esc cancels)
/// - Viewing ⇄ Help (`?`, Esc closes)
/// - Failed is terminal: it is entered only when opening fails
#[derive(Debug)]
pub struct AppState<R = File> {
    /// The open file. `None` only in [`Mode::Failed`].
    session: Option<HexSession<R>>,

    /// Current input mode.
    pub mode: Mode,

    /// Last recoverable error, shown in the status line until the next
    /// successful action.
    pub status_message: Option<String>,
}

impl<R> AppState<R> {
    /// State viewing `session`.
    pub fn new(session: HexSession<R>) -> Self {
        Self {
            session: Some(session),
            mode: Mode::Viewing,
            status_message: None,
        }
    }

    /// State for a file that could not be opened.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            session: None,
            mode: Mode::Failed {
                message: message.into(),
            },
            status_message: None,
        }
    }

    /// The open session.
    pub fn session(&self) -> Option<&HexSession<R>> {
        self.session.as_ref()
    }

    /// The open session, mutably.
    pub fn session_mut(&mut self) -> Option<&mut HexSession<R>> {
        self.session.as_mut()
    }

    /// True once opening failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.mode, Mode::Failed { .. })
    }

    /// True while the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.mode == Mode::Help
    }

    /// Show or hide the help overlay. No-op outside Viewing and Help.
    pub fn toggle_help(&mut self) {
        self.mode = match std::mem::take(&mut self.mode) {
            Mode::Viewing => Mode::Help,
            Mode::Help => Mode::Viewing,
            other => other,
        };
    }

    /// Record the outcome of a session operation.
    ///
    /// Errors are logged and kept for the status line; success clears the
    /// previous message.
    pub fn record(&mut self, result: Result<(), SessionError>) {
        match result {
            Ok(()) => self.status_message = None,
            Err(err) => {
                warn!(error = %err, "operation failed, keeping previous view");
                self.status_message = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
