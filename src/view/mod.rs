//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod goto_input;
mod help;
mod layout;
mod pad;
mod styles;

pub use goto_input::GotoInput;
pub use help::render_help_overlay;
pub use layout::{render_layout, status_text};
pub use pad::PadView;
pub use styles::{ColorConfig, ViewerStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::state::{
    goto_input_handler, handle_action, handle_resize, submit_goto_prompt, AppState, Mode,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Read, Seek, Stdout};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// byte source so tests can view in-memory data.
pub struct TuiApp<B, R = File>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState<R>,
    key_bindings: KeyBindings,
    styles: ViewerStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, styles: ViewerStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Blocks on terminal input;
    /// each event is handled completely before the next redraw.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    handle_resize(&mut self.app_state, constants::viewport_rows(height));
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B, R> TuiApp<B, R>
where
    B: ratatui::backend::Backend,
    R: Read + Seek,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.is_failed() {
            return true;
        }

        if key.code == KeyCode::Esc && self.app_state.help_visible() {
            self.app_state.toggle_help();
            return false;
        }

        if matches!(self.app_state.mode, Mode::GotoPrompt { .. }) {
            self.handle_prompt_key(key);
            return false;
        }

        match self.key_bindings.get(key) {
            Some(action) => handle_action(&mut self.app_state, action),
            None => false,
        }
    }

    /// Edit the goto prompt. Keys without a meaning here are swallowed.
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let mode = std::mem::take(&mut self.app_state.mode);
        self.app_state.mode = match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                goto_input_handler::handle_char_input(mode, ch)
            }
            KeyCode::Backspace => goto_input_handler::handle_backspace(mode),
            KeyCode::Left => goto_input_handler::handle_cursor_left(mode),
            KeyCode::Right => goto_input_handler::handle_cursor_right(mode),
            KeyCode::Esc => goto_input_handler::cancel_goto(mode),
            KeyCode::Enter => {
                self.app_state.mode = mode;
                submit_goto_prompt(&mut self.app_state);
                return;
            }
            _ => mode,
        };
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let styles = self.styles;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, &self.app_state, &styles);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
//
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used by every test module
impl<B, R> TuiApp<B, R>
where
    B: ratatui::backend::Backend,
    R: Read + Seek,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips raw mode and the alternate screen so a `TestBackend` can be used.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState<R>,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles: ViewerStyles::default(),
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState<R> {
        &self.app_state
    }

    /// Get mutable reference to app state (test-only accessor)
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState<R> {
        &mut self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Apply a terminal resize the way the event loop does (test-only accessor)
    pub(crate) fn handle_resize_test(&mut self, terminal_rows: u16) {
        handle_resize(&mut self.app_state, constants::viewport_rows(terminal_rows));
    }

    /// Render current state to terminal (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI over `app_state`
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_state(app_state: AppState, styles: ViewerStyles) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, styles)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
