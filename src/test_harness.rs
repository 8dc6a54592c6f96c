//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> over in-memory bytes with convenient methods for
//! simulating user interactions.

use crate::config::keybindings::KeyBindings;
use crate::config::ViewerConfig;
use crate::state::{AppState, HexSession};
use crate::view::{constants, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io::Cursor;

/// In-memory byte source used by every harness.
pub type MemSource = Cursor<Vec<u8>>;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Trailing whitespace and empty lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Bytes `0, 1, 2, ...` wrapping at 256.
pub fn counting_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend, MemSource>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// View `bytes` at `bytes_per_line` in an 80x24 terminal.
    pub fn from_bytes(bytes: Vec<u8>, bytes_per_line: usize) -> Result<Self, TuiError> {
        Self::from_bytes_with_size(bytes, bytes_per_line, 80, 24)
    }

    /// View `bytes` with a custom terminal size
    ///
    /// The viewport height follows the terminal the way the binary sizes it.
    ///
    /// # Arguments
    /// * `bytes` - File contents
    /// * `bytes_per_line` - Bytes rendered per line
    /// * `width` - Terminal width in columns
    /// * `height` - Terminal height in rows
    pub fn from_bytes_with_size(
        bytes: Vec<u8>,
        bytes_per_line: usize,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let config = ViewerConfig {
            bytes_per_line,
            viewport_height: constants::viewport_rows(height),
            ..ViewerConfig::default()
        };
        let session = HexSession::from_reader("mem.bin", Cursor::new(bytes), &config)
            .map_err(crate::model::AppError::from)?;
        Self::from_state(AppState::new(session), width, height)
    }

    /// Harness over an existing state.
    pub fn from_state(
        app_state: AppState<MemSource>,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let app = TuiApp::new_for_test(terminal, app_state, KeyBindings::default());
        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send the same key `count` times.
    pub fn send_key_times(&mut self, key: KeyCode, count: usize) {
        for _ in 0..count {
            if self.send_key(key) {
                break;
            }
        }
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break; // Quit encountered
            }
        }
    }

    /// Open the goto prompt, type `address` and submit it.
    pub fn goto(&mut self, address: &str) {
        self.send_key(KeyCode::Char('g'));
        self.type_text(address);
        self.send_key(KeyCode::Enter);
    }

    /// Resize the terminal to `height` rows.
    pub fn resize(&mut self, height: u16) {
        self.app.handle_resize_test(height);
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState<MemSource> {
        self.app.app_state()
    }

    /// The open session.
    ///
    /// # Panics
    /// Panics if opening failed.
    pub fn session(&self) -> &HexSession<MemSource> {
        self.state().session().expect("harness session is open")
    }

    /// The open session, mutably.
    pub fn session_mut(&mut self) -> &mut HexSession<MemSource> {
        self.app
            .app_state_mut()
            .session_mut()
            .expect("harness session is open")
    }

    /// Line under the cursor.
    pub fn current_line(&self) -> Option<u64> {
        self.session().current_line()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");

        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Render and return screen row `y` with trailing blanks trimmed.
    pub fn row(&mut self, y: u16) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        let buffer = self.app.terminal().backend().buffer();
        (buffer.area().left()..buffer.area().right())
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}
