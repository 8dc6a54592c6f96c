//! Styling for the viewer chrome.
//!
//! Colors can be switched off; the cursor highlight is a modifier and stays.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Config with colors explicitly on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== ViewerStyles =====

/// Styles for every piece of chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerStyles {
    /// Title bar with the file name.
    pub title: Style,
    /// Pad border.
    pub border: Style,
    /// Rows of the current line.
    pub cursor: Style,
    /// Status line.
    pub status: Style,
    /// Error text in the status line and the failure screen.
    pub error: Style,
    /// Category headers in the help overlay.
    pub section_header: Style,
    /// Key names in the help overlay.
    pub key: Style,
    /// Dismissal hints.
    pub muted: Style,
}

impl ViewerStyles {
    /// Styles honoring `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let cursor = Style::default().add_modifier(Modifier::REVERSED);
        if !config.colors_enabled() {
            let plain = Style::default();
            return Self {
                title: plain.add_modifier(Modifier::BOLD),
                border: plain,
                cursor,
                status: plain,
                error: plain.add_modifier(Modifier::BOLD),
                section_header: plain.add_modifier(Modifier::BOLD),
                key: plain.add_modifier(Modifier::BOLD),
                muted: plain.add_modifier(Modifier::DIM),
            };
        }

        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            cursor,
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            section_header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            key: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Default for ViewerStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}
