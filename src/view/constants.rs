//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for position, decoder and error text.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows taken by the pad's top and bottom border.
pub const PAD_BORDER_HEIGHT: u16 = 2;

/// Height of the goto prompt in lines.
///
/// Includes border and text input area.
pub const GOTO_INPUT_HEIGHT: u16 = 3;

/// Width of the goto prompt in columns.
pub const GOTO_INPUT_WIDTH: u16 = 32;

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Rows of chrome around the pad.
pub const CHROME_HEIGHT: u16 = TITLE_BAR_HEIGHT + PAD_BORDER_HEIGHT + STATUS_BAR_HEIGHT;

/// Pad rows that fit in a terminal `terminal_rows` high. Never zero.
pub fn viewport_rows(terminal_rows: u16) -> usize {
    usize::from(terminal_rows.saturating_sub(CHROME_HEIGHT)).max(1)
}
