//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Navigation
    /// Move the cursor one line towards the start of the file. Default: k/↑
    ScrollUp,
    /// Move the cursor one line towards the end of the file. Default: j/↓
    ScrollDown,
    /// Move up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Move down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first line. Default: Home
    GotoStart,
    /// Jump to the last line. Default: End
    GotoEnd,
    /// Open the goto-address prompt. Default: g
    StartGoto,

    // Decoder column
    /// Select a decoder column transform. Field: selector (0 = none, -1 = printable, n = plugin n).
    /// Default: 0, p, 1-9
    ActivatePlugin(i64),
    /// Pin the decoder output of the current line. Default: m
    SetPreview,
    /// Drop the pinned decoder output of the current line. Default: M/Shift+m
    UnsetPreview,

    // Application
    /// Redraw the surface from the loaded buffers. Default: r
    Refresh,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// True for actions that move the cursor or view.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::GotoStart
                | KeyAction::GotoEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_actions_are_navigation() {
        assert!(KeyAction::ScrollUp.is_navigation());
        assert!(KeyAction::PageDown.is_navigation());
        assert!(KeyAction::GotoEnd.is_navigation());
    }

    #[test]
    fn decoder_actions_are_not_navigation() {
        assert!(!KeyAction::ActivatePlugin(2).is_navigation());
        assert!(!KeyAction::SetPreview.is_navigation());
        assert!(!KeyAction::Quit.is_navigation());
    }

    #[test]
    fn activate_plugin_carries_selector() {
        match KeyAction::ActivatePlugin(-1) {
            KeyAction::ActivatePlugin(selector) => assert_eq!(selector, -1),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
