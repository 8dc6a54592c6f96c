//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::plugins::{DROP_SELECTOR, PRINTABLE_SELECTOR};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Vim-style and arrow scrolling
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);

        // Page navigation
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);

        // Jumps
        keys.bind(KeyCode::Home, none, KeyAction::GotoStart);
        keys.bind(KeyCode::End, none, KeyAction::GotoEnd);
        keys.bind(KeyCode::Char('g'), none, KeyAction::StartGoto);

        // Decoder column
        keys.bind(KeyCode::Char('0'), none, KeyAction::ActivatePlugin(DROP_SELECTOR));
        keys.bind(KeyCode::Char('p'), none, KeyAction::ActivatePlugin(PRINTABLE_SELECTOR));
        for (digit, selector) in ('1'..='9').zip(1..) {
            keys.bind(KeyCode::Char(digit), none, KeyAction::ActivatePlugin(selector));
        }
        keys.bind(KeyCode::Char('m'), none, KeyAction::SetPreview);
        keys.bind(KeyCode::Char('M'), KeyModifiers::SHIFT, KeyAction::UnsetPreview);

        // Application controls
        keys.bind(KeyCode::Char('r'), none, KeyAction::Refresh);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
