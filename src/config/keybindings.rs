//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Only consulted while the search box is not focused; typing goes to the
/// input widget first.
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

        // Scrolling
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Home, none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::End, none, KeyAction::ScrollToBottom);

        // Search and paging
        keys.bind(KeyCode::Char('/'), none, KeyAction::FocusSearch);
        keys.bind(KeyCode::Char('m'), none, KeyAction::LoadMore);

        // Zoom overlay
        keys.bind(KeyCode::Enter, none, KeyAction::OpenOverlay);
        keys.bind(KeyCode::Char('o'), none, KeyAction::OpenOverlay);
        keys.bind(KeyCode::Esc, none, KeyAction::CloseOverlay);
        keys.bind(KeyCode::Char('l'), none, KeyAction::NextImage);
        keys.bind(KeyCode::Right, none, KeyAction::NextImage);
        keys.bind(KeyCode::Char('h'), none, KeyAction::PrevImage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevImage);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);

        keys
    }
}
