//! Keyboard bindings for the row view.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Character keys are matched on the
/// character alone: terminals disagree on whether `G` or `:` carry SHIFT.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

/// Strip what the map does not key on: event kind/state, and SHIFT on chars.
fn normalize(key: KeyEvent) -> KeyEvent {
    let mut modifiers = key.modifiers;
    if matches!(key.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(key.code, modifiers)
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Bind `code` + `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings
            .insert(normalize(KeyEvent::new(code, modifiers)), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Vim-style scrolling
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('K'), none, KeyAction::ScrollUpFast);
        keys.bind(KeyCode::Char('J'), none, KeyAction::ScrollDownFast);
        keys.bind(KeyCode::Char('G'), none, KeyAction::ScrollToLatest);

        // Arrow and page keys
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::ScrollUpFast);
        keys.bind(KeyCode::PageDown, none, KeyAction::ScrollDownFast);
        keys.bind(KeyCode::End, none, KeyAction::ScrollToLatest);

        // Modes
        keys.bind(KeyCode::Char(':'), none, KeyAction::EnterSendMode);
        keys.bind(KeyCode::Char('i'), none, KeyAction::EnterSendMode);
        keys.bind(KeyCode::Char('h'), none, KeyAction::ToggleHistory);

        // Display
        keys.bind(KeyCode::Char('t'), none, KeyAction::ToggleTimestamps);
        keys.bind(KeyCode::Char('c'), none, KeyAction::ClearRows);

        // Send options
        keys.bind(KeyCode::Char('l'), ctrl, KeyAction::CycleLineEnding);
        keys.bind(KeyCode::Char('u'), none, KeyAction::ToggleUpperOnSend);
        keys.bind(KeyCode::Char('o'), none, KeyAction::ToggleSendOnType);
        keys.bind(KeyCode::Char('b'), ctrl, KeyAction::SendBreak);

        // Device
        keys.bind(KeyCode::Char('p'), none, KeyAction::TogglePause);

        // Application
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);

        keys
    }
}
