//! Key mapping from terminal events to input events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::InputEvent;

/// Map a key press to an input event.
pub fn map_key_press(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::MoveLeftDown)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::MoveRightDown)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputEvent::SoftDropDown)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::Rotate),
        KeyCode::Char(' ') => Some(InputEvent::HardDrop),
        KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Map a key release to an input event. Only held-state keys matter here.
pub fn map_key_release(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputEvent::MoveLeftUp),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::MoveRightUp)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::SoftDropUp),
        _ => None,
    }
}

/// Whether the key should quit the game outright.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
