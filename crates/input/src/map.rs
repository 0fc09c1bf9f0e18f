//! Key mapping from terminal events to key identifiers.
//!
//! Identifiers follow the DOM `KeyboardEvent.code` vocabulary (`ArrowLeft`,
//! `Space`, `KeyA`, `Digit1`, ...), so the core sees the same names a browser
//! host would deliver.

use crate::types::keys;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Identifier for a key code, or None for keys without one.
pub fn key_id(code: KeyCode) -> Option<String> {
    let id = match code {
        KeyCode::Left => keys::ARROW_LEFT.to_string(),
        KeyCode::Right => keys::ARROW_RIGHT.to_string(),
        KeyCode::Up => keys::ARROW_UP.to_string(),
        KeyCode::Down => keys::ARROW_DOWN.to_string(),
        KeyCode::Enter => keys::ENTER.to_string(),
        KeyCode::Esc => keys::ESCAPE.to_string(),
        KeyCode::Tab => keys::TAB.to_string(),
        KeyCode::Backspace => keys::BACKSPACE.to_string(),
        KeyCode::Char(' ') => keys::SPACE.to_string(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    Some(id)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key asks for a new game.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key_id(KeyCode::Left).as_deref(), Some("ArrowLeft"));
        assert_eq!(key_id(KeyCode::Right).as_deref(), Some("ArrowRight"));
        assert_eq!(key_id(KeyCode::Up).as_deref(), Some("ArrowUp"));
        assert_eq!(key_id(KeyCode::Down).as_deref(), Some("ArrowDown"));
    }

    #[test]
    fn test_space_and_letters() {
        assert_eq!(key_id(KeyCode::Char(' ')).as_deref(), Some("Space"));
        assert_eq!(key_id(KeyCode::Char('a')).as_deref(), Some("KeyA"));
        assert_eq!(key_id(KeyCode::Char('A')).as_deref(), Some("KeyA"));
        assert_eq!(key_id(KeyCode::Char('7')).as_deref(), Some("Digit7"));
        assert_eq!(key_id(KeyCode::Char('!')), None);
        assert_eq!(key_id(KeyCode::Null), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_restart_key() {
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(is_restart(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!is_restart(KeyEvent::new(
            KeyCode::Char('r'),
            KeyModifiers::CONTROL
        )));
    }
}
