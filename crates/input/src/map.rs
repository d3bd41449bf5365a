//! Key mapping from terminal events to engine keys.
//!
//! Terminals report characters, not physical keys, so shifted symbols are
//! folded back into `(key, shift)` pairs using the US layout of [`KeyMap`].

use crate::keymap::KeyMap;
use crate::types::{Key, Modifier};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A terminal key event resolved to an engine key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
}

/// Map a terminal key event to an engine key stroke.
pub fn map_key_event(keymap: &KeyMap, event: KeyEvent) -> Option<KeyStroke> {
    let shift_mod = event.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    let (key, shift) = match event.code {
        KeyCode::Char('`') => (Key::Tilde, false),
        KeyCode::Char('~') => (Key::Tilde, true),
        KeyCode::Char(c) => {
            // Control chords arrive as the lowercase letter.
            if let Some(key) = Key::from_letter(c) {
                (key, shift_mod || c.is_ascii_uppercase())
            } else {
                let (key, modifier) = keymap.find(c)?;
                (key, modifier == Modifier::Shift)
            }
        }
        KeyCode::Esc => (Key::Escape, shift_mod),
        KeyCode::Enter => (Key::Enter, shift_mod),
        KeyCode::Tab => (Key::Tab, shift_mod),
        KeyCode::BackTab => (Key::Tab, true),
        KeyCode::Backspace => (Key::Backspace, shift_mod),
        KeyCode::Delete => (Key::Delete, shift_mod),
        KeyCode::Insert => (Key::Insert, shift_mod),
        KeyCode::Left => (Key::Left, shift_mod),
        KeyCode::Right => (Key::Right, shift_mod),
        KeyCode::Up => (Key::Up, shift_mod),
        KeyCode::Down => (Key::Down, shift_mod),
        KeyCode::Home => (Key::Home, shift_mod),
        KeyCode::End => (Key::End, shift_mod),
        KeyCode::PageUp => (Key::PageUp, shift_mod),
        KeyCode::PageDown => (Key::PageDown, shift_mod),
        KeyCode::F(n @ 1..=12) => (function_key(n), shift_mod),
        _ => return None,
    };

    Some(KeyStroke { key, shift, ctrl })
}

fn function_key(n: u8) -> Key {
    const F_KEYS: [Key; 12] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
    F_KEYS[(n as usize - 1).min(11)]
}

/// Check if key should quit the host program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn map(event: KeyEvent) -> Option<KeyStroke> {
        map_key_event(&KeyMap::new(), event)
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(
            map(KeyEvent::from(KeyCode::Char('a'))),
            Some(KeyStroke { key: Key::A, shift: false, ctrl: false })
        );
        assert_eq!(
            map(KeyEvent::from(KeyCode::Char('A'))),
            Some(KeyStroke { key: Key::A, shift: true, ctrl: false })
        );
        assert_eq!(
            map(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(KeyStroke { key: Key::U, shift: false, ctrl: true })
        );
    }

    #[test]
    fn test_shifted_symbols_fold_to_keys() {
        assert_eq!(
            map(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::SHIFT)),
            Some(KeyStroke { key: Key::D1, shift: true, ctrl: false })
        );
        assert_eq!(
            map(KeyEvent::from(KeyCode::Char('|'))),
            Some(KeyStroke { key: Key::Backslash, shift: true, ctrl: false })
        );
        assert_eq!(
            map(KeyEvent::from(KeyCode::Char('-'))),
            Some(KeyStroke { key: Key::Minus, shift: false, ctrl: false })
        );
    }

    #[test]
    fn test_open_key() {
        assert_eq!(map(KeyEvent::from(KeyCode::Char('`'))).map(|s| s.key), Some(Key::Tilde));
        assert_eq!(map(KeyEvent::from(KeyCode::Char('~'))).map(|s| s.key), Some(Key::Tilde));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map(KeyEvent::from(KeyCode::Esc)).map(|s| s.key), Some(Key::Escape));
        assert_eq!(map(KeyEvent::from(KeyCode::PageUp)).map(|s| s.key), Some(Key::PageUp));
        assert_eq!(
            map(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(KeyStroke { key: Key::Up, shift: true, ctrl: false })
        );
        assert_eq!(map(KeyEvent::from(KeyCode::F(5))).map(|s| s.key), Some(Key::F5));
        assert_eq!(map(KeyEvent::from(KeyCode::F(13))), None);
        assert_eq!(map(KeyEvent::from(KeyCode::Char('é'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
