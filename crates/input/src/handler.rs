//! Terminal keyboard tracker.
//!
//! Builds per-frame [`KeyboardState`] snapshots out of crossterm key events.
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::keyboard::{InputDevice, KeyboardState};
use crate::keymap::KeyMap;
use crate::map::{map_key_event, KeyStroke};
use crate::types::{Key, KEY_COUNT};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks terminal key events and exposes them as frame snapshots.
#[derive(Debug, Clone)]
pub struct TerminalKeyboard {
    keymap: KeyMap,
    state: KeyboardState,
    last_seen: [Option<Instant>; KEY_COUNT],
    key_release_timeout_ms: u32,
}

impl TerminalKeyboard {
    pub fn new() -> Self {
        Self {
            keymap: KeyMap::new(),
            state: KeyboardState::new(),
            last_seen: [None; KEY_COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    /// Start a new frame.
    ///
    /// Modifier keys only live for the frame their chord arrived in; other
    /// keys auto-release once no event has refreshed them for the timeout.
    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.state.begin_frame();

        for key in [
            Key::LeftShift,
            Key::RightShift,
            Key::LeftControl,
            Key::RightControl,
        ] {
            self.state.release(key);
            self.last_seen[key.ordinal()] = None;
        }

        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for key in Key::ALL {
            if let Some(seen) = self.last_seen[key.ordinal()] {
                if now.saturating_duration_since(seen) > timeout {
                    self.state.release(key);
                    self.last_seen[key.ordinal()] = None;
                }
            }
        }
    }

    /// Feed one terminal event. Returns the resolved stroke for callers that
    /// also want to route it elsewhere (e.g. to the game while the console is
    /// closed).
    pub fn handle_event(&mut self, event: KeyEvent) -> Option<KeyStroke> {
        self.handle_event_at(event, Instant::now())
    }

    pub fn handle_event_at(&mut self, event: KeyEvent, now: Instant) -> Option<KeyStroke> {
        let stroke = map_key_event(&self.keymap, event)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(stroke, now),
            KeyEventKind::Release => {
                self.state.release(stroke.key);
                self.last_seen[stroke.key.ordinal()] = None;
            }
        }
        Some(stroke)
    }

    fn press(&mut self, stroke: KeyStroke, now: Instant) {
        // A repeat of a key that was already down last frame counts as a new
        // press, so terminal auto-repeat behaves like typing.
        if self.state.was_down(stroke.key) {
            self.state.rearm(stroke.key);
        }
        self.state.press(stroke.key);
        self.last_seen[stroke.key.ordinal()] = Some(now);

        if stroke.shift {
            self.state.press(Key::LeftShift);
        }
        if stroke.ctrl {
            self.state.press(Key::LeftControl);
        }
    }

    pub fn reset(&mut self) {
        self.state = KeyboardState::new();
        self.last_seen = [None; KEY_COUNT];
    }
}

impl Default for TerminalKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for TerminalKeyboard {
    fn is_down(&self, key: Key) -> bool {
        self.state.is_down(key)
    }

    fn was_down(&self, key: Key) -> bool {
        self.state.was_down(key)
    }

    fn newly_pressed(&self) -> crate::keyboard::PressedKeys {
        self.state.newly_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_is_edge_for_one_frame() {
        let mut kb = TerminalKeyboard::new().with_key_release_timeout_ms(10_000);
        let t0 = Instant::now();

        kb.begin_frame_at(t0);
        kb.handle_event_at(press(KeyCode::Char('x'), KeyModifiers::NONE), t0);
        assert!(kb.is_pressed(Key::X));

        kb.begin_frame_at(t0);
        assert!(kb.is_down(Key::X));
        assert!(!kb.is_pressed(Key::X));
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut kb = TerminalKeyboard::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kb.begin_frame_at(t0);
        kb.handle_event_at(press(KeyCode::Left, KeyModifiers::NONE), t0);
        assert!(kb.is_down(Key::Left));

        kb.begin_frame_at(t0 + Duration::from_millis(51));
        assert!(!kb.is_down(Key::Left));
    }

    #[test]
    fn test_release_event_clears_key() {
        let mut kb = TerminalKeyboard::new().with_key_release_timeout_ms(10_000);
        let t0 = Instant::now();
        kb.handle_event_at(press(KeyCode::Enter, KeyModifiers::NONE), t0);
        kb.handle_event_at(release(KeyCode::Enter), t0);
        assert!(!kb.is_down(Key::Enter));
    }

    #[test]
    fn test_repeat_after_frame_boundary_is_a_new_press() {
        let mut kb = TerminalKeyboard::new().with_key_release_timeout_ms(10_000);
        let t0 = Instant::now();

        kb.begin_frame_at(t0);
        kb.handle_event_at(press(KeyCode::Backspace, KeyModifiers::NONE), t0);
        kb.begin_frame_at(t0);
        assert!(!kb.is_pressed(Key::Backspace));

        kb.handle_event_at(press(KeyCode::Backspace, KeyModifiers::NONE), t0);
        assert!(kb.is_pressed(Key::Backspace));
    }

    #[test]
    fn test_modifiers_last_one_frame() {
        let mut kb = TerminalKeyboard::new().with_key_release_timeout_ms(10_000);
        let t0 = Instant::now();

        kb.begin_frame_at(t0);
        kb.handle_event_at(press(KeyCode::PageUp, KeyModifiers::SHIFT), t0);
        assert!(kb.shift());
        assert!(!kb.ctrl());

        kb.begin_frame_at(t0);
        assert!(!kb.shift());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut kb = TerminalKeyboard::new();
        kb.handle_event(press(KeyCode::Char('a'), KeyModifiers::NONE));
        kb.reset();
        assert!(kb.state().current().is_empty());
        assert!(kb.state().previous().is_empty());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let kb = TerminalKeyboard::new();
        assert!(kb.key_release_timeout_ms() > 0);
    }
}
