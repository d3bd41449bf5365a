//! Keyboard input module (engine-facing).
//!
//! This module is independent of any UI framework apart from the terminal
//! adapter. It provides:
//!
//! - [`KeyMap`]: the flat `(key, modifier) -> char` decoding table
//! - [`KeyboardState`] / [`InputDevice`]: two-frame key snapshots with
//!   edge-triggered press detection
//! - [`map_key_event`]: crossterm key events to engine keys
//! - [`TerminalKeyboard`]: snapshot tracking for terminals, including
//!   terminals without key-release events

pub mod handler;
pub mod keyboard;
pub mod keymap;
pub mod map;

pub use phantom_types as types;

pub use handler::TerminalKeyboard;
pub use keyboard::{InputDevice, KeySet, KeyboardState, PressedKeys, MAX_PRESSED_PER_FRAME};
pub use keymap::KeyMap;
pub use map::{map_key_event, should_quit, KeyStroke};
