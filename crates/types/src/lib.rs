//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine layer.
//! All types are plain data with no behaviour tied to a particular backend, so
//! they can be shared by the console, the audio system and any renderer.
//!
//! # Console Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_LINE_COUNT` | 12 | Visible scrollback lines |
//! | `DEFAULT_ALPHA` | 0.8 | Background panel opacity |
//! | `DEFAULT_PADDING` | 4.0 | Panel padding in canvas units |
//! | `DEFAULT_PROMPT` | `"] "` | Prompt drawn before the input |
//! | `DEFAULT_SCROLLBACK_LIMIT` | 4096 | Completed lines kept before eviction |
//! | `BLINK_PERIOD_SECS` | 2.0 | Full on/off cycle of the cursor |
//!
//! # Keys
//!
//! [`Key`] is a closed set of key identifiers. Every key has a stable ordinal
//! in `0..KEY_COUNT`, which lets lookup tables and key sets be flat arrays or
//! bitsets instead of maps.
//!
//! # Examples
//!
//! ```
//! use phantom_types::{Key, Modifier, Rgb, KEY_COUNT};
//!
//! assert_eq!(Key::ALL.len(), KEY_COUNT);
//! assert_eq!(Key::ALL[Key::Q.ordinal()], Key::Q);
//! assert_eq!(Modifier::from_shift(true), Modifier::Shift);
//!
//! let grey = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
//! assert_eq!(grey, Rgb::new(128, 128, 128));
//! ```

use serde::{Deserialize, Serialize};

pub mod math;

pub use math::{Vec2, Vec3};

/// Fixed timestep interval of the demo host loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Visible scrollback lines when no configuration is given
pub const DEFAULT_LINE_COUNT: usize = 12;

/// Background panel opacity
pub const DEFAULT_ALPHA: f32 = 0.8;

/// Panel padding in canvas units
pub const DEFAULT_PADDING: f32 = 4.0;

/// Prompt drawn in front of the edited command line
pub const DEFAULT_PROMPT: &str = "] ";

/// Maximum number of completed lines kept in the console scrollback
pub const DEFAULT_SCROLLBACK_LIMIT: usize = 4096;

/// Cursor blink cycle in seconds (visible for the first half)
pub const BLINK_PERIOD_SECS: f32 = 2.0;

/// Line count change per Ctrl+Up/Down press
pub const RESIZE_STEP: usize = 1;

/// Line count change per Ctrl+Shift+Up/Down press
pub const RESIZE_STEP_FAST: usize = 5;

/// Extra characters added to the first word-wrap guess
pub const WRAP_GUESS_SLACK: usize = 5;

/// Key that always closes the console
pub const CANCEL_KEY: Key = Key::Escape;

/// Key that toggles the console by default
pub const DEFAULT_OPEN_KEY: Key = Key::Tilde;

/// Number of distinct [`Key`] values
pub const KEY_COUNT: usize = 78;

/// Number of distinct [`Modifier`] values
pub const MODIFIER_COUNT: usize = 2;

/// Keyboard key identifiers
///
/// The punctuation keys are named after the unshifted glyph on a US layout:
/// `Backslash` produces `\` and `|`, `Equals` produces `=` and `+`, and so on.
/// `Tilde` is the key left of `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Space,
    Backslash,
    OpenBracket,
    CloseBracket,
    Comma,
    Period,
    Semicolon,
    Slash,
    Quote,
    Minus,
    Equals,
    Tilde,
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl Key {
    /// Every key, indexed by [`Key::ordinal`].
    pub const ALL: [Key; KEY_COUNT] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
        Key::Space,
        Key::Backslash,
        Key::OpenBracket,
        Key::CloseBracket,
        Key::Comma,
        Key::Period,
        Key::Semicolon,
        Key::Slash,
        Key::Quote,
        Key::Minus,
        Key::Equals,
        Key::Tilde,
        Key::Escape,
        Key::Enter,
        Key::Tab,
        Key::Backspace,
        Key::Delete,
        Key::Insert,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Home,
        Key::End,
        Key::PageUp,
        Key::PageDown,
        Key::LeftShift,
        Key::RightShift,
        Key::LeftControl,
        Key::RightControl,
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

    /// The 26 letter keys in alphabetical order.
    pub const LETTERS: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    /// The digit row keys, `D0` first.
    pub const DIGITS: [Key; 10] = [
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
    ];

    /// Stable index in `0..KEY_COUNT`.
    #[inline(always)]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Whether this key is one of the shift or control keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift | Key::RightShift | Key::LeftControl | Key::RightControl
        )
    }

    /// Look up a letter key from an ASCII letter (either case).
    ///
    /// # Examples
    ///
    /// ```
    /// use phantom_types::Key;
    ///
    /// assert_eq!(Key::from_letter('q'), Some(Key::Q));
    /// assert_eq!(Key::from_letter('Q'), Some(Key::Q));
    /// assert_eq!(Key::from_letter('1'), None);
    /// ```
    pub fn from_letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let idx = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        Some(Self::LETTERS[idx])
    }

    /// Look up a digit-row key from an ASCII digit.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self::DIGITS[d as usize])
    }
}

/// Modifier state used for character decoding
///
/// Control is deliberately absent: it never changes the produced glyph, so
/// it is tracked separately by the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modifier {
    None,
    Shift,
}

impl Modifier {
    /// Every modifier, indexed by [`Modifier::ordinal`].
    pub const ALL: [Modifier; MODIFIER_COUNT] = [Modifier::None, Modifier::Shift];

    #[inline(always)]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_shift(shift: bool) -> Self {
        if shift {
            Modifier::Shift
        } else {
            Modifier::None
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}
