//! Printable character decoding for the console.
//!
//! The table is flat: one row per [`Key`], one column per [`Modifier`]. Every
//! `(key, modifier)` pair has an entry, most of them `None`.

use crate::types::{Key, Modifier, KEY_COUNT, MODIFIER_COUNT};

/// Symbols produced by Shift + digit, indexed by the digit.
const SHIFTED_DIGITS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// Punctuation keys with their unshifted and shifted glyphs.
const PUNCTUATION: [(Key, char, char); 10] = [
    (Key::Backslash, '\\', '|'),
    (Key::OpenBracket, '[', '{'),
    (Key::CloseBracket, ']', '}'),
    (Key::Comma, ',', '<'),
    (Key::Period, '.', '>'),
    (Key::Semicolon, ';', ':'),
    (Key::Slash, '/', '?'),
    (Key::Quote, '\'', '"'),
    (Key::Minus, '-', '_'),
    (Key::Equals, '=', '+'),
];

type Table = [[Option<char>; MODIFIER_COUNT]; KEY_COUNT];

/// Immutable `(key, modifier) -> char` table (US layout).
#[derive(Debug, Clone)]
pub struct KeyMap {
    table: Table,
}

impl KeyMap {
    pub fn new() -> Self {
        let mut table: Table = [[None; MODIFIER_COUNT]; KEY_COUNT];

        let mut set = |key: Key, plain: char, shifted: char| {
            table[key.ordinal()][Modifier::None.ordinal()] = Some(plain);
            table[key.ordinal()][Modifier::Shift.ordinal()] = Some(shifted);
        };

        set(Key::Space, ' ', ' ');

        for (i, key) in Key::DIGITS.iter().enumerate() {
            let digit = (b'0' + i as u8) as char;
            set(*key, digit, SHIFTED_DIGITS[i]);
        }

        for (i, key) in Key::LETTERS.iter().enumerate() {
            let upper = (b'A' + i as u8) as char;
            set(*key, upper.to_ascii_lowercase(), upper);
        }

        for (key, plain, shifted) in PUNCTUATION {
            set(key, plain, shifted);
        }

        Self { table }
    }

    /// Character produced by `key` under `modifier`, if any.
    #[inline]
    pub fn decode(&self, key: Key, modifier: Modifier) -> Option<char> {
        self.table[key.ordinal()][modifier.ordinal()]
    }

    /// Reverse lookup: which key (and whether Shift) produces `c`.
    ///
    /// Space resolves to the unshifted entry.
    pub fn find(&self, c: char) -> Option<(Key, Modifier)> {
        for key in Key::ALL {
            for modifier in Modifier::ALL {
                if self.decode(key, modifier) == Some(c) {
                    return Some((key, modifier));
                }
            }
        }
        None
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
