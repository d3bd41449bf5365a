//! Key decoding properties over the whole key set.

use phantom::input::KeyMap;
use phantom::types::{Key, Modifier};

#[test]
fn letters_are_lower_then_upper() {
    let map = KeyMap::new();
    for (i, key) in Key::LETTERS.iter().enumerate() {
        let upper = (b'A' + i as u8) as char;
        assert_eq!(map.decode(*key, Modifier::None), Some(upper.to_ascii_lowercase()));
        assert_eq!(map.decode(*key, Modifier::Shift), Some(upper));
    }
}

#[test]
fn digits_shift_to_symbols() {
    let map = KeyMap::new();
    let shifted = ")!@#$%^&*(";
    for ((i, key), symbol) in Key::DIGITS.iter().enumerate().zip(shifted.chars()) {
        assert_eq!(map.decode(*key, Modifier::None), Some((b'0' + i as u8) as char));
        assert_eq!(map.decode(*key, Modifier::Shift), Some(symbol));
    }
}

#[test]
fn non_printing_keys_decode_to_none() {
    let map = KeyMap::new();
    let printing = |k: Key| {
        Key::LETTERS.contains(&k)
            || Key::DIGITS.contains(&k)
            || matches!(
                k,
                Key::Space
                    | Key::Backslash
                    | Key::OpenBracket
                    | Key::CloseBracket
                    | Key::Comma
                    | Key::Period
                    | Key::Semicolon
                    | Key::Slash
                    | Key::Quote
                    | Key::Minus
                    | Key::Equals
            )
    };

    for key in Key::ALL {
        for modifier in Modifier::ALL {
            assert_eq!(
                map.decode(key, modifier).is_some(),
                printing(key),
                "{key:?} with {modifier:?}"
            );
        }
    }
}

#[test]
fn every_printable_ascii_char_is_reachable() {
    let map = KeyMap::new();
    for c in (b' '..=b'~').map(char::from) {
        if c == '`' || c == '~' {
            // the console toggle key types nothing
            assert!(map.find(c).is_none());
            continue;
        }
        let (key, modifier) = map.find(c).unwrap_or_else(|| panic!("{c:?} unreachable"));
        assert_eq!(map.decode(key, modifier), Some(c));
    }
}
