//! Two-frame keyboard snapshots.
//!
//! Consumers ask "is the key down now" and "was it down last frame"; an edge
//! (newly pressed key) is `is_down && !was_down`. Snapshots are bitsets so
//! querying and copying them never allocates.

use arrayvec::ArrayVec;

use crate::types::Key;

/// Upper bound on keys reported as newly pressed in one frame.
pub const MAX_PRESSED_PER_FRAME: usize = 32;

pub type PressedKeys = ArrayVec<Key, MAX_PRESSED_PER_FRAME>;

/// Set of keys backed by a 128-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeySet(u128);

impl KeySet {
    pub const EMPTY: KeySet = KeySet(0);

    #[inline(always)]
    fn bit(key: Key) -> u128 {
        1u128 << key.ordinal()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & Self::bit(key) != 0
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= Self::bit(key);
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !Self::bit(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Abstract keyboard query used by per-frame consumers.
pub trait InputDevice {
    /// Key held in the current frame snapshot.
    fn is_down(&self, key: Key) -> bool;

    /// Key held in the previous frame snapshot.
    fn was_down(&self, key: Key) -> bool;

    /// Edge-triggered press: down now, up last frame.
    fn is_pressed(&self, key: Key) -> bool {
        self.is_down(key) && !self.was_down(key)
    }

    /// Every key that went down this frame, in [`Key`] ordinal order.
    fn newly_pressed(&self) -> PressedKeys {
        let mut out = PressedKeys::new();
        for key in Key::ALL {
            if self.is_pressed(key) && out.try_push(key).is_err() {
                break;
            }
        }
        out
    }

    fn shift(&self) -> bool {
        self.is_down(Key::LeftShift) || self.is_down(Key::RightShift)
    }

    fn ctrl(&self) -> bool {
        self.is_down(Key::LeftControl) || self.is_down(Key::RightControl)
    }
}

/// Current and previous frame key snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    current: KeySet,
    previous: KeySet,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state directly from both snapshots.
    pub fn from_sets(previous: KeySet, current: KeySet) -> Self {
        Self { current, previous }
    }

    /// Roll the current snapshot into the previous one.
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    pub fn press(&mut self, key: Key) {
        self.current.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.current.remove(key);
    }

    /// Make a key that is still held report as newly pressed again.
    pub fn rearm(&mut self, key: Key) {
        self.previous.remove(key);
    }

    pub fn current(&self) -> KeySet {
        self.current
    }

    pub fn previous(&self) -> KeySet {
        self.previous
    }
}

impl InputDevice for KeyboardState {
    fn is_down(&self, key: Key) -> bool {
        self.current.contains(key)
    }

    fn was_down(&self, key: Key) -> bool {
        self.previous.contains(key)
    }

    fn newly_pressed(&self) -> PressedKeys {
        let mut out = PressedKeys::new();
        let edges = KeySet(self.current.0 & !self.previous.0);
        for key in edges.iter() {
            if out.try_push(key).is_err() {
                break;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_pressed_only_once() {
        let mut kb = KeyboardState::new();
        kb.begin_frame();
        kb.press(Key::A);
        assert!(kb.is_pressed(Key::A));
        assert_eq!(kb.newly_pressed().as_slice(), &[Key::A]);

        kb.begin_frame();
        assert!(kb.is_down(Key::A));
        assert!(!kb.is_pressed(Key::A));
        assert!(kb.newly_pressed().is_empty());
    }

    #[test]
    fn rearm_reports_a_second_edge() {
        let mut kb = KeyboardState::new();
        kb.press(Key::Backspace);
        kb.begin_frame();
        assert!(!kb.is_pressed(Key::Backspace));
        kb.rearm(Key::Backspace);
        assert!(kb.is_pressed(Key::Backspace));
    }

    #[test]
    fn modifiers_from_either_side() {
        let mut kb = KeyboardState::new();
        assert!(!kb.shift());
        kb.press(Key::RightShift);
        kb.press(Key::LeftControl);
        assert!(kb.shift());
        assert!(kb.ctrl());
    }

    #[test]
    fn key_set_iterates_in_ordinal_order() {
        let set: KeySet = [Key::Z, Key::A, Key::Enter].into_iter().collect();
        assert_eq!(set.len(), 3);
        let keys: Vec<Key> = set.iter().collect();
        assert_eq!(keys, vec![Key::A, Key::Z, Key::Enter]);
    }

    #[test]
    fn default_newly_pressed_matches_bitset_version() {
        struct Plain(KeyboardState);
        impl InputDevice for Plain {
            fn is_down(&self, key: Key) -> bool {
                self.0.is_down(key)
            }
            fn was_down(&self, key: Key) -> bool {
                self.0.was_down(key)
            }
        }

        let kb = KeyboardState::from_sets(
            [Key::B].into_iter().collect(),
            [Key::A, Key::B, Key::Up].into_iter().collect(),
        );
        assert_eq!(Plain(kb).newly_pressed(), kb.newly_pressed());
        assert_eq!(kb.newly_pressed().as_slice(), &[Key::A, Key::Up]);
    }
}
