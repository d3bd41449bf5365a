//! Command-line editing state.

/// Edit buffer with a cursor measured in characters, always in `[0, len]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEditor {
    text: String,
    cursor: usize,
}

impl InputEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text left of the cursor, used to place the drawn cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.byte_at(self.cursor)]
    }

    fn byte_at(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the char left of the cursor. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
        true
    }

    /// Remove the char under the cursor. Returns whether anything changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.set_cursor(self.cursor.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> bool {
        self.set_cursor(self.cursor + 1)
    }

    pub fn home(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn end(&mut self) -> bool {
        self.set_cursor(self.len())
    }

    /// Move the cursor, clamped to the text. Returns whether it moved.
    pub fn set_cursor(&mut self, cursor: usize) -> bool {
        let cursor = cursor.min(self.len());
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the current line as whitespace-separated arguments.
    ///
    /// The editor is cleared either way; a blank line yields `None`.
    pub fn submit(&mut self) -> Option<Vec<String>> {
        let argv = tokenize(&self.text);
        self.clear();
        if argv.is_empty() {
            None
        } else {
            Some(argv)
        }
    }
}

/// Split a command line on whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputEditor {
        let mut ed = InputEditor::new();
        s.chars().for_each(|c| ed.insert(c));
        ed
    }

    #[test]
    fn delete_then_backspace_around_cursor() {
        let mut ed = typed("hello");
        ed.set_cursor(2);
        assert!(ed.delete());
        assert_eq!((ed.text(), ed.cursor()), ("helo", 2));
        assert!(ed.backspace());
        assert_eq!((ed.text(), ed.cursor()), ("hlo", 1));
    }

    #[test]
    fn edits_at_bounds_are_no_ops() {
        let mut ed = typed("ab");
        assert!(!ed.delete());
        ed.home();
        assert!(!ed.backspace());
        assert!(!ed.move_left());
        assert_eq!(ed.text(), "ab");
    }

    #[test]
    fn cursor_is_clamped() {
        let mut ed = typed("abc");
        assert!(!ed.move_right());
        assert!(!ed.set_cursor(99));
        assert_eq!(ed.cursor(), 3);
        assert!(ed.home());
        assert!(ed.end());
        assert_eq!(ed.cursor(), 3);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut ed = typed("ac");
        ed.move_left();
        ed.insert('b');
        assert_eq!(ed.text(), "abc");
        assert_eq!(ed.cursor(), 2);
        assert_eq!(ed.text_before_cursor(), "ab");
    }

    #[test]
    fn blank_submission_clears_without_argv() {
        let mut ed = typed("   \t ");
        assert_eq!(ed.submit(), None);
        assert!(ed.is_empty());
        assert_eq!(ed.cursor(), 0);
    }

    #[test]
    fn submission_splits_on_whitespace() {
        let mut ed = typed("  echo  hi   there ");
        assert_eq!(
            ed.submit(),
            Some(vec!["echo".to_string(), "hi".to_string(), "there".to_string()])
        );
        assert!(ed.is_empty());
    }

    #[test]
    fn multibyte_editing() {
        let mut ed = typed("añb");
        ed.move_left();
        assert!(ed.backspace());
        assert_eq!(ed.text(), "ab");
        assert_eq!(ed.text_before_cursor(), "a");
    }
}
