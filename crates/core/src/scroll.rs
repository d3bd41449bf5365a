//! Scrollback offset.
//!
//! The offset counts lines scrolled back from the newest line. It is kept
//! unclamped while input arrives and clamped against the current totals when
//! the console is drawn.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollController {
    offset: i64,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Scroll back towards older lines.
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines as i64);
    }

    /// Scroll forward towards newer lines.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines as i64);
    }

    pub fn page_up(&mut self, visible: usize) {
        self.scroll_up(visible);
    }

    pub fn page_down(&mut self, visible: usize) {
        self.scroll_down(visible);
    }

    /// Oldest line; resolved by the next [`clamp`](Self::clamp).
    pub fn to_top(&mut self) {
        self.offset = i64::MAX;
    }

    pub fn to_bottom(&mut self) {
        self.offset = 0;
    }

    /// Clamp to `[0, max(0, total - visible)]` and return the result.
    pub fn clamp(&mut self, total: usize, visible: usize) -> usize {
        let max = total.saturating_sub(visible);
        let clamped = self.offset.clamp(0, max as i64) as usize;
        self.offset = clamped as i64;
        clamped
    }
}
