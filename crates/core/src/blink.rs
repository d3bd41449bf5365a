use crate::types::BLINK_PERIOD_SECS;

/// Cursor blink accumulator. Visible for the first half of every period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlinkTimer {
    elapsed: f32,
}

impl BlinkTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f32) {
        if seconds.is_finite() && seconds > 0.0 {
            self.elapsed = (self.elapsed + seconds).rem_euclid(BLINK_PERIOD_SECS);
        }
    }

    /// Restart the period so the cursor shows immediately.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn visible(&self) -> bool {
        self.elapsed.rem_euclid(BLINK_PERIOD_SECS) < BLINK_PERIOD_SECS / 2.0
    }
}
