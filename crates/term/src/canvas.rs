//! [`Canvas`] and [`Font`] implementations on top of a [`FrameBuffer`].
//!
//! One canvas unit is one terminal cell. Positions are rounded down to the
//! containing cell; anything outside the framebuffer is clipped.

use crate::core::{Canvas, Font, Viewport};
use crate::fb::FrameBuffer;
use crate::types::{Rgb, Vec2};

/// Glyph drawn for a line crossing an empty cell.
pub const LINE_GLYPH: char = '▏';

/// Monospace cell metrics: every char is one cell wide, lines are one row apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellFont;

impl Font for CellFont {
    fn measure(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32, 1.0)
    }

    fn line_spacing(&self) -> f32 {
        1.0
    }
}

pub struct FrameCanvas<'a> {
    fb: &'a mut FrameBuffer,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb }
    }

    fn cell(v: f32) -> Option<u16> {
        if !v.is_finite() || v < 0.0 || v >= u16::MAX as f32 {
            return None;
        }
        Some(v.floor() as u16)
    }

    // Empty cells get a thin bar, occupied ones are inverted so the glyph
    // stays readable.
    fn mark(&mut self, x: u16, y: u16, color: Rgb) {
        let Some(cell) = self.fb.get_mut(x, y) else {
            return;
        };
        if cell.is_blank() {
            cell.ch = LINE_GLYPH;
            cell.style.fg = color;
        } else {
            cell.style.fg = cell.style.bg;
            cell.style.bg = color;
        }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.fb.width() as f32, self.fb.height() as f32)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb, alpha: f32) {
        let x0 = origin.x.max(0.0);
        let y0 = origin.y.max(0.0);
        let x1 = (origin.x + size.x).ceil();
        let y1 = (origin.y + size.y).ceil();
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (Some(x), Some(y)) = (Self::cell(x0), Self::cell(y0)) else {
            return;
        };
        let w = (x1 - x as f32).min(u16::MAX as f32) as u16;
        let h = (y1 - y as f32).min(u16::MAX as f32) as u16;
        self.fb.blend_rect(x, y, w, h, color, alpha.clamp(0.0, 1.0));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        // Cells are sampled along the segment, end point excluded, so a one
        // unit tall cursor covers exactly one row.
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;
        for i in 0..steps {
            let p = from + delta * (i as f32 / steps as f32);
            if let (Some(x), Some(y)) = (Self::cell(p.x), Self::cell(p.y)) {
                self.mark(x, y, color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Rgb) {
        let Some(y) = Self::cell(position.y) else {
            return;
        };
        // Text starting left of the canvas keeps its visible tail.
        let skip = if position.x < 0.0 {
            (-position.x).ceil() as usize
        } else {
            0
        };
        let x = Self::cell(position.x.max(0.0)).unwrap_or(0);
        let visible: String = text.chars().skip(skip).collect();
        self.fb.overlay_str(x, y, &visible, color);
    }
}
