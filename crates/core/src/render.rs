//! Renderer-facing seams: canvas drawing primitives and font metrics.
//!
//! Coordinates are canvas units with the origin in the top-left corner and
//! y growing downwards. A pixel renderer uses pixels; the terminal backend
//! uses one unit per cell.

use crate::types::{Rgb, Vec2};

/// Drawable area of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Text measurement service.
///
/// Must be deterministic for a given font state.
pub trait Font {
    /// Extent of `text` when drawn on a single line.
    fn measure(&self, text: &str) -> Vec2;

    /// Vertical distance between two baselines.
    fn line_spacing(&self) -> f32;

    /// Extra horizontal space inserted between glyphs.
    fn spacing(&self) -> f32 {
        0.0
    }
}

impl<F: Font + ?Sized> Font for &F {
    fn measure(&self, text: &str) -> Vec2 {
        (**self).measure(text)
    }

    fn line_spacing(&self) -> f32 {
        (**self).line_spacing()
    }

    fn spacing(&self) -> f32 {
        (**self).spacing()
    }
}

/// Immediate-mode drawing primitives for one frame.
pub trait Canvas {
    fn viewport(&self) -> Viewport;

    /// Fill an axis-aligned rectangle, blended over existing content with
    /// `alpha` in `[0, 1]`.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb, alpha: f32);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb);

    /// Draw `text` with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, color: Rgb);
}
