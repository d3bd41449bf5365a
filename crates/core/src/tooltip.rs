//! Hover tooltip: a label in a dark box that follows an anchor point.

use crate::render::{Canvas, Font, Viewport};
use crate::types::{Rgb, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    pub font_scale: f32,
    /// Vertical distance between the anchor and the tooltip center
    pub offset: f32,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            offset: 40.0,
            background: Rgb::BLACK,
            foreground: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    style: TooltipStyle,
    label: String,
    size: Vec2,
    position: Vec2,
}

impl Tooltip {
    pub fn new(style: TooltipStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unscaled label extent.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Center of the tooltip.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the label. Without a font the tooltip has no size.
    pub fn set_text(&mut self, label: &str, font: Option<&dyn Font>) {
        self.label = label.to_string();
        self.size = font.map_or(Vec2::ZERO, |f| f.measure(label));
    }

    fn half_extent(&self) -> Vec2 {
        self.size * (0.5 * self.style.font_scale)
    }

    /// Place the tooltip above `anchor`, or below it when there is no room
    /// above, keeping it horizontally inside the viewport.
    pub fn set_position(&mut self, anchor: Vec2, viewport: Viewport) {
        let half = self.half_extent();
        let offset = self.style.offset;

        let mut pos = anchor;
        if pos.y > offset + half.y {
            pos.y -= offset;
        } else {
            pos.y += offset;
        }
        if pos.x + half.x > viewport.width {
            pos.x = viewport.width - half.x;
        }
        if pos.x - half.x < 0.0 {
            pos.x = half.x;
        }
        self.position = pos;
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        if self.label.is_empty() || self.size == Vec2::ZERO {
            return;
        }
        let half = self.half_extent();
        canvas.fill_rect(self.position - half, half * 2.0, self.style.background, 1.0);
        // Text is drawn at its natural size, centered in the box.
        canvas.draw_text(&self.label, self.position - self.size * 0.5, self.style.foreground);
    }
}
