//! Framebuffer of styled character cells.

use crate::types::Rgb;

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`; empty when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.idx(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(c) = self.get_mut(x, y) {
            *c = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write `s` in `fg`, keeping each cell's background.
    pub fn overlay_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb) {
        let mut cx = x;
        for ch in s.chars() {
            let Some(cell) = self.get_mut(cx, y) else {
                break;
            };
            cell.ch = ch;
            cell.style.fg = fg;
            cx += 1;
        }
    }

    /// Tint a rectangle towards `color`; `alpha == 1` covers it completely.
    pub fn blend_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb, alpha: f32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                if let Some(cell) = self.get_mut(cx, cy) {
                    cell.style.bg = cell.style.bg.lerp(color, alpha);
                    cell.style.fg = cell.style.fg.lerp(color, alpha);
                    if alpha >= 1.0 {
                        cell.ch = ' ';
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 1, "abcdef", CellStyle::default());
        fb.set(9, 9, Cell::default());
        assert_eq!(fb.get(2, 1).map(|c| c.ch), Some('b'));
        assert_eq!(fb.get(3, 1), None);
    }

    #[test]
    fn resize_keeps_allocation_semantics() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(4, 3);
        assert_eq!(fb.cells().len(), 12);
        fb.resize(1, 1);
        assert_eq!(fb.cells().len(), 1);
    }

    #[test]
    fn blend_keeps_glyphs_below_full_alpha() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_char(0, 0, '*', CellStyle::new(Rgb::WHITE, Rgb::BLACK));
        fb.blend_rect(0, 0, 2, 1, Rgb::new(0, 0, 200), 0.5);
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, '*');
        assert_eq!(cell.style.bg, Rgb::new(0, 0, 100));

        fb.blend_rect(0, 0, 9, 9, Rgb::BLACK, 1.0);
        assert!(fb.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn overlay_str_keeps_background() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.blend_rect(0, 0, 4, 1, Rgb::new(10, 20, 30), 1.0);
        fb.overlay_str(1, 0, "hi", Rgb::WHITE);
        let cell = fb.get(1, 0).unwrap();
        assert_eq!(cell.ch, 'h');
        assert_eq!(cell.style.fg, Rgb::WHITE);
        assert_eq!(cell.style.bg, Rgb::new(10, 20, 30));
    }

    #[test]
    fn rows_slice_the_grid() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 1, "xyz", CellStyle::default());
        let row: String = fb.row(1).iter().map(|c| c.ch).collect();
        assert_eq!(row, "xyz");
        assert!(fb.row(2).is_empty());
    }
}
