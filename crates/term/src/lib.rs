//! Terminal backend.
//!
//! Renders engine frames into a framebuffer of styled character cells and
//! flushes it to a terminal through crossterm. The console and other
//! widgets draw through [`FrameCanvas`], which implements the core
//! [`Canvas`](phantom_core::Canvas) trait, and measure text with
//! [`CellFont`].

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use phantom_core as core;
pub use phantom_types as types;

pub use canvas::{CellFont, FrameCanvas, LINE_GLYPH};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
