//! Engine core - console, diagnostics and small shared utilities
//!
//! Everything in this crate is backend-agnostic: drawing goes through the
//! [`Canvas`] trait, text measurement through [`Font`], and keyboard state
//! through [`phantom_input::InputDevice`]. The same console runs on the
//! terminal backend, in tests against a recording canvas, or on a pixel
//! renderer.
//!
//! # Module Structure
//!
//! - [`overlay`]: the developer console (open/close, editing, scrolling, drawing)
//! - [`line_buffer`]: scrollback with partial-line buffering and a ring limit
//! - [`wrap`]: width-constrained word wrap driven by a measure callback
//! - [`editor`]: command-line edit buffer and cursor
//! - [`scroll`]: scroll offset, clamped at draw time
//! - [`blink`]: cursor blink timer
//! - [`diagnostics`]: sink broadcaster and the `log` bridge
//! - [`command`]: command dispatch and the closure-backed registry
//! - [`settings`]: console configuration (TOML) and validation
//! - [`render`]: `Canvas`/`Font` seams
//! - [`properties`]: typed property bag
//! - [`tooltip`]: hover tooltip widget
//! - [`rng`]: deterministic LCG
//!
//! # Example
//!
//! ```
//! use phantom_core::{
//!     CommandRegistry, ConsoleOverlay, ConsoleSettings, Diagnostics, Font, InputCapture,
//! };
//! use phantom_core::types::{Key, Vec2};
//! use phantom_input::{KeySet, KeyboardState};
//!
//! struct Cells;
//! impl Font for Cells {
//!     fn measure(&self, text: &str) -> Vec2 {
//!         Vec2::new(text.chars().count() as f32, 1.0)
//!     }
//!     fn line_spacing(&self) -> f32 {
//!         1.0
//!     }
//! }
//!
//! let diagnostics = Diagnostics::new();
//! let mut console = ConsoleOverlay::new(
//!     Cells,
//!     ConsoleSettings::default(),
//!     &diagnostics,
//!     CommandRegistry::new(),
//! );
//!
//! let tilde = KeyboardState::from_sets(KeySet::EMPTY, [Key::Tilde].into_iter().collect());
//! assert_eq!(console.update(0.016, &tilde), InputCapture::Consumed);
//! assert!(console.is_open());
//!
//! diagnostics.write_line("hello from anywhere");
//! assert_eq!(console.lines().len(), 2);
//! ```

pub mod blink;
pub mod command;
pub mod diagnostics;
pub mod editor;
pub mod line_buffer;
pub mod overlay;
pub mod properties;
pub mod render;
pub mod rng;
pub mod scroll;
pub mod settings;
pub mod tooltip;
pub mod wrap;

pub use phantom_types as types;

pub use blink::BlinkTimer;
pub use command::{CommandDispatcher, CommandError, CommandOutcome, CommandRegistry, NoCommands};
pub use diagnostics::{level_from_env, Diagnostics, DiagnosticsLogger, LogSink, SinkRegistration};
pub use editor::{tokenize, InputEditor};
pub use line_buffer::{BootLog, LineBuffer, SharedLines};
pub use overlay::{ConsoleOverlay, ConsoleState, InputCapture, BANNER};
pub use properties::{PropertyCollection, PropertyValue};
pub use render::{Canvas, Font, Viewport};
pub use rng::SimpleRng;
pub use scroll::ScrollController;
pub use settings::{ConfigError, ConsoleConfig, ConsoleSettings};
pub use tooltip::{Tooltip, TooltipStyle};
pub use wrap::{wrap, wrap_with};
