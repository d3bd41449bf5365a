//! Audio module - sound registry, playback limits and fades
//!
//! The [`Audio`] system owns the registered sounds and every voice it
//! started. Output goes through an [`AudioBackend`]; [`NullBackend`] is a
//! device-less backend used by tests and headless runs.
//!
//! Call [`Audio::update`] once per frame to advance fades and release
//! finished voices (which also frees their slot in the per-sound limit).
//!
//! # Example
//!
//! ```
//! use phantom_audio::{Audio, NullBackend, SoundInfo, Tween};
//!
//! let mut audio = Audio::new(NullBackend::new());
//! audio.register(SoundInfo::new("music", "music/theme.ogg").with_limit(1));
//!
//! let theme = audio.fade_in("music", true, 2.0, Tween::SmoothStep, None).unwrap();
//! assert!(audio.play("music", None, 0.0).is_err()); // limit of one
//!
//! audio.update(2.0);
//! audio.fade_out(theme, 0.5, Tween::Linear);
//! audio.update(0.5);
//! assert_eq!(audio.voice_count(), 0);
//! ```

pub mod backend;
pub mod sound;
pub mod tween;

use thiserror::Error;

pub use backend::{AudioBackend, NullBackend, NullVoice, Voice};
pub use sound::{Audio, SoundHandle, SoundInfo};
pub use tween::Tween;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AudioError {
    #[error("unknown sound `{0}'")]
    UnknownSound(String),
    #[error("audio limit reached: {name} (limit: {limit})")]
    LimitReached { name: String, limit: u32 },
    #[error("sound `{0}' would play at zero volume")]
    Silent(String),
    #[error("audio backend: {0}")]
    Backend(String),
}
