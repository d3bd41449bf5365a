//! Console configuration.
//!
//! [`ConsoleConfig`] is the raw, serde-loadable form (e.g. from
//! `phantom.toml`); missing fields fall back to the engine defaults.
//! [`ConsoleSettings`] is the validated form the overlay owns.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    Key, Rgb, CANCEL_KEY, DEFAULT_ALPHA, DEFAULT_LINE_COUNT, DEFAULT_OPEN_KEY, DEFAULT_PADDING,
    DEFAULT_PROMPT, DEFAULT_SCROLLBACK_LIMIT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid console config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("alpha must be within [0, 1], got {0}")]
    InvalidAlpha(f32),
    #[error("padding must be finite and non-negative, got {0}")]
    InvalidPadding(f32),
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("open key {0:?} is reserved for closing the console")]
    OpenKeyIsCancelKey(Key),
}

/// Console configuration as written by users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Panel opacity in `[0, 1]`
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Visible scrollback lines above the prompt
    #[serde(default = "default_line_count")]
    pub line_count: usize,

    #[serde(default = "default_padding")]
    pub padding: f32,

    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Key toggling the console
    #[serde(default = "default_open_key")]
    pub open_key: Key,

    /// Completed lines kept before the oldest are dropped
    #[serde(default = "default_scrollback_limit")]
    pub scrollback_limit: usize,

    // Tables last so the struct serializes to valid TOML.
    /// Panel color
    #[serde(default = "default_background")]
    pub background: Rgb,

    /// Text and cursor color
    #[serde(default = "default_foreground")]
    pub foreground: Rgb,
}

fn default_background() -> Rgb {
    Rgb::BLACK
}

fn default_foreground() -> Rgb {
    Rgb::WHITE
}

fn default_alpha() -> f32 {
    DEFAULT_ALPHA
}

fn default_line_count() -> usize {
    DEFAULT_LINE_COUNT
}

fn default_padding() -> f32 {
    DEFAULT_PADDING
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_open_key() -> Key {
    DEFAULT_OPEN_KEY
}

fn default_scrollback_limit() -> usize {
    DEFAULT_SCROLLBACK_LIMIT
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            alpha: default_alpha(),
            line_count: default_line_count(),
            padding: default_padding(),
            prompt: default_prompt(),
            open_key: default_open_key(),
            scrollback_limit: default_scrollback_limit(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists; fall back to defaults (with a warning) when
    /// it is missing or broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no console config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded console config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default console config");
                Self::default()
            }
        }
    }
}

/// Validated console settings.
///
/// Everything except the line count is fixed once the overlay is built; the
/// line count is changed through the overlay so it can re-clamp scrolling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSettings {
    background: Rgb,
    foreground: Rgb,
    alpha: f32,
    line_count: usize,
    padding: f32,
    prompt: String,
    open_key: Key,
    scrollback_limit: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        let c = ConsoleConfig::default();
        Self {
            background: c.background,
            foreground: c.foreground,
            alpha: c.alpha,
            line_count: c.line_count,
            padding: c.padding,
            prompt: c.prompt,
            open_key: c.open_key,
            scrollback_limit: c.scrollback_limit,
        }
    }
}

impl ConsoleSettings {
    pub fn from_config(config: ConsoleConfig) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&config.alpha) {
            return Err(ConfigError::InvalidAlpha(config.alpha));
        }
        if !config.padding.is_finite() || config.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(config.padding));
        }
        if config.prompt.is_empty() {
            return Err(ConfigError::EmptyPrompt);
        }
        if config.open_key == CANCEL_KEY {
            return Err(ConfigError::OpenKeyIsCancelKey(config.open_key));
        }
        Ok(Self {
            background: config.background,
            foreground: config.foreground,
            alpha: config.alpha,
            line_count: config.line_count,
            padding: config.padding,
            prompt: config.prompt,
            open_key: config.open_key,
            scrollback_limit: config.scrollback_limit.max(1),
        })
    }

    pub fn with_colors(mut self, background: Rgb, foreground: Rgb) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    pub fn with_line_count(mut self, line_count: usize) -> Self {
        self.line_count = line_count;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        if !prompt.is_empty() {
            self.prompt = prompt;
        }
        self
    }

    pub fn with_scrollback_limit(mut self, limit: usize) -> Self {
        self.scrollback_limit = limit.max(1);
        self
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub(crate) fn set_line_count(&mut self, line_count: usize) {
        self.line_count = line_count;
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn open_key(&self) -> Key {
        self.open_key
    }

    pub fn cancel_key(&self) -> Key {
        CANCEL_KEY
    }

    pub fn scrollback_limit(&self) -> usize {
        self.scrollback_limit
    }
}
