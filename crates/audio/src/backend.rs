//! Mixer seam.
//!
//! The sound system decides what plays, how loud and for how long; an
//! [`AudioBackend`] turns that into actual voices on a device.

use crate::AudioError;

/// One playing instance of a sound asset.
pub trait Voice {
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    /// `-1.0` is full left, `1.0` full right.
    fn set_pan(&mut self, pan: f32);
    fn set_looped(&mut self, looped: bool);
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

pub trait AudioBackend {
    type Voice: Voice;

    /// Create a stopped voice for `asset`. Loading is the backend's concern.
    fn create_voice(&mut self, asset: &str) -> Result<Self::Voice, AudioError>;
}

/// Backend with no output device. Voices keep "playing" until stopped or
/// [finished](NullVoice::finish).
#[derive(Debug, Default, Clone)]
pub struct NullBackend {
    created: usize,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Voices created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl AudioBackend for NullBackend {
    type Voice = NullVoice;

    fn create_voice(&mut self, asset: &str) -> Result<NullVoice, AudioError> {
        self.created += 1;
        Ok(NullVoice {
            asset: asset.to_string(),
            ..NullVoice::default()
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NullVoice {
    pub asset: String,
    pub volume: f32,
    pub pan: f32,
    pub looped: bool,
    pub playing: bool,
}

impl NullVoice {
    /// Simulate the asset reaching its end.
    pub fn finish(&mut self) {
        if !self.looped {
            self.playing = false;
        }
    }
}

impl Voice for NullVoice {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_pan(&mut self, pan: f32) {
        self.pan = pan;
    }

    fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
