//! Sound playback with per-sound limits and volume fades.

use std::collections::HashMap;

use crate::backend::{AudioBackend, Voice};
use crate::tween::Tween;
use crate::AudioError;

// Starting volume of a fade-in: audible enough to not count as silent.
const FADE_IN_START_VOLUME: f32 = 0.00001;

/// Registered sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundInfo {
    pub name: String,
    pub asset: String,
    /// Default volume in `[0, 1]`
    pub volume: f32,
    /// Maximum simultaneous voices; `Some(0)` mutes the sound entirely
    pub limit: Option<u32>,
}

impl SoundInfo {
    pub fn new(name: &str, asset: &str) -> Self {
        Self {
            name: normalize(name),
            asset: asset.to_string(),
            volume: 1.0,
            limit: None,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Identifies one started voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    direction: FadeDirection,
    duration: f32,
    remaining: f32,
    tween: Tween,
    /// Target volume for fade-in, starting volume for fade-out
    volume: f32,
}

impl Fade {
    fn new(direction: FadeDirection, duration: f32, tween: Tween, volume: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            direction,
            duration,
            remaining: duration,
            tween,
            volume,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            1.0 - self.remaining / self.duration
        }
    }
}

struct ActiveVoice<V> {
    handle: SoundHandle,
    name: String,
    voice: V,
    fade: Option<Fade>,
}

/// Sound registry and active voice bookkeeping.
pub struct Audio<B: AudioBackend> {
    backend: B,
    sounds: HashMap<String, SoundInfo>,
    voices: Vec<ActiveVoice<B::Voice>>,
    active: HashMap<String, u32>,
    master_volume: f32,
    next_handle: u64,
}

impl<B: AudioBackend> Audio<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sounds: HashMap::new(),
            voices: Vec::new(),
            active: HashMap::new(),
            master_volume: 1.0,
            next_handle: 1,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Register (or replace) a sound. The name is trimmed and lowercased.
    pub fn register(&mut self, mut info: SoundInfo) {
        info.name = normalize(&info.name);
        self.sounds.insert(info.name.clone(), info);
    }

    pub fn sound(&self, name: &str) -> Option<&SoundInfo> {
        self.sounds.get(&normalize(name))
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Explicit volume, else the sound's default, scaled by master volume.
    fn effective_volume(&self, volume: Option<f32>, info: &SoundInfo) -> f32 {
        volume.unwrap_or(info.volume) * self.master_volume
    }

    /// Voices currently tracked for `name`.
    pub fn active_count(&self, name: &str) -> u32 {
        self.active.get(&normalize(name)).copied().unwrap_or(0)
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn is_playing(&self, handle: SoundHandle) -> bool {
        self.voices
            .iter()
            .any(|v| v.handle == handle && v.voice.is_playing())
    }

    pub fn voice(&self, handle: SoundHandle) -> Option<&B::Voice> {
        self.voices.iter().find(|v| v.handle == handle).map(|v| &v.voice)
    }

    pub fn voice_mut(&mut self, handle: SoundHandle) -> Option<&mut B::Voice> {
        self.voices
            .iter_mut()
            .find(|v| v.handle == handle)
            .map(|v| &mut v.voice)
    }

    /// Play a sound once.
    ///
    /// `volume` overrides the registered default. Refused when the sound's
    /// limit is reached or the effective volume is zero.
    pub fn play(&mut self, name: &str, volume: Option<f32>, pan: f32) -> Result<SoundHandle, AudioError> {
        let name = normalize(name);
        let info = self
            .sounds
            .get(&name)
            .ok_or_else(|| AudioError::UnknownSound(name.clone()))?;

        if let Some(limit) = info.limit {
            if limit == 0 || self.active.get(&name).copied().unwrap_or(0) >= limit {
                log::debug!("audio limit reached: {} (limit: {limit})", info.name);
                return Err(AudioError::LimitReached { name, limit });
            }
        }

        let volume = self.effective_volume(volume, info);
        if volume <= 0.0 {
            return Err(AudioError::Silent(name));
        }

        let mut voice = self.backend.create_voice(&info.asset)?;
        voice.set_volume(volume);
        voice.set_pan(pan.clamp(-1.0, 1.0));
        voice.set_looped(false);
        voice.play();

        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        *self.active.entry(name.clone()).or_insert(0) += 1;
        self.voices.push(ActiveVoice {
            handle,
            name,
            voice,
            fade: None,
        });
        Ok(handle)
    }

    /// Start a sound near silence and ramp it up to its volume.
    pub fn fade_in(
        &mut self,
        name: &str,
        looped: bool,
        duration: f32,
        tween: Tween,
        volume: Option<f32>,
    ) -> Result<SoundHandle, AudioError> {
        let target = {
            let info = self
                .sounds
                .get(&normalize(name))
                .ok_or_else(|| AudioError::UnknownSound(normalize(name)))?;
            self.effective_volume(volume, info)
        };
        // The starting volume goes through master scaling like any play.
        let handle = self.play(name, Some(FADE_IN_START_VOLUME), 0.0)?;
        if let Some(active) = self.voices.iter_mut().find(|v| v.handle == handle) {
            active.voice.set_looped(looped);
            active.fade = Some(Fade::new(FadeDirection::In, duration, tween, target));
        }
        Ok(handle)
    }

    /// Ramp a voice down from its current volume, then stop it.
    pub fn fade_out(&mut self, handle: SoundHandle, duration: f32, tween: Tween) {
        if let Some(active) = self.voices.iter_mut().find(|v| v.handle == handle) {
            let from = active.voice.volume();
            active.fade = Some(Fade::new(FadeDirection::Out, duration, tween, from));
        }
    }

    pub fn fade_out_all(&mut self, duration: f32, tween: Tween) {
        for active in &mut self.voices {
            let from = active.voice.volume();
            active.fade = Some(Fade::new(FadeDirection::Out, duration, tween, from));
        }
    }

    /// Stop every voice of `name`.
    pub fn stop(&mut self, name: &str) {
        let name = normalize(name);
        for active in self.voices.iter_mut().filter(|v| v.name == name) {
            stop_voice(&mut active.voice);
        }
        self.reap();
    }

    pub fn stop_handle(&mut self, handle: SoundHandle) {
        if let Some(active) = self.voices.iter_mut().find(|v| v.handle == handle) {
            stop_voice(&mut active.voice);
        }
        self.reap();
    }

    pub fn stop_all(&mut self) {
        for active in &mut self.voices {
            stop_voice(&mut active.voice);
        }
        self.reap();
    }

    /// Advance fades and drop voices that stopped playing.
    pub fn update(&mut self, elapsed: f32) {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        for active in &mut self.voices {
            let Some(fade) = active.fade.as_mut() else {
                continue;
            };
            fade.remaining -= elapsed;
            let t = fade.tween.apply(fade.progress());
            match fade.direction {
                FadeDirection::In => active.voice.set_volume(fade.volume * t),
                FadeDirection::Out => active.voice.set_volume(fade.volume * (1.0 - t)),
            }
            if fade.remaining <= 0.0 {
                if fade.direction == FadeDirection::Out {
                    stop_voice(&mut active.voice);
                }
                active.fade = None;
            }
        }
        self.reap();
    }

    fn reap(&mut self) {
        let active = &mut self.active;
        self.voices.retain(|v| {
            if v.voice.is_playing() {
                return true;
            }
            if let Some(count) = active.get_mut(&v.name) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    active.remove(&v.name);
                }
            }
            false
        });
    }
}

fn stop_voice<V: Voice>(voice: &mut V) {
    voice.set_looped(false);
    voice.stop();
}
