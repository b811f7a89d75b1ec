//! Animator — контракт animation playback service
//!
//! ECS знает только имена клипов и их длину (для auto-duration actions).
//! Движок читает `playing()` и проигрывает клип; phase markers из клипа
//! приходят обратно как `AnimationPhaseMarker` события.

use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Component, Debug, Clone)]
pub struct Animator {
    /// Библиотека клипов: имя → длина (секунды, при speed = 1)
    clips: HashMap<String, f32>,
    /// Playback-speed multiplier
    pub speed: f32,
    playing: Option<String>,
    /// Растёт при каждой смене клипа (renderer по нему рестартит playback)
    pub started: u32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
            speed: 1.0,
            playing: None,
            started: 0,
        }
    }
}

impl Animator {
    pub fn with_clip(mut self, name: impl Into<String>, length: f32) -> Self {
        self.clips.insert(name.into(), length);
        self
    }

    pub fn play(&mut self, clip: &str) {
        if self.playing.as_deref() != Some(clip) {
            self.playing = Some(clip.to_string());
            self.started += 1;
        }
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    /// Длина клипа с учётом playback speed (так action берёт свой duration)
    pub fn clip_duration(&self, clip: &str) -> Option<f32> {
        self.clips.get(clip).map(|length| length * self.speed)
    }
}
