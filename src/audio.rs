//! Audio cue contract
//!
//! The simulation never plays sound itself. It emits [`GameEvent`]s, some of
//! which map to a [`SoundCue`]; an [`AudioSink`] collaborator decides what to
//! do with them. Playback success is never reported back.
//!
//! [`GameEvent`]: crate::sim::GameEvent

use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fired a projectile
    Shoot,
    /// An enemy entered the arena
    EnemySpawned,
    /// Player died
    Death,
    /// Menu button pressed
    MenuClick,
}

impl SoundCue {
    /// Mix level of this cue before settings are applied
    pub fn base_volume(self) -> f32 {
        match self {
            SoundCue::Shoot => 0.2,
            SoundCue::EnemySpawned => 0.3,
            SoundCue::Death => 0.4,
            SoundCue::MenuClick => 0.3,
        }
    }
}

/// Base mix level of the background music loop
pub const MUSIC_BASE_VOLUME: f32 = 0.5;

/// Fire-and-forget audio collaborator
pub trait AudioSink {
    /// Play a one-shot cue at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
    /// Start the looping background track
    fn start_music(&mut self, volume: f32);
    /// Stop all playback
    fn stop_all(&mut self);
}

/// Audio sink that discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn stop_all(&mut self) {}
}

/// Forward a frame's events to an audio sink, honouring settings
pub fn dispatch_events(sink: &mut dyn AudioSink, settings: &Settings, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::MusicStarted => {
                let vol = settings.effective_music_volume();
                if vol > 0.0 {
                    sink.start_music(vol);
                }
            }
            GameEvent::MusicStopped => sink.stop_all(),
            _ => {
                if let Some(cue) = event.sound_cue() {
                    let vol = settings.cue_volume(cue);
                    if vol > 0.0 {
                        sink.play(cue, vol);
                    }
                }
            }
        }
    }
}
