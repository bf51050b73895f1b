//! Audio preferences
//!
//! Owned by the game session so the menu's music toggle can flip it.

use serde::{Deserialize, Serialize};

use crate::audio::{MUSIC_BASE_VOLUME, SoundCue};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music on/off (menu toggle)
    pub music_enabled: bool,
    /// Sound effects on/off
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Settings {
    /// Flip background music, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Effective volume for a one-shot cue
    pub fn cue_volume(&self, cue: SoundCue) -> f32 {
        if !self.sound_enabled {
            return 0.0;
        }
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0) * cue.base_volume()
    }

    /// Effective volume for the music loop
    pub fn effective_music_volume(&self) -> f32 {
        if !self.music_enabled {
            return 0.0;
        }
        (self.master_volume * self.music_volume).clamp(0.0, 1.0) * MUSIC_BASE_VOLUME
    }
}
