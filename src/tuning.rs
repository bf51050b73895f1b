//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]; a JSON document may override any
//! subset of fields. Tuning is fixed for the lifetime of a session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::consts::*;

/// Balance values read by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Visible area (camera view) in pixels
    pub viewport: Vec2,
    pub spawn_distance: f32,
    pub spawn_spread: f32,
    pub max_enemies: u32,

    pub player_health: f32,
    pub player_speed: f32,
    pub player_size: Vec2,
    pub invulnerability_time: f32,
    pub animation_frames: u32,
    pub animation_speed: f32,

    pub enemy_health: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_size: Vec2,
    pub contact_damage: f32,

    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_size: Vec2,
    pub projectile_cull_margin: f32,

    pub shoot_cooldown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            spawn_distance: SPAWN_DISTANCE,
            spawn_spread: SPAWN_SPREAD,
            max_enemies: MAX_ENEMIES,

            player_health: PLAYER_HEALTH,
            player_speed: PLAYER_SPEED,
            player_size: Vec2::from(PLAYER_SIZE),
            invulnerability_time: PLAYER_INVULNERABILITY_TIME,
            animation_frames: PLAYER_ANIMATION_FRAMES,
            animation_speed: PLAYER_ANIMATION_SPEED,

            enemy_health: ENEMY_HEALTH,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_size: Vec2::from(ENEMY_SIZE),
            contact_damage: CONTACT_DAMAGE,

            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            projectile_size: Vec2::from(PROJECTILE_SIZE),
            projectile_cull_margin: PROJECTILE_CULL_MARGIN,

            shoot_cooldown: SHOOT_COOLDOWN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance table)
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), Error> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Err(Error::InvalidTuning("viewport must be positive".into()));
        }
        if self.max_enemies == 0 {
            return Err(Error::InvalidTuning("max_enemies must be at least 1".into()));
        }
        if self.spawn_spread <= 0.0 {
            return Err(Error::InvalidTuning("spawn_spread must be positive".into()));
        }
        if self.enemy_speed_min <= 0.0 || self.enemy_speed_min >= self.enemy_speed_max {
            return Err(Error::InvalidTuning(format!(
                "enemy speed range [{}, {}) is empty",
                self.enemy_speed_min, self.enemy_speed_max
            )));
        }
        if self.player_health <= 0.0 || self.enemy_health <= 0.0 {
            return Err(Error::InvalidTuning("base health must be positive".into()));
        }
        if self.animation_frames == 0 {
            return Err(Error::InvalidTuning("animation_frames must be at least 1".into()));
        }
        if self.shoot_cooldown < 0.0 || self.invulnerability_time < 0.0 {
            return Err(Error::InvalidTuning("timers must not be negative".into()));
        }
        Ok(())
    }
}
