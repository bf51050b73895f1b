//! Wave Survivor - A top-down wave survival game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, combat, waves, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Audio preferences
//! - `audio`: Sound cue contract for the audio collaborator

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Enemies spawn on a ring this far from the player (outside the viewport)
    pub const SPAWN_DISTANCE: f32 = 800.0;
    /// Width of the spawn ring
    pub const SPAWN_SPREAD: f32 = 100.0;
    /// Cap on enemies spawned per batch
    pub const MAX_ENEMIES: u32 = 20;

    /// Player defaults
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_INVULNERABILITY_TIME: f32 = 0.3;
    pub const PLAYER_SIZE: (f32, f32) = (9.0, 9.0);
    /// Walk cycle
    pub const PLAYER_ANIMATION_FRAMES: u32 = 3;
    pub const PLAYER_ANIMATION_SPEED: f32 = 0.2;

    /// Enemy defaults
    pub const ENEMY_HEALTH: f32 = 30.0;
    pub const ENEMY_SPEED_MIN: f32 = 50.0;
    pub const ENEMY_SPEED_MAX: f32 = 100.0;
    pub const ENEMY_SIZE: (f32, f32) = (7.5, 7.5);
    /// Damage dealt to the player on contact
    pub const CONTACT_DAMAGE: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_DAMAGE: f32 = 10.0;
    pub const PROJECTILE_SIZE: (f32, f32) = (10.0, 5.0);
    /// Projectiles are culled this far outside the camera view
    pub const PROJECTILE_CULL_MARGIN: f32 = 50.0;

    /// Seconds between shots at fire_rate_multiplier = 1
    pub const SHOOT_COOLDOWN: f32 = 0.2;

    /// Wave progression
    pub const WAVE_BASE_ENEMIES: u32 = 5;
    pub const FIRST_WAVE_KILL_TARGET: u32 = 10;
    pub const KILL_TARGET_PER_WAVE: u32 = 2;
    pub const UPGRADES_OFFERED: usize = 3;
}

/// Unit vector from `from` toward `to`, zero if the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_coincident_points() {
        let p = Vec2::new(12.0, -4.0);
        assert_eq!(direction_to(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_direction_to_is_unit() {
        let dir = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }
}
