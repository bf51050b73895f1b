//! Read-only view of the session for the rendering collaborator
//!
//! Positions are world-space; the renderer subtracts `camera_offset`.

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health_ratio: f32,
    /// Walk cycle frame
    pub frame: u32,
    /// False on the off-beats of the invulnerability blink
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOffer {
    /// Key to press (1-based)
    pub key: usize,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub wave: u32,
    pub enemies_killed: u32,
    pub enemies_to_next_wave: u32,
    pub health: f32,
    pub max_health: f32,
    pub enemy_count: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub camera_offset: Vec2,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub hud: HudView,
    pub upgrade_offers: Vec<UpgradeOffer>,
    pub music_enabled: bool,
}

impl GameState {
    /// Capture the renderable state
    pub fn snapshot(&self) -> Snapshot {
        let p = &self.player;
        Snapshot {
            phase: self.phase,
            camera_offset: self.camera_offset,
            player: PlayerView {
                pos: p.pos,
                size: p.size,
                health_ratio: p.health_ratio(),
                frame: p.frame,
                visible: p.is_visible(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                    health_ratio: e.health_ratio(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|pr| ProjectileView {
                    id: pr.id,
                    pos: pr.pos,
                    size: pr.size,
                    angle: pr.angle,
                })
                .collect(),
            hud: HudView {
                wave: self.wave.wave,
                enemies_killed: self.wave.enemies_killed,
                enemies_to_next_wave: self.wave.enemies_to_next_wave,
                health: p.health,
                max_health: p.max_health,
                enemy_count: self.enemies.len(),
            },
            upgrade_offers: self
                .offered_upgrades
                .iter()
                .enumerate()
                .map(|(i, u)| UpgradeOffer {
                    key: i + 1,
                    label: u.label(),
                })
                .collect(),
            music_enabled: self.settings.music_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Upgrade;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(3);
        let mut events = Vec::new();
        state.reset(&mut events);
        state.player.health = 50.0;
        state.offered_upgrades = vec![Upgrade::Speed, Upgrade::Health, Upgrade::Damage];

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.player.health_ratio, 0.5);
        assert_eq!(snap.hud.wave, 1);
        assert_eq!(snap.upgrade_offers[1].key, 2);
        assert_eq!(snap.upgrade_offers[1].label, Upgrade::Health.label());
        assert_eq!(snap.camera_offset, Vec2::ZERO);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
