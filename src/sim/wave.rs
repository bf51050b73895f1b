//! Wave progression
//!
//! Spawns enemy batches, tracks kills against the wave's target and offers
//! upgrades once the target is met and the arena is clear.

use serde::{Deserialize, Serialize};

use super::state::{Enemy, GameEvent, GamePhase, GameState, Upgrade};
use crate::consts::{
    FIRST_WAVE_KILL_TARGET, KILL_TARGET_PER_WAVE, UPGRADES_OFFERED, WAVE_BASE_ENEMIES,
};

/// Per-run wave counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Current wave (1-based)
    pub wave: u32,
    /// Kills since the wave started
    pub enemies_killed: u32,
    /// Kills needed before upgrades are offered
    pub enemies_to_next_wave: u32,
    /// Informational only
    pub difficulty_multiplier: f32,
    pub in_progress: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 1,
            enemies_killed: 0,
            enemies_to_next_wave: FIRST_WAVE_KILL_TARGET,
            difficulty_multiplier: 1.0,
            in_progress: false,
        }
    }
}

impl WaveState {
    /// Enemies per spawned batch
    pub fn batch_size(&self, max_enemies: u32) -> u32 {
        (WAVE_BASE_ENEMIES + self.wave).min(max_enemies)
    }

    pub fn health_multiplier(&self) -> f32 {
        1.0 + self.wave as f32 * 0.1
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + self.wave as f32 * 0.05
    }

    pub fn kill_target_met(&self) -> bool {
        self.enemies_killed >= self.enemies_to_next_wave
    }

    pub fn remaining_kills(&self) -> u32 {
        self.enemies_to_next_wave.saturating_sub(self.enemies_killed)
    }

    /// Move on to the next wave after an upgrade
    pub fn advance(&mut self) {
        self.wave += 1;
        self.enemies_killed = 0;
        self.enemies_to_next_wave = FIRST_WAVE_KILL_TARGET + self.wave * KILL_TARGET_PER_WAVE;
        self.difficulty_multiplier = 1.0 + self.wave as f32 * 0.1;
    }
}

/// Spawn one batch of enemies around the player and mark the wave running
pub fn spawn_wave(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.wave.in_progress = true;

    let count = state.wave.batch_size(state.tuning.max_enemies);
    let health_multiplier = state.wave.health_multiplier();
    let speed_multiplier = state.wave.speed_multiplier();
    let player_pos = state.player.pos;

    for _ in 0..count {
        let id = state.next_entity_id();
        let enemy = Enemy::spawn(
            id,
            &mut state.rng,
            player_pos,
            health_multiplier,
            speed_multiplier,
            &state.tuning,
        );
        state.enemies.push(enemy);
        events.push(GameEvent::EnemySpawned { id });
    }

    log::info!(
        "Wave {}: spawned {} enemies (health x{:.2}, speed x{:.2})",
        state.wave.wave,
        count,
        health_multiplier,
        speed_multiplier
    );
    events.push(GameEvent::WaveStarted {
        wave: state.wave.wave,
        count,
    });
}

/// Draw distinct upgrades without replacement
pub fn offer_upgrades<R: rand::Rng>(rng: &mut R) -> Vec<Upgrade> {
    rand::seq::index::sample(rng, Upgrade::ALL.len(), UPGRADES_OFFERED)
        .iter()
        .map(|i| Upgrade::ALL[i])
        .collect()
}

/// End-of-wave check and wave start, run once per Playing frame after combat
pub fn update_progression(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.wave.in_progress && state.enemies.is_empty() {
        if state.wave.kill_target_met() {
            let offers = offer_upgrades(&mut state.rng);
            log::info!("Wave {} cleared, offering {:?}", state.wave.wave, offers);
            state.offered_upgrades = offers.clone();
            events.push(GameEvent::UpgradesOffered(offers));
            state.set_phase(GamePhase::UpgradeSelection, events);
            state.wave.in_progress = false;
        } else if state.wave.remaining_kills() > 0 {
            log::debug!(
                "Arena empty with {} kills still needed, topping up",
                state.wave.remaining_kills()
            );
            spawn_wave(state, events);
        }
    }

    if !state.wave.in_progress && state.phase == GamePhase::Playing {
        spawn_wave(state, events);
    }
}

/// Apply the offered upgrade at `choice` (0-based) and start the next wave.
///
/// Returns false, changing nothing, for an index outside the offer or when
/// no selection is pending.
pub fn apply_upgrade(state: &mut GameState, choice: usize, events: &mut Vec<GameEvent>) -> bool {
    if state.phase != GamePhase::UpgradeSelection {
        return false;
    }
    let Some(&upgrade) = state.offered_upgrades.get(choice) else {
        log::debug!("Ignoring upgrade choice {}", choice + 1);
        return false;
    };

    state.player.apply_upgrade(upgrade);
    state.offered_upgrades.clear();
    events.push(GameEvent::UpgradeApplied(upgrade));
    state.set_phase(GamePhase::Playing, events);

    state.wave.advance();
    log::info!(
        "Picked {:?}, wave {} needs {} kills",
        upgrade,
        state.wave.wave,
        state.wave.enemies_to_next_wave
    );
    spawn_wave(state, events);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn playing_state() -> GameState {
        let mut state = GameState::new(7);
        let mut events = Vec::new();
        state.reset(&mut events);
        state
    }

    #[test]
    fn test_wave_formulas() {
        let mut w = WaveState::default();
        assert_eq!(w.batch_size(20), 6);
        assert!((w.health_multiplier() - 1.1).abs() < 1e-6);
        assert!((w.speed_multiplier() - 1.05).abs() < 1e-6);

        w.advance();
        assert_eq!(w.wave, 2);
        assert_eq!(w.enemies_to_next_wave, 14);
        assert!((w.difficulty_multiplier - 1.2).abs() < 1e-6);

        w.wave = 30;
        assert_eq!(w.batch_size(20), 20);
    }

    #[test]
    fn test_offer_upgrades_distinct() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let offers = offer_upgrades(&mut rng);
            assert_eq!(offers.len(), 3);
            let unique: HashSet<_> = offers.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_spawn_wave_one() {
        let mut state = playing_state();
        let mut events = Vec::new();
        spawn_wave(&mut state, &mut events);

        assert!(state.wave.in_progress);
        assert_eq!(state.enemies.len(), 6);
        assert!(state.enemies.iter().all(|e| e.max_health == 33.0));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 6);
    }

    #[test]
    fn test_top_up_when_arena_empty_below_target() {
        let mut state = playing_state();
        state.wave.in_progress = true;
        state.wave.enemies_killed = 4;
        let mut events = Vec::new();

        update_progression(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 6);
        assert_eq!(state.wave.wave, 1);
    }

    #[test]
    fn test_target_met_offers_upgrades() {
        let mut state = playing_state();
        state.wave.in_progress = true;
        state.wave.enemies_killed = 10;
        let mut events = Vec::new();

        update_progression(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::UpgradeSelection);
        assert_eq!(state.offered_upgrades.len(), 3);
        assert!(!state.wave.in_progress);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_apply_upgrade_starts_next_wave() {
        let mut state = playing_state();
        state.phase = GamePhase::UpgradeSelection;
        state.offered_upgrades = vec![Upgrade::Damage, Upgrade::Speed, Upgrade::Vampire];
        let mut events = Vec::new();

        assert!(apply_upgrade(&mut state, 0, &mut events));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.damage_multiplier, 1.5);
        assert_eq!(state.wave.wave, 2);
        assert_eq!(state.wave.enemies_killed, 0);
        assert_eq!(state.wave.enemies_to_next_wave, 14);
        assert_eq!(state.enemies.len(), 7);
        assert!(state.offered_upgrades.is_empty());
    }

    #[test]
    fn test_invalid_upgrade_choice_ignored() {
        let mut state = playing_state();
        state.phase = GamePhase::UpgradeSelection;
        state.offered_upgrades = vec![Upgrade::Damage, Upgrade::Speed, Upgrade::Vampire];
        let mut events = Vec::new();

        assert!(!apply_upgrade(&mut state, 3, &mut events));
        assert_eq!(state.phase, GamePhase::UpgradeSelection);
        assert_eq!(state.wave.wave, 1);
        assert!(events.is_empty());
    }
}
