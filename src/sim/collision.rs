//! Per-frame combat resolution
//!
//! Pairs every live enemy with every live projectile, applies damage and
//! vampirism, then checks enemy contact against the player. Removals are
//! collected during the scan and applied at the end so no entity is skipped.

use super::geometry::boxes_overlap;
use super::state::{GameEvent, GameState};

/// Summary of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Projectiles that hit something
    pub hits: u32,
    pub kills: u32,
    /// Player took contact damage
    pub player_hit: bool,
    /// Player health reached zero or below from contact damage
    pub player_died: bool,
}

/// Resolve projectile hits and enemy contact for the current positions.
///
/// Iteration order is collection order: when several enemies overlap one
/// projectile, the earliest enemy takes the hit. Each enemy takes at most one
/// projectile per frame.
pub fn resolve_combat(state: &mut GameState, events: &mut Vec<GameEvent>) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let damage = state.tuning.projectile_damage * state.player.damage_multiplier;

    let mut dead = vec![false; state.enemies.len()];
    let mut consumed = vec![false; state.projectiles.len()];

    for (ei, enemy) in state.enemies.iter_mut().enumerate() {
        for (pi, proj) in state.projectiles.iter().enumerate() {
            if consumed[pi] || !proj.collides_with(enemy, &state.masks) {
                continue;
            }
            consumed[pi] = true;
            outcome.hits += 1;

            if enemy.take_damage(damage) {
                dead[ei] = true;
                outcome.kills += 1;
                state.wave.enemies_killed += 1;
                log::debug!("Enemy {} killed ({} this wave)", enemy.id, state.wave.enemies_killed);
                events.push(GameEvent::EnemyKilled { id: enemy.id });

                if state.player.vampirism > 0.0 {
                    state.player.heal(damage * state.player.vampirism);
                }
            } else {
                events.push(GameEvent::EnemyHit {
                    id: enemy.id,
                    health: enemy.health,
                });
            }
            break;
        }
    }

    let contact_damage = state.tuning.contact_damage;
    // Enemies killed above are still in the arena until the removal below
    for enemy in &state.enemies {
        let touching = boxes_overlap(state.player.pos, state.player.size, enemy.pos, enemy.size);
        if touching && state.player.take_damage(contact_damage) {
            outcome.player_hit = true;
            events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
            if state.player.is_dead() {
                outcome.player_died = true;
            }
        }
    }

    let mut i = 0;
    state.enemies.retain(|_| {
        let keep = !dead[i];
        i += 1;
        keep
    });
    let mut i = 0;
    state.projectiles.retain(|_| {
        let keep = !consumed[i];
        i += 1;
        keep
    });

    outcome
}
