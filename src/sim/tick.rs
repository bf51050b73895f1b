//! Per-frame simulation step
//!
//! Dispatches on the game phase. Only `Playing` advances the world; the
//! other phases just react to their menu actions.

use glam::{IVec2, Vec2};

use super::collision::resolve_combat;
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use super::wave::{apply_upgrade, update_progression};

/// Discrete menu/navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start a run from the menu
    Start,
    /// Back to the menu (escape)
    Cancel,
    /// Start over after game over
    Restart,
    /// Pick an offered upgrade (0-based)
    ChooseUpgrade(usize),
    ToggleMusic,
    Quit,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction, each component in -1..=1
    pub movement: IVec2,
    /// Fire button held
    pub fire: bool,
    /// World-space aim target
    pub aim: Vec2,
    pub action: Option<MenuAction>,
    /// Demo mode - the simulation plays itself
    pub idle_mode: bool,
}

/// Enemies closer than this make the demo player back off
const DEMO_RETREAT_DISTANCE: f32 = 200.0;

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let input = if input.idle_mode {
        demo_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    // Escape leaves an active run for the menu
    if input.action == Some(MenuAction::Cancel)
        && matches!(state.phase, GamePhase::Playing | GamePhase::UpgradeSelection)
    {
        state.set_phase(GamePhase::Menu, &mut events);
        if state.settings.music_enabled {
            events.push(GameEvent::MusicStarted);
        }
        return events;
    }

    match state.phase {
        GamePhase::Menu => handle_menu(state, input.action, &mut events),
        GamePhase::GameOver => {
            if input.action == Some(MenuAction::Restart) {
                state.reset(&mut events);
            }
        }
        GamePhase::UpgradeSelection => {
            if let Some(MenuAction::ChooseUpgrade(choice)) = input.action {
                apply_upgrade(state, choice, &mut events);
            }
        }
        GamePhase::Playing => step_playing(state, &input, dt, &mut events),
    }

    events
}

fn handle_menu(state: &mut GameState, action: Option<MenuAction>, events: &mut Vec<GameEvent>) {
    match action {
        Some(MenuAction::Start) => {
            events.push(GameEvent::MenuClick);
            state.reset(events);
        }
        Some(MenuAction::ToggleMusic) => {
            events.push(GameEvent::MenuClick);
            if state.settings.toggle_music() {
                events.push(GameEvent::MusicStarted);
            } else {
                events.push(GameEvent::MusicStopped);
            }
        }
        Some(MenuAction::Quit) => {
            events.push(GameEvent::MenuClick);
            events.push(GameEvent::QuitRequested);
        }
        _ => {}
    }
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    // Player
    state.player.tick_invulnerability(dt);
    let moving = input.movement != IVec2::ZERO;
    state
        .player
        .move_by(input.movement, dt, state.collision_map.as_deref());
    state.player.animate(dt, moving);
    state.follow_player();

    // Shooting
    state.shoot_cooldown -= dt;
    if input.fire && state.shoot_cooldown <= 0.0 {
        state.shoot_cooldown = state.tuning.shoot_cooldown / state.player.fire_rate_multiplier;
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            state.player.pos,
            input.aim,
            state.tuning.projectile_speed,
            state.tuning.projectile_size,
        ));
        events.push(GameEvent::Shot);
    }

    // Projectiles, culled once they leave the padded view
    let (min, max) = state.cull_bounds();
    state.projectiles.retain_mut(|p| !p.advance(dt, min, max));

    // Enemies
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.seek(target, dt);
    }

    let outcome = resolve_combat(state, events);
    if outcome.player_died {
        log::info!("Player died on wave {}", state.wave.wave);
        state.set_phase(GamePhase::GameOver, events);
        events.push(GameEvent::PlayerDied {
            wave: state.wave.wave,
        });
        return;
    }

    update_progression(state, events);
}

/// Synthesized input for demo mode
fn demo_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Menu => input.action = Some(MenuAction::Start),
        GamePhase::GameOver => input.action = Some(MenuAction::Restart),
        GamePhase::UpgradeSelection => input.action = Some(MenuAction::ChooseUpgrade(0)),
        GamePhase::Playing => {
            let player = state.player.pos;
            let nearest = state.enemies.iter().min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(enemy) = nearest {
                input.fire = true;
                input.aim = enemy.pos;
                if enemy.pos.distance(player) < DEMO_RETREAT_DISTANCE {
                    let away = player - enemy.pos;
                    input.movement = IVec2::new(axis(away.x), axis(away.y));
                }
            }
        }
    }
    input
}

fn axis(v: f32) -> i32 {
    if v > 1.0 {
        1
    } else if v < -1.0 {
        -1
    } else {
        0
    }
}
