//! Game state and core simulation types
//!
//! The session object owns every entity collection. Nothing here is global:
//! the driver holds a [`GameState`] and calls [`GameState::update`] once per
//! frame.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{BitMask, CollisionMap, boxes_overlap, masks_overlap};
use super::wave::WaveState;
use crate::{Error, Settings, Tuning, direction_to, polar_to_cartesian};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Player died, waiting for restart
    GameOver,
    /// Wave cleared, waiting for one of the offered upgrades
    UpgradeSelection,
}

/// Between-wave upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    Damage,
    Health,
    Speed,
    FireRate,
    Vampire,
}

impl Upgrade {
    pub const ALL: [Upgrade; 5] = [
        Upgrade::Damage,
        Upgrade::Health,
        Upgrade::Speed,
        Upgrade::FireRate,
        Upgrade::Vampire,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Upgrade::Damage => "Increase Damage (+50%)",
            Upgrade::Health => "Increase Health (+20)",
            Upgrade::Speed => "Increase Speed (+20%)",
            Upgrade::FireRate => "Increase Fire Rate (+25%)",
            Upgrade::Vampire => "Vampirism (10% lifesteal)",
        }
    }
}

/// Upgrade deltas
pub const DAMAGE_UPGRADE_BONUS: f32 = 0.5;
pub const HEALTH_UPGRADE_BONUS: f32 = 20.0;
pub const SPEED_UPGRADE_FACTOR: f32 = 1.2;
pub const FIRE_RATE_UPGRADE_FACTOR: f32 = 1.25;
pub const VAMPIRE_UPGRADE_BONUS: f32 = 0.1;

/// Notifications emitted during a frame, consumed by audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a projectile
    Shot,
    EnemySpawned { id: u32 },
    /// Enemy damaged but still alive
    EnemyHit { id: u32, health: f32 },
    EnemyKilled { id: u32 },
    /// Player took contact damage
    PlayerHit { health: f32 },
    PlayerDied { wave: u32 },
    /// A batch of enemies was spawned for the wave
    WaveStarted { wave: u32, count: u32 },
    UpgradesOffered(Vec<Upgrade>),
    UpgradeApplied(Upgrade),
    MenuClick,
    MusicStarted,
    MusicStopped,
    QuitRequested,
    PhaseChanged { from: GamePhase, to: GamePhase },
}

impl GameEvent {
    /// Audio cue for this event, if any
    pub fn sound_cue(&self) -> Option<crate::audio::SoundCue> {
        use crate::audio::SoundCue;
        match self {
            GameEvent::Shot => Some(SoundCue::Shoot),
            GameEvent::EnemySpawned { .. } => Some(SoundCue::EnemySpawned),
            GameEvent::PlayerDied { .. } => Some(SoundCue::Death),
            GameEvent::MenuClick => Some(SoundCue::MenuClick),
            _ => None,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub invulnerable: bool,
    /// Seconds of invulnerability left
    pub invulnerability_timer: f32,
    pub damage_multiplier: f32,
    pub fire_rate_multiplier: f32,
    /// Fraction of kill damage returned as healing
    pub vampirism: f32,
    pub base_speed: f32,
    /// Movement speed after upgrades (pixels/s)
    pub speed: f32,
    /// Walk cycle frame index
    pub frame: u32,
    animation_time: f32,
    invulnerability_window: f32,
    animation_frames: u32,
    animation_speed: f32,
}

impl Player {
    /// Fresh player at the centre of the initial view
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.viewport * 0.5,
            size: tuning.player_size,
            health: tuning.player_health,
            max_health: tuning.player_health,
            invulnerable: false,
            invulnerability_timer: 0.0,
            damage_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
            vampirism: 0.0,
            base_speed: tuning.player_speed,
            speed: tuning.player_speed,
            frame: 0,
            animation_time: 0.0,
            invulnerability_window: tuning.invulnerability_time,
            animation_frames: tuning.animation_frames.max(1),
            animation_speed: tuning.animation_speed,
        }
    }

    /// Move along an input vector (components clamped to -1..=1).
    ///
    /// With a collision map the move is all-or-nothing: a blocked target
    /// leaves the player where it was. Returns whether the player moved.
    pub fn move_by(&mut self, dir: IVec2, dt: f32, gate: Option<&dyn CollisionMap>) -> bool {
        let dir = dir.clamp(IVec2::NEG_ONE, IVec2::ONE).as_vec2();
        let candidate = self.pos + dir * self.speed * dt;
        if let Some(map) = gate {
            if !map.is_passable(candidate) {
                return false;
            }
        }
        self.pos = candidate;
        true
    }

    /// Apply damage unless invulnerable. Returns whether damage was applied.
    ///
    /// Health may go negative; callers check [`Player::is_dead`].
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invulnerable {
            return false;
        }
        self.health -= amount;
        self.invulnerable = true;
        self.invulnerability_timer = self.invulnerability_window;
        true
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn tick_invulnerability(&mut self, dt: f32) {
        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerable = false;
            }
        }
    }

    /// Advance the walk cycle while moving, rest on frame 0 otherwise
    pub fn animate(&mut self, dt: f32, moving: bool) {
        if !moving {
            self.frame = 0;
            return;
        }
        self.animation_time += dt;
        if self.animation_time >= self.animation_speed {
            self.animation_time = 0.0;
            self.frame = (self.frame + 1) % self.animation_frames;
        }
    }

    pub fn apply_upgrade(&mut self, upgrade: Upgrade) {
        match upgrade {
            Upgrade::Damage => self.damage_multiplier += DAMAGE_UPGRADE_BONUS,
            Upgrade::Health => {
                self.max_health += HEALTH_UPGRADE_BONUS;
                self.heal(HEALTH_UPGRADE_BONUS);
            }
            Upgrade::Speed => self.speed *= SPEED_UPGRADE_FACTOR,
            Upgrade::FireRate => self.fire_rate_multiplier *= FIRE_RATE_UPGRADE_FACTOR,
            Upgrade::Vampire => self.vampirism += VAMPIRE_UPGRADE_BONUS,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Blink while invulnerable
    pub fn is_visible(&self) -> bool {
        !self.invulnerable || (self.invulnerability_timer * 10.0) % 2.0 < 1.0
    }
}

/// A seeking enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Enemy {
    /// Spawn on a ring around the player, outside the visible area.
    ///
    /// Health and speed are scaled once here and never change afterwards.
    pub fn spawn<R: Rng>(
        id: u32,
        rng: &mut R,
        player_pos: Vec2,
        health_multiplier: f32,
        speed_multiplier: f32,
        tuning: &Tuning,
    ) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let distance =
            rng.random_range(tuning.spawn_distance..tuning.spawn_distance + tuning.spawn_spread);
        let base_speed = rng.random_range(tuning.enemy_speed_min..tuning.enemy_speed_max);
        let health = (tuning.enemy_health * health_multiplier).round();

        Self {
            id,
            pos: player_pos + polar_to_cartesian(distance, angle),
            size: tuning.enemy_size,
            base_speed,
            speed: base_speed * speed_multiplier,
            health,
            max_health: health,
        }
    }

    /// Step straight toward the target
    pub fn seek(&mut self, target: Vec2, dt: f32) {
        self.pos += direction_to(self.pos, target) * self.speed * dt;
    }

    /// Apply damage. Returns true when the enemy died.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Straight-line projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Constant for the projectile's lifetime
    pub vel: Vec2,
    pub size: Vec2,
    /// Sprite rotation (radians, counter-clockwise on screen)
    pub angle: f32,
}

impl Projectile {
    pub fn new(id: u32, origin: Vec2, target: Vec2, speed: f32, size: Vec2) -> Self {
        let dir = direction_to(origin, target);
        Self {
            id,
            pos: origin,
            vel: dir * speed,
            size,
            // Screen y grows downward
            angle: (-dir.y).atan2(dir.x),
        }
    }

    /// Move one step. Returns true once the projectile leaves `[min, max]`.
    pub fn advance(&mut self, dt: f32, min: Vec2, max: Vec2) -> bool {
        self.pos += self.vel * dt;
        self.pos.x < min.x || self.pos.x > max.x || self.pos.y < min.y || self.pos.y > max.y
    }

    /// Pixel-exact when both masks are known, box overlap otherwise
    pub fn collides_with(&self, enemy: &Enemy, masks: &SpriteMasks) -> bool {
        match (&masks.projectile, &masks.enemy) {
            (Some(own), Some(theirs)) => masks_overlap(own, self.pos, theirs, enemy.pos),
            _ => boxes_overlap(self.pos, self.size, enemy.pos, enemy.size),
        }
    }
}

/// Optional pixel masks supplied by the sprite collaborator
#[derive(Debug, Clone, Default)]
pub struct SpriteMasks {
    pub projectile: Option<BitMask>,
    pub enemy: Option<BitMask>,
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub settings: Settings,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    pub wave: WaveState,
    /// Upgrades on offer while in UpgradeSelection
    pub offered_upgrades: Vec<Upgrade>,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    /// World position of the view's top-left corner
    pub camera_offset: Vec2,
    /// Frames processed
    pub time_ticks: u64,
    pub masks: SpriteMasks,
    pub(crate) collision_map: Option<Box<dyn CollisionMap>>,
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session with custom tuning.
    ///
    /// The tuning is validated first: empty spawn or speed ranges would make
    /// enemy spawning panic mid-game.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, Error> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings: Settings::default(),
            phase: GamePhase::Menu,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            wave: WaveState::default(),
            offered_upgrades: Vec::new(),
            shoot_cooldown: 0.0,
            camera_offset: Vec2::ZERO,
            time_ticks: 0,
            masks: SpriteMasks::default(),
            collision_map: None,
            next_id: 1,
            tuning,
        };
        state.follow_player();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Install or remove the movement collision map
    pub fn set_collision_map(&mut self, map: Option<Box<dyn CollisionMap>>) {
        self.collision_map = map;
    }

    pub fn set_sprite_masks(&mut self, masks: SpriteMasks) {
        if masks.projectile.is_some() != masks.enemy.is_some() {
            log::warn!("Only one sprite mask supplied, projectile hits use box overlap");
        }
        self.masks = masks;
    }

    /// Start a fresh run: new player, empty arena, wave counters back to 1
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.wave = WaveState::default();
        self.offered_upgrades.clear();
        self.shoot_cooldown = 0.0;
        self.follow_player();
        self.set_phase(GamePhase::Playing, events);
        log::info!("New run started (seed {})", self.seed);
    }

    /// Switch phase, reporting the transition
    pub fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }

    /// Centre the camera on the player
    pub fn follow_player(&mut self) {
        self.camera_offset = self.player.pos - self.tuning.viewport * 0.5;
    }

    /// World-space rectangle outside which projectiles expire
    pub fn cull_bounds(&self) -> (Vec2, Vec2) {
        let margin = Vec2::splat(self.tuning.projectile_cull_margin);
        (
            self.camera_offset - margin,
            self.camera_offset + self.tuning.viewport + margin,
        )
    }

    /// Advance one frame
    pub fn update(&mut self, input: &super::TickInput, dt: f32) -> Vec<GameEvent> {
        super::tick(self, input, dt)
    }
}
