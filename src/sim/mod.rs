//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied `dt` only, no internal clock
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CombatOutcome, resolve_combat};
pub use geometry::{BitMask, CollisionMap, ImageCollisionMap, boxes_overlap, masks_overlap};
pub use snapshot::Snapshot;
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Player, Projectile, SpriteMasks, Upgrade,
};
pub use tick::{MenuAction, TickInput, tick};
pub use wave::{WaveState, apply_upgrade, offer_upgrades, spawn_wave, update_progression};
