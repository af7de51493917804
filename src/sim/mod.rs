//! Wave simulation module
//!
//! All combat logic lives here. This module is deterministic given a seed
//! and the sequence of `dt` / pointer inputs:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Dead entities are marked, then compacted at the end of a tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{separate_enemies, within};
pub use entity::{Body, Cooldown, Damageable, Rect};
pub use state::{
    Enemy, EnemyKind, GameEvent, Owner, Particle, Player, Projectile, Seed, WaveOutcome, WavePhase,
    WaveState, WaveStats,
};
pub use tick::{TickInput, tick};
pub use wave::WaveConfig;
