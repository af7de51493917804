//! Ridiculously Overpowered - a top-down wave survival arcade game
//!
//! Core modules:
//! - `sim`: Wave simulation (entities, spawning, collisions, drops)
//! - `economy`: Persistent run upgrades and seed balance
//! - `scene`: Scene state machine (menu, waves, shop, victory, game over)
//! - `renderer`: Abstract drawing surface consumed by scenes
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod economy;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use economy::{Economy, PurchaseOutcome, UpgradeKind};
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Highest selectable wave
    pub const MAX_WAVE: u32 = 20;

    /// Player / enemy footprint (square, pixels)
    pub const ACTOR_SIZE: f32 = 48.0;
    /// Projectile footprint (square, pixels)
    pub const PROJECTILE_SIZE: f32 = 8.0;

    /// Player stops steering when this close to the pointer
    pub const PLAYER_ARRIVE_RADIUS: f32 = 10.0;
    /// Projectiles fired per player trigger
    pub const PLAYER_SHOTS_PER_TRIGGER: usize = 2;
    /// Base damage of one player projectile before the damage multiplier
    pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
    /// Flat damage of one enemy projectile
    pub const ENEMY_PROJECTILE_DAMAGE: i32 = 5;

    /// Enemy rams the player below this distance
    pub const CONTACT_RADIUS: f32 = 50.0;
    /// Projectile hit distance (both directions)
    pub const HIT_RADIUS: f32 = 30.0;
    /// Seed pickup distance
    pub const PICKUP_RADIUS: f32 = 40.0;
    /// Enemies closer than this push each other apart
    pub const SEPARATION_RADIUS: f32 = 60.0;

    /// Enemies appear this far outside the screen edge
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Projectiles die this far outside the screen edge
    pub const FIELD_MARGIN: f32 = 50.0;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}

/// Unit vector for an angle given in degrees (0° = +x, clockwise on screen)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Round half up to the nearest integer; the single rounding policy for damage and health
#[inline]
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_degrees() {
        let right = direction_from_degrees(0.0);
        assert!((right - Vec2::X).length() < 1e-5);
        let down = direction_from_degrees(90.0);
        assert!((down - Vec2::Y).length() < 1e-5);
        assert!((direction_from_degrees(237.0).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(12.49), 12);
        assert_eq!(round_half_up(10.0), 10);
        assert_eq!(round_half_up(17.5), 18);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }
}
