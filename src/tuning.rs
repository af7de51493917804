//! Data-driven game balance
//!
//! Defaults are the shipped balance. A JSON document may override any subset
//! of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Base stats of one enemy kind before wave scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub speed: f32,
    pub health: f32,
    pub contact_damage: i32,
    pub score_value: u32,
    /// Seconds between volleys before the wave's interval scale
    pub shoot_interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of the "WAVE N" intro before anything moves
    pub intro_seconds: f32,
    /// Chance an enemy drops a seed on death
    pub seed_drop_chance: f32,

    pub player_base_health: i32,
    pub player_base_speed: f32,
    /// Seconds between player triggers before the fire-rate upgrade
    pub player_shoot_interval: f32,

    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    pub projectile_lifetime: f32,

    pub trash: EnemyArchetype,
    pub raccoon: EnemyArchetype,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            intro_seconds: 2.0,
            seed_drop_chance: 0.3,

            player_base_health: 100,
            player_base_speed: 300.0,
            player_shoot_interval: 0.2,

            player_projectile_speed: 400.0,
            enemy_projectile_speed: 250.0,
            projectile_lifetime: 3.0,

            trash: EnemyArchetype {
                speed: 60.0,
                health: 20.0,
                contact_damage: 3,
                score_value: 10,
                shoot_interval: 3.0,
            },
            raccoon: EnemyArchetype {
                speed: 80.0,
                health: 30.0,
                contact_damage: 5,
                score_value: 15,
                shoot_interval: 2.0,
            },
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
