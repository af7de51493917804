//! Wave difficulty curve
//!
//! Pure mapping from a wave number to its spawn and scaling parameters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub level: u32,
    pub enemies_total: u32,
    pub max_concurrent_enemies: u32,
    pub spawn_interval: f32,
    pub raccoon_ratio: f32,
    pub enemy_health_multiplier: f32,
    pub enemy_speed_multiplier: f32,
    /// Multiplies each kind's base shoot interval
    pub enemy_shoot_interval_scale: f32,
    pub enemy_projectile_count: u32,
}

impl WaveConfig {
    /// Parameters for wave `level` (1-based; callers keep it in 1..=20)
    pub fn for_level(level: u32) -> Self {
        let l = level as f32;
        Self {
            level,
            enemies_total: 9 * level,
            max_concurrent_enemies: (3 + level).min(10),
            spawn_interval: (3.5 - 0.2 * l).max(1.0),
            raccoon_ratio: (0.3 + 0.05 * l).min(0.6),
            enemy_health_multiplier: 1.0 + 0.2 * (l - 1.0),
            enemy_speed_multiplier: 1.0 + 0.1 * (l - 1.0),
            enemy_shoot_interval_scale: (3.0 - 0.15 * l).max(1.0),
            enemy_projectile_count: (1 + level / 5).min(4),
        }
    }

    /// Wave-select difficulty band
    pub fn difficulty_label(level: u32) -> &'static str {
        match level {
            0..=5 => "Easy",
            6..=10 => "Medium",
            11..=15 => "Hard",
            _ => "Extreme",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wave_one() {
        let cfg = WaveConfig::for_level(1);
        assert_eq!(cfg.enemies_total, 9);
        assert_eq!(cfg.max_concurrent_enemies, 4);
        assert!((cfg.spawn_interval - 3.3).abs() < 1e-5);
        assert!((cfg.raccoon_ratio - 0.35).abs() < 1e-5);
        assert_eq!(cfg.enemy_health_multiplier, 1.0);
        assert_eq!(cfg.enemy_speed_multiplier, 1.0);
        assert!((cfg.enemy_shoot_interval_scale - 2.85).abs() < 1e-5);
        assert_eq!(cfg.enemy_projectile_count, 1);
    }

    #[test]
    fn test_caps_at_wave_twenty() {
        let cfg = WaveConfig::for_level(20);
        assert_eq!(cfg.enemies_total, 180);
        assert_eq!(cfg.max_concurrent_enemies, 10);
        assert_eq!(cfg.spawn_interval, 1.0);
        assert!((cfg.raccoon_ratio - 0.6).abs() < 1e-6);
        assert_eq!(cfg.enemy_shoot_interval_scale, 1.0);
        assert_eq!(cfg.enemy_projectile_count, 4);
    }

    #[test]
    fn test_difficulty_label() {
        assert_eq!(WaveConfig::difficulty_label(5), "Easy");
        assert_eq!(WaveConfig::difficulty_label(6), "Medium");
        assert_eq!(WaveConfig::difficulty_label(15), "Hard");
        assert_eq!(WaveConfig::difficulty_label(16), "Extreme");
    }

    proptest! {
        #[test]
        fn prop_totals_and_concurrency(level in 1u32..=200) {
            let cfg = WaveConfig::for_level(level);
            prop_assert_eq!(cfg.enemies_total, 9 * level);
            prop_assert_eq!(cfg.max_concurrent_enemies, (3 + level).min(10));
        }

        #[test]
        fn prop_projectile_count_monotonic_and_bounded(level in 1u32..=200) {
            let here = WaveConfig::for_level(level).enemy_projectile_count;
            let next = WaveConfig::for_level(level + 1).enemy_projectile_count;
            prop_assert!(next >= here);
            prop_assert!(here <= 4);
        }

        #[test]
        fn prop_deterministic(level in 1u32..=200) {
            prop_assert_eq!(WaveConfig::for_level(level), WaveConfig::for_level(level));
        }
    }
}
