//! Run economy: seed balance and upgrade levels
//!
//! One `Economy` lives in the scene context for the whole process. Waves
//! deposit collected seeds into it; the shop prices and applies upgrades.

use serde::{Deserialize, Serialize};

/// Highest level any upgrade can reach
pub const MAX_UPGRADE_LEVEL: u32 = 5;

/// Seed cost indexed by the level before purchase
pub const UPGRADE_COSTS: [u32; MAX_UPGRADE_LEVEL as usize] = [5, 10, 20, 35, 55];

/// Upgrade tracks sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Speed,
    Damage,
    FireRate,
}

impl UpgradeKind {
    /// Shop display order
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Health,
        UpgradeKind::Speed,
        UpgradeKind::Damage,
        UpgradeKind::FireRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Health => "Health",
            UpgradeKind::Speed => "Speed",
            UpgradeKind::Damage => "Damage",
            UpgradeKind::FireRate => "Fire rate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::Health => "+20 max health",
            UpgradeKind::Speed => "+15% movement speed",
            UpgradeKind::Damage => "+25% projectile damage",
            UpgradeKind::FireRate => "+20% fire rate",
        }
    }
}

/// Result of a purchase attempt. The caller deducts `seeds_spent` from its own pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub success: bool,
    pub seeds_spent: u32,
}

impl PurchaseOutcome {
    fn failed() -> Self {
        Self {
            success: false,
            seeds_spent: 0,
        }
    }
}

/// Persistent progression for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    /// Banked seeds
    pub seeds: u32,
    pub health_level: u32,
    pub speed_level: u32,
    pub damage_level: u32,
    pub fire_rate_level: u32,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cost of the next level, `None` once the track is maxed
    pub fn upgrade_cost(current_level: u32) -> Option<u32> {
        UPGRADE_COSTS.get(current_level as usize).copied()
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Health => self.health_level,
            UpgradeKind::Speed => self.speed_level,
            UpgradeKind::Damage => self.damage_level,
            UpgradeKind::FireRate => self.fire_rate_level,
        }
    }

    fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Health => &mut self.health_level,
            UpgradeKind::Speed => &mut self.speed_level,
            UpgradeKind::Damage => &mut self.damage_level,
            UpgradeKind::FireRate => &mut self.fire_rate_level,
        }
    }

    pub fn is_maxed(&self, kind: UpgradeKind) -> bool {
        self.level(kind) >= MAX_UPGRADE_LEVEL
    }

    /// Price of the next level of `kind`
    pub fn next_cost(&self, kind: UpgradeKind) -> Option<u32> {
        Self::upgrade_cost(self.level(kind))
    }

    /// Whether `available` seeds can buy the next level of `kind`
    pub fn can_afford(&self, kind: UpgradeKind, available: u32) -> bool {
        self.next_cost(kind).is_some_and(|cost| available >= cost)
    }

    /// Buy one level of `kind` with `available` seeds.
    ///
    /// Only the level changes here; the seed pools belong to the caller.
    pub fn purchase(&mut self, kind: UpgradeKind, available: u32) -> PurchaseOutcome {
        let Some(cost) = self.next_cost(kind) else {
            log::debug!("{} already at max level", kind.name());
            return PurchaseOutcome::failed();
        };
        if available < cost {
            log::debug!("{} costs {}, only {} available", kind.name(), cost, available);
            return PurchaseOutcome::failed();
        }

        let level = self.level_mut(kind);
        *level += 1;
        log::info!("Bought {} level {} for {} seeds", kind.name(), *level, cost);

        PurchaseOutcome {
            success: true,
            seeds_spent: cost,
        }
    }

    /// Bank seeds collected during a wave
    pub fn deposit(&mut self, seeds: u32) {
        self.seeds = self.seeds.saturating_add(seeds);
    }

    /// Remove up to `seeds` from the balance, returning how many were taken
    pub fn withdraw(&mut self, seeds: u32) -> u32 {
        let taken = seeds.min(self.seeds);
        self.seeds -= taken;
        taken
    }

    /// New-run boundary: forget every upgrade and the balance
    pub fn reset(&mut self) {
        log::info!("Economy reset");
        *self = Self::default();
    }

    // === Derived bonuses ===

    pub fn health_bonus(&self) -> i32 {
        self.health_level as i32 * 20
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + 0.15 * self.speed_level as f32
    }

    pub fn damage_multiplier(&self) -> f32 {
        1.0 + 0.25 * self.damage_level as f32
    }

    pub fn fire_rate_multiplier(&self) -> f32 {
        1.0 + 0.20 * self.fire_rate_level as f32
    }
}

/// Split a purchase cost between wave-local seeds and the banked balance.
///
/// Wave-local seeds are spent first. Returns `(from_local, from_bank)`.
pub fn split_cost(cost: u32, local_seeds: u32) -> (u32, u32) {
    let from_local = cost.min(local_seeds);
    (from_local, cost - from_local)
}
