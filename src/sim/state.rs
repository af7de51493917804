//! Wave state and combat entity types
//!
//! A `WaveState` owns every entity of one wave. It is created on scene
//! entry and dropped on scene exit; only the stats and the collected seeds
//! outlive it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Cooldown, Damageable, Rect};
use super::wave::WaveConfig;
use crate::consts::*;
use crate::economy::Economy;
use crate::tuning::{EnemyArchetype, Tuning};
use crate::{direction_from_degrees, round_half_up};

/// Phase of a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// "WAVE N" banner; nothing moves
    Intro { remaining: f32 },
    /// Active gameplay
    Active,
    /// Outcome decided; the scene is switching away
    Completing,
}

/// Summary handed to the victory / game-over scenes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveStats {
    pub wave_number: u32,
    pub score: u32,
    pub enemies_killed: u32,
    /// Seconds of active play
    pub elapsed: f32,
}

/// How a wave ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WaveOutcome {
    Victory(WaveStats),
    Defeat(WaveStats),
}

impl WaveOutcome {
    pub fn stats(&self) -> WaveStats {
        match self {
            WaveOutcome::Victory(stats) | WaveOutcome::Defeat(stats) => *stats,
        }
    }
}

/// Things that happened during a tick (drained by the scene for audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired,
    EnemyHit,
    EnemyKilled(EnemyKind),
    PlayerHurt,
    SeedDropped,
    SeedCollected,
    WaveCleared,
    PlayerDied,
}

/// The player (a turnip that follows the pointer and sprays shots)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub damage_multiplier: f32,
    pub shoot: Cooldown,
}

impl Player {
    /// Build a player whose stats come from the current upgrade levels
    pub fn new(pos: Vec2, economy: &Economy, tuning: &Tuning) -> Self {
        let max_health = tuning.player_base_health + economy.health_bonus();
        Self {
            body: Body::new(pos, ACTOR_SIZE, ACTOR_SIZE),
            health: max_health,
            max_health,
            speed: tuning.player_base_speed * economy.speed_multiplier(),
            damage_multiplier: economy.damage_multiplier(),
            shoot: Cooldown::new(tuning.player_shoot_interval / economy.fire_rate_multiplier()),
        }
    }

    /// Re-derive stats after an upgrade, keeping position and the health fraction
    pub fn rederive(&mut self, economy: &Economy, tuning: &Tuning) {
        let fraction = self.health as f32 / self.max_health.max(1) as f32;
        let mut fresh = Player::new(self.body.pos, economy, tuning);
        fresh.health = round_half_up(fraction * fresh.max_health as f32).clamp(0, fresh.max_health);
        fresh.body.vel = self.body.vel;
        fresh.body.alive = self.body.alive;
        fresh.shoot.elapsed = self.shoot.elapsed;
        *self = fresh;
    }

    /// Steer toward the pointer and integrate
    pub fn update(&mut self, dt: f32, target: Vec2) {
        let to_target = target - self.body.pos;
        if to_target.length() > PLAYER_ARRIVE_RADIUS {
            self.body.vel = to_target.normalize_or_zero() * self.speed;
        } else {
            self.body.vel = Vec2::ZERO;
        }
        self.body.integrate(dt);
    }

    /// Auto-fire trigger; at most one per call
    pub fn can_fire(&mut self, dt: f32) -> bool {
        self.shoot.tick(dt)
    }

    /// Damage dealt by one player projectile
    pub fn projectile_damage(&self) -> i32 {
        round_half_up(PLAYER_BASE_DAMAGE * self.damage_multiplier)
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }
}

impl Damageable for Player {
    fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.body.destroy();
        }
    }

    fn is_alive(&self) -> bool {
        self.body.alive
    }
}

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Trash,
    Raccoon,
}

impl EnemyKind {
    pub fn archetype(self, tuning: &Tuning) -> EnemyArchetype {
        match self {
            EnemyKind::Trash => tuning.trash,
            EnemyKind::Raccoon => tuning.raccoon,
        }
    }
}

/// An enemy chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub contact_damage: i32,
    pub score_value: u32,
    pub shoot: Cooldown,
    pub projectiles_per_volley: u32,
}

impl Enemy {
    /// Spawn with stats scaled once by the wave config
    pub fn new<R: Rng>(
        pos: Vec2,
        kind: EnemyKind,
        config: &WaveConfig,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let base = kind.archetype(tuning);
        let health = round_half_up(base.health * config.enemy_health_multiplier).max(1);
        let interval = base.shoot_interval * config.enemy_shoot_interval_scale;
        // Desynchronize enemies spawned together
        let initial = rng.random::<f32>() * interval;

        Self {
            body: Body::new(pos, ACTOR_SIZE, ACTOR_SIZE),
            kind,
            health,
            max_health: health,
            speed: base.speed * config.enemy_speed_multiplier,
            contact_damage: base.contact_damage,
            score_value: base.score_value,
            shoot: Cooldown::with_elapsed(interval, initial),
            projectiles_per_volley: config.enemy_projectile_count,
        }
    }

    /// Pure pursuit of the player, then integrate
    pub fn update(&mut self, dt: f32, player: &Player) {
        if player.body.alive {
            let dir = (player.body.pos - self.body.pos).normalize_or_zero();
            self.body.vel = dir * self.speed;
        }
        self.shoot.advance(dt);
        self.body.integrate(dt);
    }

    /// Volley size if the shoot timer is ready, else 0
    pub fn can_fire(&mut self) -> u32 {
        if self.shoot.consume() {
            self.projectiles_per_volley
        } else {
            0
        }
    }

    /// Rammed the player: dies outright
    pub fn kill(&mut self) {
        self.health = 0;
        self.body.destroy();
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.body.destroy();
        }
    }

    fn is_alive(&self) -> bool {
        self.body.alive
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: Owner,
    /// Seconds left before it fizzles
    pub lifetime: f32,
    pub damage: i32,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: Vec2, speed: f32, owner: Owner, lifetime: f32, damage: i32) -> Self {
        let mut body = Body::new(pos, PROJECTILE_SIZE, PROJECTILE_SIZE);
        body.vel = direction.normalize_or_zero() * speed;
        Self {
            body,
            owner,
            lifetime,
            damage,
        }
    }

    /// Move; die on expiry or when far outside `field`
    pub fn update(&mut self, dt: f32, field: &Rect) {
        self.body.integrate(dt);
        self.lifetime -= dt;
        if self.lifetime <= 0.0 || !field.inflate(FIELD_MARGIN).contains(self.body.pos) {
            self.body.destroy();
        }
    }
}

/// Currency pickup dropped by enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub pos: Vec2,
    pub bob_phase: f32,
}

impl Seed {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, bob_phase: 0.0 }
    }

    /// Vertical draw offset of the bob animation
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * 4.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    pub size: f32,
    pub lifetime: f32,
    pub age: f32,
}

impl Particle {
    /// Remaining life in 0..1 (used as alpha)
    pub fn life(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Complete state of one wave
#[derive(Debug, Clone)]
pub struct WaveState {
    pub config: WaveConfig,
    pub tuning: Tuning,
    /// Play field (screen rectangle)
    pub field: Rect,
    pub rng: Pcg32,
    pub phase: WavePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub seeds: Vec<Seed>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub enemies_killed: u32,
    pub enemies_spawned: u32,
    /// Seeds picked up this wave, banked only on victory
    pub seeds_collected: u32,
    pub spawn_timer: Cooldown,
    /// Seconds of active play
    pub elapsed: f32,
    pub outcome: Option<WaveOutcome>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl WaveState {
    /// Fresh wave `level` with the player at the field center
    pub fn new(level: u32, economy: &Economy, tuning: &Tuning, field: Rect, seed: u64) -> Self {
        let config = WaveConfig::for_level(level);
        Self {
            config,
            tuning: tuning.clone(),
            field,
            rng: Pcg32::seed_from_u64(seed),
            phase: WavePhase::Intro {
                remaining: tuning.intro_seconds,
            },
            player: Player::new(field.center(), economy, tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            seeds: Vec::new(),
            particles: Vec::new(),
            score: 0,
            enemies_killed: 0,
            enemies_spawned: 0,
            seeds_collected: 0,
            spawn_timer: Cooldown::new(config.spawn_interval),
            elapsed: 0.0,
            outcome: None,
            events: Vec::new(),
        }
    }

    pub fn wave_number(&self) -> u32 {
        self.config.level
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.body.alive).count()
    }

    pub fn stats(&self) -> WaveStats {
        WaveStats {
            wave_number: self.config.level,
            score: self.score,
            enemies_killed: self.enemies_killed,
            elapsed: self.elapsed,
        }
    }

    /// Apply freshly bought upgrades to the live player
    pub fn rederive_player(&mut self, economy: &Economy) {
        self.player.rederive(economy, &self.tuning);
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Random point just outside one of the four screen edges
    pub fn random_edge_point(&mut self) -> Vec2 {
        let min = self.field.min;
        let max = self.field.max();
        let x = self.rng.random_range(min.x..=max.x);
        let y = self.rng.random_range(min.y..=max.y);
        match self.rng.random_range(0..4) {
            0 => Vec2::new(x, min.y - SPAWN_MARGIN),
            1 => Vec2::new(x, max.y + SPAWN_MARGIN),
            2 => Vec2::new(min.x - SPAWN_MARGIN, y),
            _ => Vec2::new(max.x + SPAWN_MARGIN, y),
        }
    }

    /// Spray `count` projectiles from `origin` in independent random directions
    pub fn spray(&mut self, origin: Vec2, count: usize, owner: Owner, damage: i32) {
        let speed = match owner {
            Owner::Player => self.tuning.player_projectile_speed,
            Owner::Enemy => self.tuning.enemy_projectile_speed,
        };
        for _ in 0..count {
            let angle: f32 = self.rng.random_range(0.0..360.0);
            self.projectiles.push(Projectile::new(
                origin,
                direction_from_degrees(angle),
                speed,
                owner,
                self.tuning.projectile_lifetime,
                damage,
            ));
        }
    }

    /// Emit a particle burst
    pub fn emit_burst(&mut self, pos: Vec2, count: usize, color: [f32; 4]) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let dir = direction_from_degrees(self.rng.random_range(0.0..360.0));
            let speed: f32 = self.rng.random_range(50.0..150.0);
            self.particles.push(Particle {
                pos,
                vel: dir * speed,
                color,
                size: self.rng.random_range(2.0..5.0),
                lifetime: self.rng.random_range(0.5..1.5),
                age: 0.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 720.0)
    }

    #[test]
    fn test_player_base_stats() {
        let player = Player::new(Vec2::ZERO, &Economy::new(), &Tuning::default());
        assert_eq!(player.max_health, 100);
        assert_eq!(player.health, 100);
        assert_eq!(player.speed, 300.0);
        assert!((player.shoot.interval - 0.2).abs() < 1e-6);
        assert_eq!(player.projectile_damage(), 10);
    }

    #[test]
    fn test_player_upgraded_stats() {
        let eco = Economy {
            health_level: 2,
            speed_level: 2,
            damage_level: 1,
            fire_rate_level: 5,
            ..Default::default()
        };
        let player = Player::new(Vec2::ZERO, &eco, &Tuning::default());
        assert_eq!(player.max_health, 140);
        assert!((player.speed - 390.0).abs() < 1e-3);
        // 10 * 1.25 = 12.5 rounds half up
        assert_eq!(player.projectile_damage(), 13);
        assert!((player.shoot.interval - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_player_rederive_keeps_health_fraction() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = Player::new(Vec2::new(5.0, 6.0), &eco, &tuning);
        player.take_damage(50);

        eco.health_level = 5;
        player.rederive(&eco, &tuning);
        assert_eq!(player.max_health, 200);
        assert_eq!(player.health, 100);
        assert_eq!(player.body.pos, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_player_stops_near_target() {
        let mut player = Player::new(Vec2::ZERO, &Economy::new(), &Tuning::default());
        player.update(0.1, Vec2::new(5.0, 0.0));
        assert_eq!(player.body.vel, Vec2::ZERO);
        assert_eq!(player.body.pos, Vec2::ZERO);

        player.update(0.1, Vec2::new(100.0, 0.0));
        assert_eq!(player.body.vel, Vec2::new(300.0, 0.0));
        assert!((player.body.pos.x - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_player_fires_once_per_update() {
        let mut player = Player::new(Vec2::ZERO, &Economy::new(), &Tuning::default());
        assert!(!player.can_fire(0.1));
        assert!(player.can_fire(0.1));
        assert!(player.can_fire(10.0));
        assert!(!player.can_fire(0.0));
    }

    #[test]
    fn test_player_death_clamps_health() {
        let mut player = Player::new(Vec2::ZERO, &Economy::new(), &Tuning::default());
        player.take_damage(250);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_enemy_scaling() {
        let mut rng = Pcg32::seed_from_u64(7);
        let cfg = WaveConfig::for_level(3);
        let enemy = Enemy::new(Vec2::ZERO, EnemyKind::Raccoon, &cfg, &Tuning::default(), &mut rng);
        // 30 * 1.4
        assert_eq!(enemy.health, 42);
        assert!((enemy.speed - 96.0).abs() < 1e-3);
        assert_eq!(enemy.contact_damage, 5);
        assert_eq!(enemy.score_value, 15);
        assert!((enemy.shoot.interval - 2.0 * 2.55).abs() < 1e-4);
        assert!(enemy.shoot.elapsed >= 0.0 && enemy.shoot.elapsed < enemy.shoot.interval);
        assert_eq!(enemy.projectiles_per_volley, 1);
    }

    #[test]
    fn test_enemy_pursuit_and_volley() {
        let mut rng = Pcg32::seed_from_u64(1);
        let cfg = WaveConfig::for_level(10);
        let player = Player::new(Vec2::new(100.0, 0.0), &Economy::new(), &Tuning::default());
        let mut enemy = Enemy::new(Vec2::ZERO, EnemyKind::Trash, &cfg, &Tuning::default(), &mut rng);
        enemy.shoot.elapsed = 0.0;

        enemy.update(0.5, &player);
        assert!(enemy.body.vel.x > 0.0 && enemy.body.vel.y.abs() < 1e-5);
        assert_eq!(enemy.can_fire(), 0);

        enemy.update(enemy.shoot.interval, &player);
        assert_eq!(enemy.can_fire(), 3);
        assert_eq!(enemy.shoot.elapsed, 0.0);
    }

    #[test]
    fn test_projectile_expires_and_leaves_field() {
        let mut proj = Projectile::new(Vec2::new(10.0, 10.0), Vec2::X, 400.0, Owner::Player, 3.0, 10);
        proj.update(1.0, &field());
        assert!(proj.body.alive);
        proj.update(2.5, &field());
        assert!(!proj.body.alive);

        let mut stray = Projectile::new(Vec2::new(10.0, 10.0), -Vec2::X, 250.0, Owner::Enemy, 3.0, 5);
        stray.update(0.1, &field());
        assert!(stray.body.alive);
        stray.update(0.2, &field());
        assert!(!stray.body.alive);
    }

    #[test]
    fn test_edge_points_are_off_screen() {
        let mut state = WaveState::new(1, &Economy::new(), &Tuning::default(), field(), 3);
        for _ in 0..100 {
            let p = state.random_edge_point();
            assert!(!field().contains(p));
            assert!(field().inflate(SPAWN_MARGIN + 1.0).contains(p));
        }
    }
}
