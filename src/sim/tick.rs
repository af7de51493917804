//! Per-frame wave simulation step
//!
//! Advances a `WaveState` by a variable `dt`. Every timer resets to zero on
//! triggering, so a long frame yields at most one action per timer.

use glam::Vec2;
use rand::Rng;

use super::collision::{separate_enemies, within};
use super::entity::Damageable;
use super::state::{Enemy, EnemyKind, GameEvent, Owner, Seed, WaveOutcome, WavePhase, WaveState};
use crate::consts::*;

/// Particles spawned when a projectile hits an enemy
const HIT_BURST: usize = 5;
/// Particles spawned when an enemy dies
const DEATH_BURST: usize = 20;
/// Particles spawned on seed pickup
const PICKUP_BURST: usize = 8;

const HIT_COLOR: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
const TRASH_DEATH_COLOR: [f32; 4] = [0.55, 0.6, 0.55, 1.0];
const RACCOON_DEATH_COLOR: [f32; 4] = [0.45, 0.4, 0.4, 1.0];
const SEED_COLOR: [f32; 4] = [0.95, 0.8, 0.2, 1.0];

/// Seed bob animation speed (radians per second)
const SEED_BOB_RATE: f32 = 5.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position the player steers toward
    pub pointer: Vec2,
}

/// Advance the wave by `dt` seconds.
///
/// Returns the outcome on the frame the wave ends; afterwards the state sits
/// in `Completing` and further ticks do nothing.
pub fn tick(state: &mut WaveState, input: &TickInput, dt: f32) -> Option<WaveOutcome> {
    if dt <= 0.0 {
        return None;
    }

    match state.phase {
        WavePhase::Completing => return None,
        WavePhase::Intro { remaining } => {
            let remaining = remaining - dt;
            state.phase = if remaining <= 0.0 {
                log::debug!("wave {} active", state.wave_number());
                WavePhase::Active
            } else {
                WavePhase::Intro { remaining }
            };
            return None;
        }
        WavePhase::Active => {}
    }

    state.elapsed += dt;

    update_player(state, input, dt);
    update_projectiles(state, dt);
    spawn_enemies(state, dt);
    update_enemies(state, dt);
    resolve_contacts(state);
    resolve_player_shots(state);
    resolve_enemy_shots(state);
    collect_dead_enemies(state);
    update_seeds(state, dt);
    update_particles(state, dt);

    state.enemies.retain(|e| e.body.alive);
    state.projectiles.retain(|p| p.body.alive);

    check_outcome(state)
}

fn update_player(state: &mut WaveState, input: &TickInput, dt: f32) {
    if !state.player.is_alive() {
        return;
    }
    state.player.update(dt, input.pointer);
    if state.player.can_fire(dt) {
        let origin = state.player.body.pos;
        let damage = state.player.projectile_damage();
        state.spray(origin, PLAYER_SHOTS_PER_TRIGGER, Owner::Player, damage);
        state.events.push(GameEvent::PlayerFired);
    }
}

fn update_projectiles(state: &mut WaveState, dt: f32) {
    let field = state.field;
    for proj in state.projectiles.iter_mut().filter(|p| p.body.alive) {
        proj.update(dt, &field);
    }
}

/// One spawn per interval crossing while below both caps
fn spawn_enemies(state: &mut WaveState, dt: f32) {
    if state.enemies_spawned >= state.config.enemies_total {
        return;
    }
    if state.alive_enemy_count() >= state.config.max_concurrent_enemies as usize {
        return;
    }
    if !state.spawn_timer.tick(dt) {
        return;
    }

    let kind = if state.rng.random::<f32>() < state.config.raccoon_ratio {
        EnemyKind::Raccoon
    } else {
        EnemyKind::Trash
    };
    let pos = state.random_edge_point();
    let enemy = Enemy::new(pos, kind, &state.config, &state.tuning, &mut state.rng);
    state.enemies.push(enemy);
    state.enemies_spawned += 1;
    log::trace!(
        "spawned {:?} {}/{}",
        kind,
        state.enemies_spawned,
        state.config.enemies_total
    );
}

fn update_enemies(state: &mut WaveState, dt: f32) {
    let mut volleys: Vec<(Vec2, u32)> = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.body.alive) {
        enemy.update(dt, &state.player);
        let count = enemy.can_fire();
        if count > 0 {
            volleys.push((enemy.body.pos, count));
        }
    }

    for (origin, count) in volleys {
        state.spray(origin, count as usize, Owner::Enemy, ENEMY_PROJECTILE_DAMAGE);
        state.events.push(GameEvent::EnemyFired);
    }

    separate_enemies(&mut state.enemies, SEPARATION_RADIUS);
}

/// Enemies that reach the player ram it and die
fn resolve_contacts(state: &mut WaveState) {
    if !state.player.is_alive() {
        return;
    }
    let player_pos = state.player.body.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.body.alive) {
        if within(enemy.body.pos, player_pos, CONTACT_RADIUS) {
            state.player.take_damage(enemy.contact_damage);
            enemy.kill();
            state.events.push(GameEvent::PlayerHurt);
            if !state.player.is_alive() {
                break;
            }
        }
    }
}

fn resolve_player_shots(state: &mut WaveState) {
    let mut hits: Vec<Vec2> = Vec::new();
    for proj in state
        .projectiles
        .iter_mut()
        .filter(|p| p.body.alive && p.owner == Owner::Player)
    {
        let target = state
            .enemies
            .iter_mut()
            .find(|e| e.body.alive && within(e.body.pos, proj.body.pos, HIT_RADIUS));
        if let Some(enemy) = target {
            enemy.take_damage(proj.damage);
            proj.body.destroy();
            hits.push(proj.body.pos);
        }
    }

    for pos in hits {
        state.emit_burst(pos, HIT_BURST, HIT_COLOR);
        state.events.push(GameEvent::EnemyHit);
    }
}

fn resolve_enemy_shots(state: &mut WaveState) {
    if !state.player.is_alive() {
        return;
    }
    let player_pos = state.player.body.pos;
    for proj in state
        .projectiles
        .iter_mut()
        .filter(|p| p.body.alive && p.owner == Owner::Enemy)
    {
        if within(proj.body.pos, player_pos, HIT_RADIUS) {
            state.player.take_damage(proj.damage);
            proj.body.destroy();
            state.events.push(GameEvent::PlayerHurt);
            if !state.player.is_alive() {
                break;
            }
        }
    }
}

/// Score, drops and bursts for every enemy that died this frame
fn collect_dead_enemies(state: &mut WaveState) {
    let dead: Vec<(Vec2, EnemyKind, u32)> = state
        .enemies
        .iter()
        .filter(|e| !e.body.alive)
        .map(|e| (e.body.pos, e.kind, e.score_value))
        .collect();

    for (pos, kind, score_value) in dead {
        state.score += score_value;
        state.enemies_killed += 1;
        state.events.push(GameEvent::EnemyKilled(kind));

        if state.rng.random::<f32>() < state.tuning.seed_drop_chance {
            state.seeds.push(Seed::new(pos));
            state.events.push(GameEvent::SeedDropped);
        }

        let color = match kind {
            EnemyKind::Trash => TRASH_DEATH_COLOR,
            EnemyKind::Raccoon => RACCOON_DEATH_COLOR,
        };
        state.emit_burst(pos, DEATH_BURST, color);
    }
}

fn update_seeds(state: &mut WaveState, dt: f32) {
    let player_pos = state.player.body.pos;
    let can_pick = state.player.is_alive();
    let mut picked: Vec<Vec2> = Vec::new();

    state.seeds.retain_mut(|seed| {
        seed.bob_phase += dt * SEED_BOB_RATE;
        if can_pick && within(seed.pos, player_pos, PICKUP_RADIUS) {
            picked.push(seed.pos);
            false
        } else {
            true
        }
    });

    for pos in picked {
        state.seeds_collected += 1;
        state.emit_burst(pos, PICKUP_BURST, SEED_COLOR);
        state.events.push(GameEvent::SeedCollected);
    }
}

fn update_particles(state: &mut WaveState, dt: f32) {
    for p in &mut state.particles {
        p.pos += p.vel * dt;
        p.vel *= 0.95;
        p.age += dt;
    }
    state.particles.retain(|p| p.age < p.lifetime);
}

/// Death pre-empts completion
fn check_outcome(state: &mut WaveState) -> Option<WaveOutcome> {
    let outcome = if !state.player.is_alive() {
        state.events.push(GameEvent::PlayerDied);
        WaveOutcome::Defeat(state.stats())
    } else if state.enemies_spawned >= state.config.enemies_total && state.alive_enemy_count() == 0 {
        state.events.push(GameEvent::WaveCleared);
        WaveOutcome::Victory(state.stats())
    } else {
        return None;
    };

    log::info!(
        "wave {} ended: {:?} (score {}, kills {}, seeds {})",
        state.wave_number(),
        outcome,
        state.score,
        state.enemies_killed,
        state.seeds_collected
    );
    state.phase = WavePhase::Completing;
    state.outcome = Some(outcome);
    Some(outcome)
}
