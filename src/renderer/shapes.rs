//! Geometric drawing of wave entities
//!
//! Every entity is drawn from primitives so the game needs no image assets.

use glam::Vec2;

use super::colors::{self, faded};
use super::{Canvas, Color};
use crate::sim::{Enemy, EnemyKind, Owner, Particle, Player, Projectile, Rect, Seed, WaveState};

/// Horizontal bar filled to `fraction`
pub fn health_bar(canvas: &mut dyn Canvas, rect: Rect, fraction: f32, fill: Color) {
    canvas.fill_rect(rect, colors::DARK_GRAY);
    let mut filled = rect;
    filled.size.x *= fraction.clamp(0.0, 1.0);
    canvas.fill_rect(filled, fill);
    canvas.stroke_rect(rect, colors::WHITE, 1.0);
}

/// Bar color shifts green -> yellow -> red as health drops
pub fn health_color(fraction: f32) -> Color {
    if fraction > 0.6 {
        colors::GREEN
    } else if fraction > 0.3 {
        colors::YELLOW
    } else {
        colors::RED
    }
}

pub fn player(canvas: &mut dyn Canvas, player: &Player) {
    let pos = player.body.pos;
    let r = player.body.size.x * 0.5;

    // Bulb, purple crown, two leaves
    canvas.fill_circle(pos, r * 0.8, colors::TURNIP);
    canvas.fill_circle(pos - Vec2::new(0.0, r * 0.35), r * 0.55, colors::TURNIP_TOP);
    canvas.fill_circle(pos + Vec2::new(-r * 0.3, -r * 0.95), r * 0.3, colors::LEAF);
    canvas.fill_circle(pos + Vec2::new(r * 0.3, -r * 0.95), r * 0.3, colors::LEAF);
}

pub fn enemy(canvas: &mut dyn Canvas, enemy: &Enemy) {
    let pos = enemy.body.pos;
    let size = enemy.body.size;
    match enemy.kind {
        EnemyKind::Trash => {
            let can = Rect::centered(pos, size * Vec2::new(0.7, 0.9));
            canvas.fill_rect(can, colors::TRASH_CAN);
            let lid = Rect::centered(pos - Vec2::new(0.0, size.y * 0.45), Vec2::new(size.x * 0.8, 6.0));
            canvas.fill_rect(lid, colors::GRAY);
        }
        EnemyKind::Raccoon => {
            canvas.fill_circle(pos, size.x * 0.45, colors::RACCOON);
            let mask = Rect::centered(pos - Vec2::new(0.0, size.y * 0.1), Vec2::new(size.x * 0.7, 8.0));
            canvas.fill_rect(mask, colors::RACCOON_MASK);
        }
    }

    if enemy.health < enemy.max_health {
        let fraction = enemy.health as f32 / enemy.max_health.max(1) as f32;
        let bar = Rect::new(pos.x - size.x * 0.5, pos.y - size.y * 0.5 - 10.0, size.x, 4.0);
        health_bar(canvas, bar, fraction, health_color(fraction));
    }
}

pub fn projectile(canvas: &mut dyn Canvas, proj: &Projectile) {
    let color = match proj.owner {
        Owner::Player => colors::PLAYER_SHOT,
        Owner::Enemy => colors::ENEMY_SHOT,
    };
    canvas.fill_circle(proj.body.pos, proj.body.size.x * 0.5, color);
}

pub fn seed(canvas: &mut dyn Canvas, seed: &Seed) {
    let pos = seed.pos + Vec2::new(0.0, seed.bob_offset());
    canvas.fill_circle(pos, 6.0, colors::SEED);
    canvas.fill_circle(pos - Vec2::new(1.5, 1.5), 2.0, colors::WHITE);
}

pub fn particle(canvas: &mut dyn Canvas, p: &Particle) {
    canvas.fill_circle(p.pos, p.size, faded(p.color, p.life()));
}

/// Everything inside the play field, back to front
pub fn wave(canvas: &mut dyn Canvas, state: &WaveState, show_hitboxes: bool) {
    for s in &state.seeds {
        seed(canvas, s);
    }
    for e in state.enemies.iter().filter(|e| e.body.alive) {
        enemy(canvas, e);
    }
    if state.player.body.alive {
        player(canvas, &state.player);
    }
    for p in state.projectiles.iter().filter(|p| p.body.alive) {
        projectile(canvas, p);
    }
    for p in &state.particles {
        particle(canvas, p);
    }

    if show_hitboxes {
        canvas.stroke_rect(state.player.body.bounds(), colors::HITBOX, 1.0);
        for e in &state.enemies {
            canvas.stroke_rect(e.body.bounds(), colors::HITBOX, 1.0);
        }
        for p in &state.projectiles {
            canvas.stroke_rect(p.body.bounds(), colors::HITBOX, 1.0);
        }
    }
}
