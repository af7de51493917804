//! Distance-threshold collision tests and enemy separation
//!
//! Every entity is treated as a circle around its center; a contact is any
//! pair closer than the relevant radius.

use glam::Vec2;

use super::state::Enemy;

/// True when `a` and `b` are closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Push overlapping enemies apart.
///
/// Each alive pair closer than `radius` moves apart along the line joining
/// them by half the overlap each. Coincident pairs split along the x axis.
pub fn separate_enemies(enemies: &mut [Enemy], radius: f32) {
    let len = enemies.len();
    for i in 0..len {
        if !enemies[i].body.alive {
            continue;
        }
        for j in (i + 1)..len {
            if !enemies[j].body.alive {
                continue;
            }
            let delta = enemies[i].body.pos - enemies[j].body.pos;
            let dist = delta.length();
            if dist >= radius {
                continue;
            }
            let axis = if dist > 1e-4 { delta / dist } else { Vec2::X };
            let push = axis * (radius - dist) * 0.5;
            enemies[i].body.pos += push;
            enemies[j].body.pos -= push;
        }
    }
}
