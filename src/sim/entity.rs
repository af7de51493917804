//! Shared entity pieces: kinematic body, bounding box, damage capability, frame timers

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Grow on every side by `margin`
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect {
            min: self.min - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

/// Kinematic body shared by every combat entity. `pos` is the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(width, height),
            alive: true,
        }
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Mark for removal; the owner compacts at the end of the tick
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Something that loses health and dies
pub trait Damageable {
    fn take_damage(&mut self, amount: i32);
    fn is_alive(&self) -> bool;
}

/// Frame-driven interval timer.
///
/// Triggers at most once per `tick`: on crossing the interval the elapsed
/// time resets to zero instead of subtracting, so a long frame never bursts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub elapsed: f32,
    pub interval: f32,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    pub fn with_elapsed(interval: f32, elapsed: f32) -> Self {
        Self { elapsed, interval }
    }

    /// Accumulate without checking
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Reset if ready; true when it triggered
    pub fn consume(&mut self) -> bool {
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Accumulate then consume
    pub fn tick(&mut self, dt: f32) -> bool {
        self.advance(dt);
        self.consume()
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_integrates_velocity() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), 48.0, 48.0);
        body.vel = Vec2::new(100.0, -50.0);
        body.integrate(0.5);
        assert_eq!(body.pos, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn test_body_bounds_centered() {
        let body = Body::new(Vec2::new(100.0, 100.0), 48.0, 48.0);
        let bounds = body.bounds();
        assert_eq!(bounds.min, Vec2::new(76.0, 76.0));
        assert!(bounds.contains(Vec2::new(123.0, 77.0)));
        assert!(!bounds.contains(Vec2::new(125.0, 100.0)));
    }

    #[test]
    fn test_rect_inflate() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.contains(Vec2::new(12.0, 5.0)));
        assert!(a.inflate(3.0).contains(Vec2::new(12.0, 5.0)));
        assert_eq!(a.inflate(3.0).center(), a.center());
    }

    #[test]
    fn test_cooldown_triggers_once_per_tick() {
        let mut cd = Cooldown::new(0.2);
        assert!(!cd.tick(0.1));
        assert!(cd.tick(0.1));
        assert_eq!(cd.elapsed, 0.0);

        // A stall of many intervals still yields a single trigger
        assert!(cd.tick(5.0));
        assert_eq!(cd.elapsed, 0.0);
        assert!(!cd.tick(0.0));
    }
}
