//! Drawing surface abstraction
//!
//! Scenes draw through the `Canvas` trait with plain geometric primitives.
//! The browser build backs it with a 2D canvas context; tests and the
//! headless binary record into a `DrawList`.

pub mod draw_list;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

use glam::Vec2;

use crate::sim::Rect;

pub use draw_list::{DrawCommand, DrawList};

/// Linear RGBA in 0..1
pub type Color = [f32; 4];

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// 2D drawing surface in screen pixels (origin top-left)
pub trait Canvas {
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    /// `pos` is the baseline anchor point
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
}

/// Palette shared by scenes
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.13, 0.16, 0.12, 1.0];
    pub const PANEL: Color = [0.0, 0.0, 0.0, 0.6];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GRAY: Color = [0.6, 0.6, 0.6, 1.0];
    pub const DARK_GRAY: Color = [0.25, 0.25, 0.25, 1.0];
    pub const GREEN: Color = [0.3, 0.85, 0.35, 1.0];
    pub const RED: Color = [0.9, 0.25, 0.2, 1.0];
    pub const YELLOW: Color = [0.95, 0.85, 0.2, 1.0];
    pub const ORANGE: Color = [1.0, 0.55, 0.1, 1.0];
    pub const PURPLE: Color = [0.7, 0.35, 0.9, 1.0];
    pub const HIGHLIGHT: Color = [1.0, 0.9, 0.4, 1.0];

    pub const TURNIP: Color = [0.92, 0.88, 0.95, 1.0];
    pub const TURNIP_TOP: Color = [0.65, 0.3, 0.7, 1.0];
    pub const LEAF: Color = [0.25, 0.7, 0.3, 1.0];
    pub const TRASH_CAN: Color = [0.55, 0.6, 0.55, 1.0];
    pub const RACCOON: Color = [0.45, 0.4, 0.4, 1.0];
    pub const RACCOON_MASK: Color = [0.1, 0.1, 0.1, 1.0];
    pub const PLAYER_SHOT: Color = [1.0, 1.0, 0.6, 1.0];
    pub const ENEMY_SHOT: Color = [1.0, 0.35, 0.3, 1.0];
    pub const SEED: Color = [0.95, 0.8, 0.2, 1.0];
    pub const HITBOX: Color = [1.0, 0.0, 1.0, 0.8];

    /// Same color with alpha scaled
    pub fn faded(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }

    /// Difficulty band tint for wave cards
    pub fn difficulty(label: &str) -> Color {
        match label {
            "Easy" => GREEN,
            "Medium" => YELLOW,
            "Hard" => ORANGE,
            _ => RED,
        }
    }
}
