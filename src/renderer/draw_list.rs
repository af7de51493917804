//! Recording canvas
//!
//! Stores draw calls instead of rasterizing them. Used by the headless
//! binary and by tests that assert what a scene shows.

use glam::Vec2;

use super::{Canvas, Color, TextAlign};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f32),
    FillCircle(Vec2, f32, Color),
    Line(Vec2, Vec2, Color, f32),
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// All text drawn so far, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Some drawn text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle(..)))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        // Everything before a clear is overdrawn
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect(rect, color, width));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle(center, radius, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line(from, to, color, width));
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
            align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_clear_drops_earlier_commands() {
        let mut list = DrawList::new(100.0, 100.0);
        list.fill_circle(Vec2::ZERO, 3.0, colors::WHITE);
        list.clear(colors::BACKGROUND);
        list.text("hello world", Vec2::ZERO, 12.0, colors::WHITE, TextAlign::Left);

        assert_eq!(list.commands.len(), 2);
        assert_eq!(list.circle_count(), 0);
        assert!(list.has_text("world"));
        assert_eq!(list.size(), Vec2::new(100.0, 100.0));
    }
}
