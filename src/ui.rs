//! Immediate-style widgets: buttons, sliders, vertical button lists

use glam::Vec2;

use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::Rect;

#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub enabled: bool,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
            enabled: true,
        }
    }

    pub fn hovered(&self, input: &InputState) -> bool {
        self.rect.contains(input.pointer)
    }

    /// Clicked this frame
    pub fn clicked(&self, input: &InputState) -> bool {
        self.enabled && input.clicked && self.hovered(input)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, highlighted: bool) {
        let fill = if !self.enabled {
            [0.2, 0.2, 0.2, 1.0]
        } else if highlighted {
            [0.4, 0.4, 0.4, 1.0]
        } else {
            [0.27, 0.27, 0.27, 1.0]
        };
        canvas.fill_rect(self.rect, fill);
        if highlighted {
            canvas.stroke_rect(self.rect, colors::HIGHLIGHT, 2.0);
        }
        let center = self.rect.center();
        canvas.text(
            &self.label,
            center + Vec2::new(0.0, 8.0),
            24.0,
            colors::WHITE,
            TextAlign::Center,
        );
    }
}

/// Vertical list of buttons with a keyboard cursor
#[derive(Debug, Clone)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
    pub selected: usize,
}

impl ButtonList {
    /// Stack `labels` centered on `center_x`, starting at `top`
    pub fn vertical(labels: &[&str], center_x: f32, top: f32, size: Vec2, spacing: f32) -> Self {
        let buttons = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let y = top + i as f32 * (size.y + spacing);
                Button::new(Rect::new(center_x - size.x * 0.5, y, size.x, size.y), *label)
            })
            .collect();
        Self { buttons, selected: 0 }
    }

    /// Move the cursor with up/down (wrapping) and follow the mouse.
    /// Returns the index activated by confirm or click.
    pub fn handle_input(&mut self, input: &InputState) -> Option<usize> {
        let count = self.buttons.len();
        if count == 0 {
            return None;
        }
        if input.just_pressed(Action::NavigateUp) {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.just_pressed(Action::NavigateDown) {
            self.selected = (self.selected + 1) % count;
        }
        if let Some(i) = self.buttons.iter().position(|b| b.hovered(input)) {
            self.selected = i;
        }

        if let Some(i) = self.buttons.iter().position(|b| b.clicked(input)) {
            return Some(i);
        }
        if input.just_pressed(Action::Confirm) && self.buttons[self.selected].enabled {
            return Some(self.selected);
        }
        None
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for (i, button) in self.buttons.iter().enumerate() {
            button.draw(canvas, i == self.selected);
        }
    }
}

/// Horizontal 0..1 slider
#[derive(Debug, Clone)]
pub struct Slider {
    pub rect: Rect,
    pub label: String,
    pub value: f32,
}

impl Slider {
    pub fn new(rect: Rect, label: impl Into<String>, value: f32) -> Self {
        Self {
            rect,
            label: label.into(),
            value: value.clamp(0.0, 1.0),
        }
    }

    /// Jump to the clicked position; true when the value changed
    pub fn handle_click(&mut self, input: &InputState) -> bool {
        if !input.clicked || !self.rect.inflate(6.0).contains(input.pointer) {
            return false;
        }
        let t = ((input.pointer.x - self.rect.min.x) / self.rect.size.x).clamp(0.0, 1.0);
        let changed = (t - self.value).abs() > f32::EPSILON;
        self.value = t;
        changed
    }

    /// Keyboard nudge
    pub fn step(&mut self, delta: f32) {
        self.value = (self.value + delta).clamp(0.0, 1.0);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, highlighted: bool) {
        canvas.text(
            &format!("{}: {}%", self.label, (self.value * 100.0).round() as i32),
            self.rect.min - Vec2::new(0.0, 10.0),
            22.0,
            if highlighted { colors::HIGHLIGHT } else { colors::WHITE },
            TextAlign::Left,
        );
        canvas.fill_rect(self.rect, colors::DARK_GRAY);
        let mut filled = self.rect;
        filled.size.x *= self.value;
        canvas.fill_rect(filled, colors::GREEN);
        let knob = Vec2::new(self.rect.min.x + self.rect.size.x * self.value, self.rect.center().y);
        canvas.fill_circle(knob, self.rect.size.y * 0.8, colors::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ButtonList {
        ButtonList::vertical(&["A", "B", "C"], 640.0, 100.0, Vec2::new(200.0, 50.0), 10.0)
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut buttons = list();
        let up = InputState::new(Vec2::ZERO).with_action(Action::NavigateUp);
        assert_eq!(buttons.handle_input(&up), None);
        assert_eq!(buttons.selected, 2);

        let down = InputState::new(Vec2::ZERO).with_action(Action::NavigateDown);
        buttons.handle_input(&down);
        assert_eq!(buttons.selected, 0);

        let confirm = InputState::new(Vec2::ZERO).with_action(Action::Confirm);
        assert_eq!(buttons.handle_input(&confirm), Some(0));
    }

    #[test]
    fn test_click_activates_button_under_pointer() {
        let mut buttons = list();
        // Second button spans y 160..210
        let click = InputState::default().with_click(Vec2::new(640.0, 180.0));
        assert_eq!(buttons.handle_input(&click), Some(1));

        let miss = InputState::default().with_click(Vec2::new(10.0, 10.0));
        assert_eq!(buttons.handle_input(&miss), None);
    }

    #[test]
    fn test_disabled_button_ignores_click() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 10.0, 10.0), "x");
        button.enabled = false;
        let click = InputState::default().with_click(Vec2::new(5.0, 5.0));
        assert!(!button.clicked(&click));
    }

    #[test]
    fn test_slider_click_sets_value() {
        let mut slider = Slider::new(Rect::new(100.0, 100.0, 200.0, 10.0), "Music", 0.7);
        let click = InputState::default().with_click(Vec2::new(150.0, 105.0));
        assert!(slider.handle_click(&click));
        assert!((slider.value - 0.25).abs() < 1e-5);

        slider.step(1.0);
        assert_eq!(slider.value, 1.0);
    }
}
