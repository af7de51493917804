//! Frame input snapshot consumed by scenes
//!
//! The platform layer translates raw key names and mouse events into
//! `Action`s through the keybindings in `Settings`, then hands one
//! `InputState` per frame to the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Confirm,
    Cancel,
    Menu,
    ToggleShop,
    WaveSelect,
    Continue,
    ToggleFps,
    ToggleHitboxes,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::NavigateUp,
        Action::NavigateDown,
        Action::NavigateLeft,
        Action::NavigateRight,
        Action::Confirm,
        Action::Cancel,
        Action::Menu,
        Action::ToggleShop,
        Action::WaveSelect,
        Action::Continue,
        Action::ToggleFps,
        Action::ToggleHitboxes,
    ];
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointer position in screen space
    pub pointer: Vec2,
    /// Actions whose key went down this frame
    pub pressed: Vec<Action>,
    /// Left mouse button went down this frame
    pub clicked: bool,
}

impl InputState {
    pub fn new(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    /// Builder-style press, handy for synthetic input
    pub fn with_action(mut self, action: Action) -> Self {
        self.press(action);
        self
    }

    pub fn with_click(mut self, at: Vec2) -> Self {
        self.pointer = at;
        self.clicked = true;
        self
    }

    pub fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.pressed.push(action);
        }
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Any of `actions` went down this frame
    pub fn any_pressed(&self, actions: &[Action]) -> bool {
        actions.iter().any(|a| self.just_pressed(*a))
    }

    /// Clear per-frame edges, keeping the pointer
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.clicked = false;
    }
}
