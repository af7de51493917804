//! Top-level game: scene context, scene manager and per-frame input
//!
//! Platform layers feed raw key names and pointer events in, then call
//! `frame` once per display frame and `draw` into their canvas.

use glam::Vec2;

use crate::input::{Action, InputState};
use crate::renderer::Canvas;
use crate::scene::{SceneContext, SceneId, SceneManager};
use crate::settings::Settings;
use crate::tuning::Tuning;

pub struct Game {
    pub ctx: SceneContext,
    pub manager: SceneManager,
    /// Input gathered since the last frame
    input: InputState,
    frames: u64,
}

impl Game {
    pub fn new(settings: Settings, tuning: Tuning, seed: u64) -> Self {
        let mut ctx = SceneContext::new(settings, tuning, seed);
        let manager = SceneManager::new(&mut ctx);
        log::info!("game created (seed {seed})");
        Self {
            ctx,
            manager,
            input: InputState::new(Vec2::ZERO),
            frames: 0,
        }
    }

    /// Actions bound to a key name in the current settings
    pub fn key_actions(&self, key: &str) -> Vec<Action> {
        self.ctx.settings.actions_for_key(key)
    }

    /// Record a key press; unbound keys are ignored
    pub fn key_down(&mut self, key: &str) {
        let actions = self.key_actions(key);
        if actions.is_empty() {
            log::trace!("unbound key {key:?}");
        }
        for action in actions {
            self.input.press(action);
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.input.pointer = pos;
    }

    pub fn mouse_down(&mut self, pos: Vec2) {
        self.input.pointer = pos;
        self.input.clicked = true;
    }

    /// Run one frame with the input gathered since the previous one
    pub fn frame(&mut self, dt: f32) {
        let input = self.input.clone();
        self.step(&input, dt);
        self.input.end_frame();
    }

    /// Run one frame with explicit input: scene input, then update
    pub fn step(&mut self, input: &InputState, dt: f32) {
        self.manager.handle_input(&mut self.ctx, input);
        self.manager.update(&mut self.ctx, dt);
        self.frames += 1;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.manager.draw(&self.ctx, canvas);
    }

    pub fn is_running(&self) -> bool {
        !self.ctx.quit_requested()
    }

    pub fn current_scene(&self) -> SceneId {
        self.ctx.current
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    fn game() -> Game {
        Game::new(Settings::default(), Tuning::default(), 42)
    }

    /// Let the menu input delay run out
    fn settle(game: &mut Game) {
        game.frame(0.5);
    }

    #[test]
    fn test_starts_in_menu() {
        let game = game();
        assert_eq!(game.current_scene(), SceneId::Menu);
        assert!(game.is_running());
    }

    #[test]
    fn test_key_names_map_through_bindings() {
        let game = game();
        assert_eq!(game.key_actions("Tab"), vec![Action::ToggleShop]);
        assert!(game.key_actions("Enter").contains(&Action::Confirm));
        assert!(game.key_actions("F13").is_empty());
    }

    #[test]
    fn test_enter_on_menu_starts_wave_one() {
        let mut game = game();
        settle(&mut game);
        game.key_down("Enter");
        game.frame(0.016);
        assert_eq!(game.current_scene(), SceneId::Wave(1));
        assert!(game.manager.scenes.wave.state().is_some());
    }

    #[test]
    fn test_input_is_cleared_between_frames() {
        let mut game = game();
        settle(&mut game);
        game.key_down("F3");
        game.frame(0.016);
        assert!(game.ctx.settings.show_fps);
        game.frame(0.016);
        assert!(game.ctx.settings.show_fps);
    }

    #[test]
    fn test_quit_button_stops_the_game() {
        let mut game = game();
        settle(&mut game);
        let quit = game.manager.scenes.menu.buttons.buttons[4].rect.center();
        game.mouse_down(quit);
        game.frame(0.016);
        assert!(!game.is_running());
    }

    #[test]
    fn test_draw_records_commands() {
        let mut game = game();
        game.frame(0.016);
        let mut canvas = DrawList::new(1280.0, 720.0);
        game.draw(&mut canvas);
        assert!(!canvas.commands.is_empty());
        assert_eq!(game.frames(), 1);
    }
}
