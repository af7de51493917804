//! Main menu

use glam::Vec2;

use super::{InputDelay, MENU_INPUT_DELAY, Scene, SceneContext, SceneId};
use crate::audio::SoundEffect;
use crate::input::InputState;
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::Rect;
use crate::ui::ButtonList;

const PLAY: usize = 0;
const WAVE_SELECT: usize = 1;
const SHOP: usize = 2;
const SETTINGS: usize = 3;
const QUIT: usize = 4;

pub struct MenuScene {
    field: Rect,
    pub buttons: ButtonList,
    delay: InputDelay,
}

impl MenuScene {
    pub fn new(field: Rect) -> Self {
        let buttons = ButtonList::vertical(
            &["Play", "Wave Select", "Shop (Upgrades)", "Settings", "Quit"],
            field.center().x,
            280.0,
            Vec2::new(350.0, 70.0),
            20.0,
        );
        Self {
            field,
            buttons,
            delay: InputDelay::default(),
        }
    }
}

impl Scene for MenuScene {
    fn enter(&mut self, _ctx: &mut SceneContext) {
        self.delay.arm(MENU_INPUT_DELAY);
        self.buttons.selected = 0;
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }
        let Some(choice) = self.buttons.handle_input(input) else {
            return;
        };
        ctx.audio.play(SoundEffect::MenuSelect);

        // Rejections are logged by the context
        let _ = match choice {
            PLAY => ctx.request(SceneId::Wave(1)),
            WAVE_SELECT => ctx.request(SceneId::WaveSelect),
            SHOP => {
                ctx.next_wave = 1;
                ctx.request(SceneId::Shop)
            }
            SETTINGS => ctx.request(SceneId::Settings),
            QUIT => {
                ctx.request_quit();
                Ok(())
            }
            _ => Ok(()),
        };
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.delay.update(dt);
    }

    fn draw(&self, ctx: &SceneContext, canvas: &mut dyn Canvas) {
        let cx = self.field.center().x;
        canvas.clear(colors::BACKGROUND);
        canvas.text(
            "RIDICULOUSLY OVERPOWERED",
            Vec2::new(cx, 110.0),
            64.0,
            [1.0, 0.7, 0.73, 1.0],
            TextAlign::Center,
        );
        canvas.text(
            "Turnip vs. Trash Cans & Raccoons",
            Vec2::new(cx, 175.0),
            28.0,
            [0.78, 0.86, 0.9, 1.0],
            TextAlign::Center,
        );
        canvas.text(
            &format!("Seeds: {}", ctx.economy.seeds),
            Vec2::new(cx, 235.0),
            24.0,
            colors::SEED,
            TextAlign::Center,
        );
        self.buttons.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::scene::SceneManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    fn menu() -> (SceneContext, SceneManager) {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 5);
        let manager = SceneManager::new(&mut ctx);
        (ctx, manager)
    }

    #[test]
    fn test_input_ignored_during_delay() {
        let (mut ctx, mut manager) = menu();
        let confirm = InputState::default().with_action(Action::Confirm);
        manager.handle_input(&mut ctx, &confirm);
        assert_eq!(ctx.pending(), None);

        manager.update(&mut ctx, 0.5);
        manager.handle_input(&mut ctx, &confirm);
        assert_eq!(ctx.pending(), Some(SceneId::Wave(1)));
    }

    #[test]
    fn test_shop_button_targets_wave_one() {
        let (mut ctx, mut manager) = menu();
        ctx.next_wave = 9;
        manager.update(&mut ctx, 0.5);

        let shop_button = manager.scenes.menu.buttons.buttons[SHOP].rect.center();
        let click = InputState::default().with_click(shop_button);
        manager.handle_input(&mut ctx, &click);
        assert_eq!(ctx.pending(), Some(SceneId::Shop));
        assert_eq!(ctx.next_wave, 1);
    }

    #[test]
    fn test_quit_button_sets_flag() {
        let (mut ctx, mut manager) = menu();
        manager.update(&mut ctx, 0.5);
        let up = InputState::default().with_action(Action::NavigateUp);
        manager.handle_input(&mut ctx, &up);
        let confirm = InputState::default().with_action(Action::Confirm);
        manager.handle_input(&mut ctx, &confirm);
        assert!(ctx.quit_requested());
    }
}
