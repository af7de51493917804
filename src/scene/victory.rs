//! Wave cleared screen

use glam::Vec2;

use super::{InputDelay, RESULT_INPUT_DELAY, Scene, SceneContext, SceneId, format_time};
use crate::consts::MAX_WAVE;
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::{Rect, WaveStats};

pub struct VictoryScene {
    field: Rect,
    pub stats: WaveStats,
    /// Bank balance after this wave's deposit
    pub banked: u32,
    delay: InputDelay,
}

impl VictoryScene {
    pub fn new(field: Rect) -> Self {
        Self {
            field,
            stats: WaveStats::default(),
            banked: 0,
            delay: InputDelay::default(),
        }
    }

    fn final_wave(&self) -> bool {
        self.stats.wave_number >= MAX_WAVE
    }
}

impl Scene for VictoryScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.stats = ctx.last_stats.unwrap_or_default();
        self.banked = ctx.economy.seeds;
        self.delay.arm(RESULT_INPUT_DELAY);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }

        if input.just_pressed(Action::Confirm) {
            if self.final_wave() {
                let _ = ctx.request(SceneId::Menu);
            } else {
                ctx.next_wave = self.stats.wave_number + 1;
                let _ = ctx.request(SceneId::Shop);
            }
        } else if input.just_pressed(Action::WaveSelect) {
            let _ = ctx.request(SceneId::WaveSelect);
        } else if input.any_pressed(&[Action::Cancel, Action::Menu]) {
            let _ = ctx.request(SceneId::Menu);
        }
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.delay.update(dt);
    }

    fn draw(&self, _ctx: &SceneContext, canvas: &mut dyn Canvas) {
        let cx = self.field.center().x;
        canvas.clear(colors::BACKGROUND);

        let title = if self.final_wave() {
            "ALL WAVES CLEARED!".to_string()
        } else {
            format!("WAVE {} CLEARED!", self.stats.wave_number)
        };
        canvas.text(&title, Vec2::new(cx, 150.0), 64.0, colors::GREEN, TextAlign::Center);

        let lines = [
            format!("Score: {}", self.stats.score),
            format!("Enemies defeated: {}", self.stats.enemies_killed),
            format!("Time: {}", format_time(self.stats.elapsed)),
            format!("Seeds banked: {}", self.banked),
        ];
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                line,
                Vec2::new(cx, 260.0 + i as f32 * 50.0),
                32.0,
                colors::WHITE,
                TextAlign::Center,
            );
        }

        let hint = if self.final_wave() {
            "SPACE: Menu  |  S: Wave select"
        } else {
            "SPACE: Shop  |  S: Wave select  |  ESC: Menu"
        };
        canvas.text(
            hint,
            Vec2::new(cx, self.field.max().y - 80.0),
            24.0,
            colors::GRAY,
            TextAlign::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::scene::SceneManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    fn after_wave(wave_number: u32) -> (SceneContext, SceneManager) {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 5);
        ctx.current = SceneId::Wave(wave_number);
        ctx.last_stats = Some(WaveStats {
            wave_number,
            score: 120,
            enemies_killed: 9,
            elapsed: 65.0,
        });
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::Victory).unwrap();
        manager.update(&mut ctx, 0.016);
        (ctx, manager)
    }

    fn press(action: Action) -> InputState {
        InputState::default().with_action(action)
    }

    #[test]
    fn test_space_opens_shop_for_next_wave() {
        let (mut ctx, mut manager) = after_wave(3);
        manager.handle_input(&mut ctx, &press(Action::Confirm));
        assert_eq!(ctx.pending(), None);

        manager.update(&mut ctx, 0.6);
        manager.handle_input(&mut ctx, &press(Action::Confirm));
        assert_eq!(ctx.pending(), Some(SceneId::Shop));
        assert_eq!(ctx.next_wave, 4);
    }

    #[test]
    fn test_final_wave_returns_to_menu() {
        let (mut ctx, mut manager) = after_wave(MAX_WAVE);
        manager.update(&mut ctx, 0.6);
        manager.handle_input(&mut ctx, &press(Action::Confirm));
        assert_eq!(ctx.pending(), Some(SceneId::Menu));
    }

    #[test]
    fn test_shows_stats() {
        let (ctx, manager) = after_wave(2);
        let mut canvas = DrawList::new(1280.0, 720.0);
        manager.draw(&ctx, &mut canvas);
        assert!(canvas.has_text("WAVE 2 CLEARED!"));
        assert!(canvas.has_text("Score: 120"));
        assert!(canvas.has_text("Time: 01:05"));
    }
}
