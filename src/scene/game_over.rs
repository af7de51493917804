//! Defeat screen

use glam::Vec2;

use super::{InputDelay, RESULT_INPUT_DELAY, Scene, SceneContext, SceneId, format_time};
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::{Rect, WaveStats};

pub struct GameOverScene {
    field: Rect,
    pub stats: WaveStats,
    delay: InputDelay,
}

impl GameOverScene {
    pub fn new(field: Rect) -> Self {
        Self {
            field,
            stats: WaveStats::default(),
            delay: InputDelay::default(),
        }
    }
}

impl Scene for GameOverScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.stats = ctx.last_stats.unwrap_or_default();
        self.delay.arm(RESULT_INPUT_DELAY);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }

        if input.just_pressed(Action::Confirm) {
            let retry = self.stats.wave_number.max(1);
            let _ = ctx.request(SceneId::Wave(retry));
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
        canvas.clear([0.12, 0.06, 0.06, 1.0]);
        canvas.text("GAME OVER", Vec2::new(cx, 150.0), 72.0, colors::RED, TextAlign::Center);
        canvas.text(
            &format!("Wave {}", self.stats.wave_number),
            Vec2::new(cx, 220.0),
            36.0,
            colors::WHITE,
            TextAlign::Center,
        );

        let lines = [
            format!("Score: {}", self.stats.score),
            format!("Enemies defeated: {}", self.stats.enemies_killed),
            format!("Survived: {}", format_time(self.stats.elapsed)),
        ];
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                line,
                Vec2::new(cx, 300.0 + i as f32 * 50.0),
                30.0,
                colors::WHITE,
                TextAlign::Center,
            );
        }

        canvas.text(
            "SPACE: Retry  |  S: Wave select  |  ESC: Menu",
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
    use crate::scene::SceneManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    #[test]
    fn test_retry_same_wave() {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 5);
        ctx.current = SceneId::Wave(6);
        ctx.last_stats = Some(WaveStats {
            wave_number: 6,
            ..Default::default()
        });
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::GameOver).unwrap();
        manager.update(&mut ctx, 0.016);
        manager.update(&mut ctx, 0.6);

        let retry = InputState::default().with_action(Action::Confirm);
        manager.handle_input(&mut ctx, &retry);
        assert_eq!(ctx.pending(), Some(SceneId::Wave(6)));

        let select = InputState::default().with_action(Action::WaveSelect);
        manager.handle_input(&mut ctx, &select);
        assert_eq!(ctx.pending(), Some(SceneId::WaveSelect));
    }
}
