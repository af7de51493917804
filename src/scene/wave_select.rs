//! Wave selection grid (5 x 4 cards)

use glam::Vec2;

use super::{InputDelay, MENU_INPUT_DELAY, Scene, SceneContext, SceneId};
use crate::audio::SoundEffect;
use crate::consts::MAX_WAVE;
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::{Rect, WaveConfig};
use crate::ui::Button;

const COLUMNS: usize = 5;
const CARD_SIZE: f32 = 120.0;
const CARD_SPACING: f32 = 20.0;
const GRID_TOP: f32 = 120.0;

pub struct WaveSelectScene {
    field: Rect,
    /// Card rectangles, index = wave - 1
    pub cards: Vec<Rect>,
    pub back: Button,
    /// Keyboard cursor, index = wave - 1
    pub selected: usize,
    delay: InputDelay,
}

impl WaveSelectScene {
    pub fn new(field: Rect) -> Self {
        let grid_width = COLUMNS as f32 * CARD_SIZE + (COLUMNS - 1) as f32 * CARD_SPACING;
        let left = field.center().x - grid_width * 0.5;
        let cards = (0..MAX_WAVE as usize)
            .map(|i| {
                let row = (i / COLUMNS) as f32;
                let col = (i % COLUMNS) as f32;
                Rect::new(
                    left + col * (CARD_SIZE + CARD_SPACING),
                    GRID_TOP + row * (CARD_SIZE + CARD_SPACING),
                    CARD_SIZE,
                    CARD_SIZE,
                )
            })
            .collect();
        let back = Button::new(Rect::new(field.center().x - 100.0, 670.0, 200.0, 40.0), "Back");

        Self {
            field,
            cards,
            back,
            selected: 0,
            delay: InputDelay::default(),
        }
    }

    /// Arrow keys move the cursor within the grid
    fn navigate(&mut self, input: &InputState) {
        let count = self.cards.len();
        if input.just_pressed(Action::NavigateLeft) && self.selected > 0 {
            self.selected -= 1;
        }
        if input.just_pressed(Action::NavigateRight) && self.selected + 1 < count {
            self.selected += 1;
        }
        if input.just_pressed(Action::NavigateUp) && self.selected >= COLUMNS {
            self.selected -= COLUMNS;
        }
        if input.just_pressed(Action::NavigateDown) && self.selected + COLUMNS < count {
            self.selected += COLUMNS;
        }
    }
}

impl Scene for WaveSelectScene {
    fn enter(&mut self, _ctx: &mut SceneContext) {
        self.delay.arm(MENU_INPUT_DELAY);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }

        if self.back.clicked(input) || input.any_pressed(&[Action::Cancel, Action::Menu]) {
            let _ = ctx.request(SceneId::Menu);
            return;
        }

        self.navigate(input);
        if let Some(i) = self.cards.iter().position(|c| c.contains(input.pointer)) {
            self.selected = i;
        }

        let picked = input.clicked && self.cards[self.selected].contains(input.pointer);
        if picked || input.just_pressed(Action::Confirm) {
            ctx.audio.play(SoundEffect::MenuSelect);
            let _ = ctx.request(SceneId::Wave(self.selected as u32 + 1));
        }
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.delay.update(dt);
    }

    fn draw(&self, _ctx: &SceneContext, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BACKGROUND);
        canvas.text(
            "SELECT A WAVE",
            Vec2::new(self.field.center().x, 80.0),
            52.0,
            colors::WHITE,
            TextAlign::Center,
        );

        for (i, card) in self.cards.iter().enumerate() {
            let wave = i as u32 + 1;
            let label = WaveConfig::difficulty_label(wave);
            let tint = colors::difficulty(label);
            let highlighted = i == self.selected;

            canvas.fill_rect(*card, colors::faded(tint, if highlighted { 0.9 } else { 0.6 }));
            canvas.stroke_rect(
                *card,
                if highlighted { colors::HIGHLIGHT } else { colors::GRAY },
                if highlighted { 3.0 } else { 1.0 },
            );
            let cx = card.center().x;
            canvas.text(
                &format!("Wave {wave}"),
                Vec2::new(cx, card.min.y + 40.0),
                30.0,
                colors::WHITE,
                TextAlign::Center,
            );
            canvas.text(
                &format!("{} enemies", WaveConfig::for_level(wave).enemies_total),
                Vec2::new(cx, card.min.y + 75.0),
                18.0,
                colors::WHITE,
                TextAlign::Center,
            );
            canvas.text(
                label,
                Vec2::new(cx, card.max().y - 15.0),
                20.0,
                colors::WHITE,
                TextAlign::Center,
            );
        }

        self.back.draw(canvas, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::scene::SceneManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    fn in_wave_select() -> (SceneContext, SceneManager) {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 5);
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::WaveSelect).unwrap();
        manager.update(&mut ctx, 0.016);
        manager.update(&mut ctx, 0.5);
        (ctx, manager)
    }

    #[test]
    fn test_grid_layout() {
        let scene = WaveSelectScene::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
        assert_eq!(scene.cards.len(), 20);
        // Wave 6 starts the second row
        assert_eq!(scene.cards[5].min.x, scene.cards[0].min.x);
        assert!(scene.cards[5].min.y > scene.cards[0].max().y);
        assert!(scene.cards[19].max().y < scene.back.rect.min.y);
    }

    #[test]
    fn test_keyboard_pick() {
        let (mut ctx, mut manager) = in_wave_select();
        let down = InputState::default().with_action(Action::NavigateDown);
        manager.handle_input(&mut ctx, &down);
        let right = InputState::default().with_action(Action::NavigateRight);
        manager.handle_input(&mut ctx, &right);
        assert_eq!(manager.scenes.wave_select.selected, 6);

        let confirm = InputState::default().with_action(Action::Confirm);
        manager.handle_input(&mut ctx, &confirm);
        assert_eq!(ctx.pending(), Some(SceneId::Wave(7)));
    }

    #[test]
    fn test_click_card_and_back() {
        let (mut ctx, mut manager) = in_wave_select();
        let card = manager.scenes.wave_select.cards[19].center();
        manager.handle_input(&mut ctx, &InputState::default().with_click(card));
        assert_eq!(ctx.pending(), Some(SceneId::Wave(20)));

        let esc = InputState::default().with_action(Action::Cancel);
        manager.handle_input(&mut ctx, &esc);
        assert_eq!(ctx.pending(), Some(SceneId::Menu));
    }

    #[test]
    fn test_cards_show_counts_and_bands() {
        let (ctx, manager) = in_wave_select();
        let mut canvas = DrawList::new(1280.0, 720.0);
        manager.draw(&ctx, &mut canvas);
        assert!(canvas.has_text("Wave 20"));
        assert!(canvas.has_text("180 enemies"));
        assert!(canvas.has_text("Extreme"));
        assert!(canvas.has_text("Easy"));
    }
}
