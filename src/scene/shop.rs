//! Upgrade shop: a standalone scene between waves and a panel reused by the
//! in-wave overlay

use glam::Vec2;

use super::{InputDelay, MENU_INPUT_DELAY, Scene, SceneContext, SceneId};
use crate::audio::SoundEffect;
use crate::consts::MAX_WAVE;
use crate::economy::{Economy, MAX_UPGRADE_LEVEL, UpgradeKind};
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::Rect;

const ROW_WIDTH: f32 = 700.0;
const ROW_HEIGHT: f32 = 90.0;
const ROW_SPACING: f32 = 15.0;

/// Upgrade list with a cursor
#[derive(Debug, Clone)]
pub struct ShopPanel {
    pub rows: Vec<(UpgradeKind, Rect)>,
    pub selected: usize,
}

impl ShopPanel {
    pub fn new(center_x: f32, top: f32) -> Self {
        let rows = UpgradeKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let y = top + i as f32 * (ROW_HEIGHT + ROW_SPACING);
                (*kind, Rect::new(center_x - ROW_WIDTH * 0.5, y, ROW_WIDTH, ROW_HEIGHT))
            })
            .collect();
        Self { rows, selected: 0 }
    }

    /// Navigate; returns the upgrade to buy on confirm or row click
    pub fn handle_input(&mut self, input: &InputState) -> Option<UpgradeKind> {
        let count = self.rows.len();
        if input.just_pressed(Action::NavigateUp) {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.just_pressed(Action::NavigateDown) {
            self.selected = (self.selected + 1) % count;
        }
        if input.clicked {
            if let Some(i) = self.rows.iter().position(|(_, r)| r.contains(input.pointer)) {
                self.selected = i;
                return Some(self.rows[i].0);
            }
        }
        if input.just_pressed(Action::Confirm) {
            return Some(self.rows[self.selected].0);
        }
        None
    }

    /// Rows with level pips and price; `available` decides the price color
    pub fn draw(&self, canvas: &mut dyn Canvas, economy: &Economy, available: u32) {
        for (i, (kind, rect)) in self.rows.iter().enumerate() {
            let highlighted = i == self.selected;
            canvas.fill_rect(*rect, if highlighted { [0.3, 0.3, 0.35, 0.95] } else { [0.2, 0.2, 0.22, 0.9] });
            if highlighted {
                canvas.stroke_rect(*rect, colors::HIGHLIGHT, 2.0);
            }

            let left = rect.min.x + 20.0;
            canvas.text(kind.name(), Vec2::new(left, rect.min.y + 32.0), 28.0, colors::WHITE, TextAlign::Left);
            canvas.text(
                kind.description(),
                Vec2::new(left, rect.min.y + 58.0),
                18.0,
                colors::GRAY,
                TextAlign::Left,
            );

            let level = economy.level(*kind);
            for pip in 0..MAX_UPGRADE_LEVEL {
                let pip_rect = Rect::new(left + pip as f32 * 26.0, rect.min.y + 68.0, 20.0, 10.0);
                let fill = if pip < level { colors::GREEN } else { colors::DARK_GRAY };
                canvas.fill_rect(pip_rect, fill);
            }

            let price_pos = Vec2::new(rect.max().x - 20.0, rect.min.y + 52.0);
            match economy.next_cost(*kind) {
                None => canvas.text("MAX", price_pos, 28.0, colors::YELLOW, TextAlign::Right),
                Some(cost) => {
                    let color = if cost <= available { colors::GREEN } else { colors::RED };
                    canvas.text(&format!("{cost} seeds"), price_pos, 26.0, color, TextAlign::Right);
                }
            }
        }
    }
}

/// Between-wave shop spending the banked seeds
pub struct ShopScene {
    field: Rect,
    pub panel: ShopPanel,
    delay: InputDelay,
}

impl ShopScene {
    pub fn new(field: Rect) -> Self {
        Self {
            field,
            panel: ShopPanel::new(field.center().x, 170.0),
            delay: InputDelay::default(),
        }
    }

    fn buy(&self, ctx: &mut SceneContext, kind: UpgradeKind) {
        let outcome = ctx.economy.purchase(kind, ctx.economy.seeds);
        if outcome.success {
            ctx.economy.withdraw(outcome.seeds_spent);
            ctx.audio.play(SoundEffect::Purchase);
        }
    }
}

impl Scene for ShopScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.delay.arm(MENU_INPUT_DELAY);
        self.panel.selected = 0;
        log::debug!("shop open, next wave {}", ctx.next_wave);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }

        if input.just_pressed(Action::Menu) {
            let _ = ctx.request(SceneId::Menu);
            return;
        }
        if input.any_pressed(&[Action::Continue, Action::Cancel]) {
            let next = if ctx.next_wave <= MAX_WAVE {
                SceneId::Wave(ctx.next_wave)
            } else {
                SceneId::Menu
            };
            let _ = ctx.request(next);
            return;
        }

        if let Some(kind) = self.panel.handle_input(input) {
            self.buy(ctx, kind);
        }
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.delay.update(dt);
    }

    fn draw(&self, ctx: &SceneContext, canvas: &mut dyn Canvas) {
        let cx = self.field.center().x;
        canvas.clear(colors::BACKGROUND);
        canvas.text("SHOP", Vec2::new(cx, 80.0), 64.0, colors::HIGHLIGHT, TextAlign::Center);
        canvas.text(
            &format!("Seeds: {}", ctx.economy.seeds),
            Vec2::new(cx, 135.0),
            32.0,
            colors::SEED,
            TextAlign::Center,
        );

        self.panel.draw(canvas, &ctx.economy, ctx.economy.seeds);

        let bottom = self.field.max().y;
        canvas.text(
            "UP/DOWN: Navigate  |  SPACE: Buy  |  C/ESC: Continue  |  M: Menu",
            Vec2::new(cx, bottom - 70.0),
            22.0,
            colors::GRAY,
            TextAlign::Center,
        );
        let next = if ctx.next_wave <= MAX_WAVE {
            format!("Next wave: {}", ctx.next_wave)
        } else {
            "All waves cleared!".to_string()
        };
        canvas.text(&next, Vec2::new(cx, bottom - 35.0), 20.0, colors::GREEN, TextAlign::Center);
    }
}
