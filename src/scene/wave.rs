//! Combat scene
//!
//! Owns the `WaveState` for one wave. Tab opens an upgrade overlay that
//! pauses the simulation; purchases there spend the seeds collected this
//! wave before the banked ones.

use glam::Vec2;

use super::{Scene, SceneContext, SceneId, ShopPanel};
use crate::audio::SoundEffect;
use crate::economy::{UpgradeKind, split_cost};
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors, shapes};
use crate::sim::{Rect, TickInput, WaveOutcome, WavePhase, WaveState, tick};

const GRID_SIZE: f32 = 50.0;
const FIELD_COLOR: [f32; 4] = [0.67, 0.78, 0.71, 1.0];
const GRID_COLOR: [f32; 4] = [0.71, 0.82, 0.75, 1.0];

pub struct WaveScene {
    field: Rect,
    state: Option<WaveState>,
    /// Last pointer position; the player's steering target
    pointer: Vec2,
    pub shop_open: bool,
    pub shop: ShopPanel,
    /// Smoothed frame rate for the FPS overlay
    fps: f32,
}

impl WaveScene {
    pub fn new(field: Rect) -> Self {
        Self {
            field,
            state: None,
            pointer: field.center(),
            shop_open: false,
            shop: ShopPanel::new(field.center().x, 200.0),
            fps: 0.0,
        }
    }

    /// Live wave, if this scene is active
    pub fn state(&self) -> Option<&WaveState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut WaveState> {
        self.state.as_mut()
    }

    /// Buy from the overlay: wave-local seeds first, then the bank
    fn buy(state: &mut WaveState, ctx: &mut SceneContext, kind: UpgradeKind) {
        let local = state.seeds_collected;
        let outcome = ctx.economy.purchase(kind, local.saturating_add(ctx.economy.seeds));
        if !outcome.success {
            return;
        }
        let (from_local, from_bank) = split_cost(outcome.seeds_spent, local);
        state.seeds_collected -= from_local;
        ctx.economy.withdraw(from_bank);
        state.rederive_player(&ctx.economy);
        ctx.audio.play(SoundEffect::Purchase);
    }

    fn draw_hud(&self, ctx: &SceneContext, state: &WaveState, canvas: &mut dyn Canvas) {
        let right = self.field.max().x - 20.0;

        canvas.text(
            &format!("Score: {}", state.score),
            Vec2::new(20.0, 40.0),
            32.0,
            colors::WHITE,
            TextAlign::Left,
        );
        canvas.text(
            &format!("Wave {}", state.wave_number()),
            Vec2::new(20.0, 75.0),
            26.0,
            colors::HIGHLIGHT,
            TextAlign::Left,
        );

        let fraction = state.player.health_fraction();
        shapes::health_bar(
            canvas,
            Rect::new(20.0, 90.0, 200.0, 20.0),
            fraction,
            shapes::health_color(fraction),
        );
        canvas.text(
            &format!("{}/{}", state.player.health, state.player.max_health),
            Vec2::new(230.0, 106.0),
            18.0,
            colors::WHITE,
            TextAlign::Left,
        );

        canvas.text(
            &format!(
                "Enemies: {} | Killed: {}/{}",
                state.alive_enemy_count(),
                state.enemies_killed,
                state.config.enemies_total
            ),
            Vec2::new(right, 35.0),
            22.0,
            colors::WHITE,
            TextAlign::Right,
        );
        canvas.text(
            &format!("Seeds: {} (+{} banked)", state.seeds_collected, ctx.economy.seeds),
            Vec2::new(right, 62.0),
            22.0,
            colors::SEED,
            TextAlign::Right,
        );
        if ctx.settings.show_fps {
            canvas.text(
                &format!("FPS: {:.0}", self.fps),
                Vec2::new(right, 89.0),
                20.0,
                colors::GREEN,
                TextAlign::Right,
            );
        }

        canvas.text(
            "Mouse: move | Fire: automatic | TAB: shop | ESC: menu",
            Vec2::new(self.field.center().x, self.field.max().y - 15.0),
            18.0,
            colors::DARK_GRAY,
            TextAlign::Center,
        );
    }

    fn draw_intro(&self, state: &WaveState, canvas: &mut dyn Canvas) {
        let center = self.field.center();
        canvas.fill_rect(self.field, [0.0, 0.0, 0.0, 0.78]);
        canvas.text(
            &format!("WAVE {}", state.wave_number()),
            center - Vec2::new(0.0, 40.0),
            72.0,
            [1.0, 0.78, 0.4, 1.0],
            TextAlign::Center,
        );
        let message = if state.wave_number() == 1 {
            "Move with the mouse, shooting is automatic!".to_string()
        } else {
            format!("{} enemies to defeat - good luck!", state.config.enemies_total)
        };
        canvas.text(
            &message,
            center + Vec2::new(0.0, 40.0),
            32.0,
            [0.8, 0.8, 0.8, 1.0],
            TextAlign::Center,
        );
    }

    fn draw_shop_overlay(&self, ctx: &SceneContext, state: &WaveState, canvas: &mut dyn Canvas) {
        let cx = self.field.center().x;
        canvas.fill_rect(self.field, colors::PANEL);
        canvas.text("UPGRADES (paused)", Vec2::new(cx, 110.0), 48.0, colors::HIGHLIGHT, TextAlign::Center);
        canvas.text(
            &format!(
                "Seeds: {} this wave + {} banked",
                state.seeds_collected, ctx.economy.seeds
            ),
            Vec2::new(cx, 160.0),
            26.0,
            colors::SEED,
            TextAlign::Center,
        );
        self.shop
            .draw(canvas, &ctx.economy, state.seeds_collected.saturating_add(ctx.economy.seeds));
        canvas.text(
            "SPACE: Buy  |  TAB/ESC: Resume",
            Vec2::new(cx, self.field.max().y - 60.0),
            22.0,
            colors::GRAY,
            TextAlign::Center,
        );
    }
}

impl Scene for WaveScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        let level = match ctx.current {
            SceneId::Wave(n) => n,
            _ => 1,
        };
        let seed = ctx.wave_seed();
        self.state = Some(WaveState::new(level, &ctx.economy, &ctx.tuning, ctx.field, seed));
        self.pointer = self.field.center();
        self.shop_open = false;
        self.shop.selected = 0;
        log::info!("wave {level} starting (seed {seed:#x})");
    }

    fn exit(&mut self, ctx: &mut SceneContext) {
        self.shop_open = false;
        let Some(state) = self.state.take() else {
            return;
        };
        // Seeds are banked only for a cleared wave
        if let Some(WaveOutcome::Victory(_)) = state.outcome {
            ctx.economy.deposit(state.seeds_collected);
        } else if state.seeds_collected > 0 {
            log::debug!("{} uncollected-wave seeds lost", state.seeds_collected);
        }
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        self.pointer = input.pointer;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase == WavePhase::Completing {
            return;
        }

        if input.just_pressed(Action::ToggleShop) {
            self.shop_open = !self.shop_open;
            return;
        }

        if self.shop_open {
            if input.just_pressed(Action::Cancel) {
                self.shop_open = false;
            } else if let Some(kind) = self.shop.handle_input(input) {
                Self::buy(state, ctx, kind);
            }
            return;
        }

        if input.any_pressed(&[Action::Cancel, Action::Menu]) {
            let _ = ctx.request(SceneId::Menu);
        }
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps == 0.0 { instant } else { self.fps * 0.9 + instant * 0.1 };
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };
        // The overlay freezes every simulation timer
        if self.shop_open {
            return;
        }

        let input = TickInput {
            pointer: self.pointer,
        };
        let outcome = tick(state, &input, dt);
        let events = state.drain_events();
        ctx.audio.play_events(&events);

        if let Some(outcome) = outcome {
            ctx.last_stats = Some(outcome.stats());
            let next = match outcome {
                WaveOutcome::Victory(stats) => {
                    ctx.next_wave = stats.wave_number + 1;
                    SceneId::Victory
                }
                WaveOutcome::Defeat(_) => SceneId::GameOver,
            };
            let _ = ctx.request(next);
        }
    }

    fn draw(&self, ctx: &SceneContext, canvas: &mut dyn Canvas) {
        canvas.clear(FIELD_COLOR);
        let max = self.field.max();
        let mut x = self.field.min.x;
        while x < max.x {
            canvas.line(Vec2::new(x, self.field.min.y), Vec2::new(x, max.y), GRID_COLOR, 1.0);
            x += GRID_SIZE;
        }
        let mut y = self.field.min.y;
        while y < max.y {
            canvas.line(Vec2::new(self.field.min.x, y), Vec2::new(max.x, y), GRID_COLOR, 1.0);
            y += GRID_SIZE;
        }

        let Some(state) = &self.state else {
            return;
        };
        shapes::wave(canvas, state, ctx.settings.show_hitboxes);
        self.draw_hud(ctx, state, canvas);

        if matches!(state.phase, WavePhase::Intro { .. }) {
            self.draw_intro(state, canvas);
        }
        if self.shop_open {
            self.draw_shop_overlay(ctx, state, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::scene::SceneManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    fn in_wave(level: u32) -> (SceneContext, SceneManager) {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 99);
        ctx.current = SceneId::WaveSelect;
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::Wave(level)).unwrap();
        manager.update(&mut ctx, 0.0);
        (ctx, manager)
    }

    fn press(action: Action) -> InputState {
        InputState::new(Vec2::new(640.0, 360.0)).with_action(action)
    }

    #[test]
    fn test_enter_builds_requested_wave() {
        let (ctx, manager) = in_wave(4);
        let state = manager.scenes.wave.state().unwrap();
        assert_eq!(state.wave_number(), 4);
        assert_eq!(state.config.enemies_total, 36);
        assert!(matches!(state.phase, WavePhase::Intro { .. }));
        assert_eq!(state.player.body.pos, ctx.field.center());
    }

    #[test]
    fn test_upgrades_apply_at_wave_start() {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 99);
        ctx.economy.health_level = 3;
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::Wave(1)).unwrap();
        manager.update(&mut ctx, 0.0);
        assert_eq!(manager.scenes.wave.state().unwrap().player.max_health, 160);
    }

    #[test]
    fn test_overlay_pauses_simulation() {
        let (mut ctx, mut manager) = in_wave(1);
        manager.handle_input(&mut ctx, &press(Action::ToggleShop));
        assert!(manager.scenes.wave.shop_open);

        let before = manager.scenes.wave.state().unwrap().phase;
        for _ in 0..300 {
            manager.update(&mut ctx, 0.1);
        }
        let state = manager.scenes.wave.state().unwrap();
        assert_eq!(state.phase, before);
        assert_eq!(state.elapsed, 0.0);

        manager.handle_input(&mut ctx, &press(Action::ToggleShop));
        assert!(!manager.scenes.wave.shop_open);
        manager.update(&mut ctx, 3.0);
        assert_eq!(manager.scenes.wave.state().unwrap().phase, WavePhase::Active);
    }

    #[test]
    fn test_overlay_spends_wave_seeds_first() {
        let (mut ctx, mut manager) = in_wave(2);
        ctx.economy.seeds = 10;
        {
            let state = manager.scenes.wave.state_mut().unwrap();
            state.seeds_collected = 3;
            state.player.health = 50;
        }

        manager.handle_input(&mut ctx, &press(Action::ToggleShop));
        manager.handle_input(&mut ctx, &press(Action::Confirm));

        let state = manager.scenes.wave.state().unwrap();
        assert_eq!(ctx.economy.health_level, 1);
        assert_eq!(state.seeds_collected, 0);
        assert_eq!(ctx.economy.seeds, 8);
        assert_eq!(state.player.max_health, 120);
        assert_eq!(state.player.health, 60);
    }

    #[test]
    fn test_overlay_purchase_needs_combined_funds() {
        let (mut ctx, mut manager) = in_wave(2);
        ctx.economy.seeds = 2;
        manager.scenes.wave.state_mut().unwrap().seeds_collected = 2;

        manager.handle_input(&mut ctx, &press(Action::ToggleShop));
        manager.handle_input(&mut ctx, &press(Action::Confirm));
        assert_eq!(ctx.economy.health_level, 0);
        assert_eq!(ctx.economy.seeds, 2);
        assert_eq!(manager.scenes.wave.state().unwrap().seeds_collected, 2);
    }

    #[test]
    fn test_overlay_purchase_with_full_bank() {
        let (mut ctx, mut manager) = in_wave(2);
        ctx.economy.seeds = u32::MAX;
        manager.scenes.wave.state_mut().unwrap().seeds_collected = 3;

        manager.handle_input(&mut ctx, &press(Action::ToggleShop));
        manager.handle_input(&mut ctx, &press(Action::Confirm));
        assert_eq!(ctx.economy.health_level, 1);
        assert_eq!(manager.scenes.wave.state().unwrap().seeds_collected, 0);
        assert_eq!(ctx.economy.seeds, u32::MAX - 2);

        let mut canvas = DrawList::new(1280.0, 720.0);
        manager.draw(&ctx, &mut canvas);
        assert!(canvas.has_text("UPGRADES"));
    }

    #[test]
    fn test_events_reach_audio() {
        let (mut ctx, mut manager) = in_wave(1);
        manager.scenes.wave.state_mut().unwrap().phase = WavePhase::Active;
        for _ in 0..30 {
            manager.handle_input(&mut ctx, &InputState::new(Vec2::new(640.0, 360.0)));
            manager.update(&mut ctx, 1.0 / 60.0);
        }
        assert!(ctx.audio.play_count > 0);
        assert!(manager.scenes.wave.state().unwrap().events.is_empty());
    }

    #[test]
    fn test_death_requests_game_over() {
        let (mut ctx, mut manager) = in_wave(5);
        {
            let state = manager.scenes.wave.state_mut().unwrap();
            state.phase = WavePhase::Active;
            state.player.health = 0;
            state.player.body.alive = false;
        }
        manager.update(&mut ctx, 0.016);
        assert_eq!(ctx.pending(), Some(SceneId::GameOver));
        assert_eq!(ctx.last_stats.map(|s| s.wave_number), Some(5));

        manager.update(&mut ctx, 0.016);
        assert_eq!(ctx.current, SceneId::GameOver);
    }

    #[test]
    fn test_intro_overlay_text() {
        let (ctx, manager) = in_wave(3);
        let mut canvas = DrawList::new(1280.0, 720.0);
        manager.draw(&ctx, &mut canvas);
        assert!(canvas.has_text("WAVE 3"));
        assert!(canvas.has_text("27 enemies to defeat"));
        assert!(canvas.has_text("Score: 0"));
    }
}
