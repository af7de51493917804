//! Settings screen: volumes, debug overlays, progress reset

use glam::Vec2;

use super::{InputDelay, MENU_INPUT_DELAY, Scene, SceneContext, SceneId};
use crate::audio::SoundEffect;
use crate::input::{Action, InputState};
use crate::renderer::{Canvas, TextAlign, colors};
use crate::sim::Rect;
use crate::ui::{Button, Slider};

/// Keyboard nudge per arrow press
const VOLUME_STEP: f32 = 0.1;

/// Rows in cursor order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Music,
    Sfx,
    Fps,
    Hitboxes,
    ResetProgress,
    Back,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 6] = [
        SettingsRow::Music,
        SettingsRow::Sfx,
        SettingsRow::Fps,
        SettingsRow::Hitboxes,
        SettingsRow::ResetProgress,
        SettingsRow::Back,
    ];
}

pub struct SettingsScene {
    field: Rect,
    pub music: Slider,
    pub sfx: Slider,
    pub fps_toggle: Button,
    pub hitbox_toggle: Button,
    pub reset: Button,
    pub back: Button,
    pub selected: usize,
    delay: InputDelay,
}

impl SettingsScene {
    pub fn new(field: Rect) -> Self {
        let cx = field.center().x;
        let slider = |y: f32| Rect::new(cx - 200.0, y, 400.0, 12.0);
        let button = |y: f32| Rect::new(cx - 150.0, y, 300.0, 55.0);
        Self {
            field,
            music: Slider::new(slider(200.0), "Music", 0.7),
            sfx: Slider::new(slider(280.0), "Sound effects", 0.8),
            fps_toggle: Button::new(button(340.0), "FPS: OFF"),
            hitbox_toggle: Button::new(button(410.0), "Hitboxes: OFF"),
            reset: Button::new(button(480.0), "Reset progress"),
            back: Button::new(button(600.0), "Back"),
            selected: 0,
            delay: InputDelay::default(),
        }
    }

    fn row(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected]
    }

    fn sync_labels(&mut self, ctx: &SceneContext) {
        let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
        self.fps_toggle.label = format!("FPS: {}", on_off(ctx.settings.show_fps));
        self.hitbox_toggle.label = format!("Hitboxes: {}", on_off(ctx.settings.show_hitboxes));
    }

    /// Copy slider values into settings and audio
    fn apply_volumes(&self, ctx: &mut SceneContext) {
        ctx.settings.set_music_volume(self.music.value);
        ctx.settings.set_sfx_volume(self.sfx.value);
        ctx.apply_volumes();
    }

    fn activate(&mut self, ctx: &mut SceneContext, row: SettingsRow) {
        match row {
            SettingsRow::Music | SettingsRow::Sfx => {}
            SettingsRow::Fps => ctx.settings.show_fps = !ctx.settings.show_fps,
            SettingsRow::Hitboxes => ctx.settings.show_hitboxes = !ctx.settings.show_hitboxes,
            SettingsRow::ResetProgress => {
                log::info!("progress reset");
                ctx.economy.reset();
            }
            SettingsRow::Back => {
                ctx.save_settings();
                let _ = ctx.request(SceneId::Menu);
            }
        }
        ctx.audio.play(SoundEffect::MenuSelect);
    }
}

impl Scene for SettingsScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.delay.arm(MENU_INPUT_DELAY);
        self.selected = 0;
        self.music.value = ctx.settings.music_volume;
        self.sfx.value = ctx.settings.sfx_volume;
        self.sync_labels(ctx);
    }

    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if !self.delay.ready() {
            return;
        }

        if input.any_pressed(&[Action::Cancel, Action::Menu]) {
            self.activate(ctx, SettingsRow::Back);
            return;
        }

        let count = SettingsRow::ALL.len();
        if input.just_pressed(Action::NavigateUp) {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.just_pressed(Action::NavigateDown) {
            self.selected = (self.selected + 1) % count;
        }

        let nudge = if input.just_pressed(Action::NavigateRight) {
            VOLUME_STEP
        } else if input.just_pressed(Action::NavigateLeft) {
            -VOLUME_STEP
        } else {
            0.0
        };
        let mut volume_changed = false;
        if nudge != 0.0 {
            match self.row() {
                SettingsRow::Music => self.music.step(nudge),
                SettingsRow::Sfx => self.sfx.step(nudge),
                _ => {}
            }
            volume_changed = true;
        }
        volume_changed |= self.music.handle_click(input);
        volume_changed |= self.sfx.handle_click(input);
        if volume_changed {
            self.apply_volumes(ctx);
        }

        let clicked = [
            (&self.fps_toggle, SettingsRow::Fps),
            (&self.hitbox_toggle, SettingsRow::Hitboxes),
            (&self.reset, SettingsRow::ResetProgress),
            (&self.back, SettingsRow::Back),
        ]
        .into_iter()
        .find(|(button, _)| button.clicked(input))
        .map(|(_, row)| row);

        if let Some(row) = clicked {
            self.activate(ctx, row);
        } else if input.just_pressed(Action::Confirm) {
            self.activate(ctx, self.row());
        }
        self.sync_labels(ctx);
    }

    fn update(&mut self, _ctx: &mut SceneContext, dt: f32) {
        self.delay.update(dt);
    }

    fn draw(&self, _ctx: &SceneContext, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BACKGROUND);
        canvas.text(
            "SETTINGS",
            Vec2::new(self.field.center().x, 110.0),
            60.0,
            colors::WHITE,
            TextAlign::Center,
        );

        let row = self.row();
        self.music.draw(canvas, row == SettingsRow::Music);
        self.sfx.draw(canvas, row == SettingsRow::Sfx);
        self.fps_toggle.draw(canvas, row == SettingsRow::Fps);
        self.hitbox_toggle.draw(canvas, row == SettingsRow::Hitboxes);
        self.reset.draw(canvas, row == SettingsRow::ResetProgress);
        self.back.draw(canvas, row == SettingsRow::Back);

        canvas.text(
            "F3: FPS  |  F4: Hitboxes",
            Vec2::new(self.field.center().x, self.field.max().y - 30.0),
            20.0,
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

    fn in_settings() -> (SceneContext, SceneManager) {
        let mut ctx = SceneContext::new(Settings::default(), Tuning::default(), 5);
        let mut manager = SceneManager::new(&mut ctx);
        ctx.request(SceneId::Settings).unwrap();
        manager.update(&mut ctx, 0.016);
        manager.update(&mut ctx, 0.5);
        (ctx, manager)
    }

    fn press(action: Action) -> InputState {
        InputState::default().with_action(action)
    }

    #[test]
    fn test_slider_updates_audio() {
        let (mut ctx, mut manager) = in_settings();
        manager.handle_input(&mut ctx, &press(Action::NavigateLeft));
        assert!((ctx.settings.music_volume - 0.6).abs() < 1e-5);
        assert!((ctx.audio.music_volume() - 0.6).abs() < 1e-5);

        let sfx_end = manager.scenes.settings.sfx.rect.max() - Vec2::new(0.0, 6.0);
        manager.handle_input(&mut ctx, &InputState::default().with_click(sfx_end));
        assert_eq!(ctx.settings.sfx_volume, 1.0);
        assert_eq!(ctx.audio.sfx_volume(), 1.0);
    }

    #[test]
    fn test_toggles_and_reset() {
        let (mut ctx, mut manager) = in_settings();
        ctx.economy.seeds = 40;
        ctx.economy.damage_level = 3;

        let fps = manager.scenes.settings.fps_toggle.rect.center();
        manager.handle_input(&mut ctx, &InputState::default().with_click(fps));
        assert!(ctx.settings.show_fps);
        assert_eq!(manager.scenes.settings.fps_toggle.label, "FPS: ON");

        let reset = manager.scenes.settings.reset.rect.center();
        manager.handle_input(&mut ctx, &InputState::default().with_click(reset));
        assert_eq!(ctx.economy, crate::economy::Economy::new());
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let (mut ctx, mut manager) = in_settings();
        manager.handle_input(&mut ctx, &press(Action::Cancel));
        assert_eq!(ctx.pending(), Some(SceneId::Menu));
    }
}
