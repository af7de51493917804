//! Scene state machine
//!
//! Every scene is constructed up front and owned by `Scenes`. Cross-scene
//! data (the economy, settings, the stats of the last wave) lives in a
//! `SceneContext` handed to each scene call. Transitions are requested
//! through the context, validated immediately, and applied at the start of
//! the next update: the outgoing scene's `exit` runs before the incoming
//! scene's `enter`.

pub mod game_over;
pub mod menu;
pub mod settings;
pub mod shop;
pub mod victory;
pub mod wave;
pub mod wave_select;

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::audio::AudioManager;
use crate::consts::MAX_WAVE;
use crate::economy::Economy;
use crate::input::{Action, InputState};
use crate::renderer::Canvas;
use crate::settings::Settings;
use crate::sim::{Rect, WaveStats};
use crate::tuning::Tuning;

pub use game_over::GameOverScene;
pub use menu::MenuScene;
pub use settings::SettingsScene;
pub use shop::{ShopPanel, ShopScene};
pub use victory::VictoryScene;
pub use wave::WaveScene;
pub use wave_select::WaveSelectScene;

/// Scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Menu,
    WaveSelect,
    /// Combat scene for wave N (1..=20)
    Wave(u32),
    Shop,
    Victory,
    GameOver,
    Settings,
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneId::Menu => write!(f, "menu"),
            SceneId::WaveSelect => write!(f, "wave-select"),
            SceneId::Wave(n) => write!(f, "wave-{n}"),
            SceneId::Shop => write!(f, "shop"),
            SceneId::Victory => write!(f, "victory"),
            SceneId::GameOver => write!(f, "game-over"),
            SceneId::Settings => write!(f, "settings"),
        }
    }
}

impl SceneId {
    /// Parse a scene name such as `menu` or `wave-7` (`wave7` also accepted)
    pub fn parse(name: &str) -> Result<Self, SceneError> {
        let id = match name {
            "menu" => SceneId::Menu,
            "wave-select" | "wave_selection" => SceneId::WaveSelect,
            "shop" => SceneId::Shop,
            "victory" => SceneId::Victory,
            "game-over" | "gameover" => SceneId::GameOver,
            "settings" => SceneId::Settings,
            other => {
                let number = other
                    .strip_prefix("wave-")
                    .or_else(|| other.strip_prefix("wave"))
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| SceneError::UnknownScene(other.to_string()))?;
                SceneId::Wave(number)
            }
        };
        Ok(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unknown scene '{0}'")]
    UnknownScene(String),
    #[error("wave {0} does not exist (1..={max})", max = MAX_WAVE)]
    InvalidWave(u32),
    #[error("no transition from {from} to {to}")]
    IllegalTransition { from: SceneId, to: SceneId },
}

/// Check a transition against the scene graph
pub fn validate_transition(from: SceneId, to: SceneId) -> Result<(), SceneError> {
    use SceneId::*;

    if let Wave(n) = to {
        if !(1..=MAX_WAVE).contains(&n) {
            return Err(SceneError::InvalidWave(n));
        }
    }

    let legal = match (from, to) {
        (Menu, WaveSelect | Settings | Shop | Wave(1)) => true,
        (WaveSelect, Wave(_) | Menu) => true,
        (Wave(_), Victory | GameOver | Menu) => true,
        (Victory, Shop | WaveSelect | Menu) => true,
        (Shop, Wave(_) | Menu) => true,
        (GameOver, Wave(_) | WaveSelect | Menu) => true,
        (Settings, Menu) => true,
        _ => false,
    };

    if legal {
        Ok(())
    } else {
        Err(SceneError::IllegalTransition { from, to })
    }
}

/// Seconds an input-delayed scene ignores keys after entering
#[derive(Debug, Clone, Copy, Default)]
pub struct InputDelay {
    remaining: f32,
}

impl InputDelay {
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Delay after entering the menu or shop
pub const MENU_INPUT_DELAY: f32 = 0.3;
/// Delay after entering the victory or game-over screen
pub const RESULT_INPUT_DELAY: f32 = 0.5;

/// `mm:ss`
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// State shared by every scene
pub struct SceneContext {
    /// Persistent run progression (the only instance)
    pub economy: Economy,
    pub settings: Settings,
    pub tuning: Tuning,
    pub audio: AudioManager,
    /// Play field in screen pixels
    pub field: Rect,
    /// Run RNG; each wave draws its own seed from it
    pub rng: Pcg32,
    /// Stats of the most recent wave, for the result screens
    pub last_stats: Option<WaveStats>,
    /// Wave the shop continues to
    pub next_wave: u32,
    /// Scene currently active
    pub current: SceneId,
    /// Where native builds persist settings; `None` keeps them in memory
    #[cfg(not(target_arch = "wasm32"))]
    pub settings_path: Option<std::path::PathBuf>,
    pending: Option<SceneId>,
    quit: bool,
}

impl SceneContext {
    pub fn new(settings: Settings, tuning: Tuning, seed: u64) -> Self {
        let field = Rect::new(
            0.0,
            0.0,
            settings.window_width as f32,
            settings.window_height as f32,
        );
        let mut audio = AudioManager::new();
        audio.set_music_volume(settings.music_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        Self {
            economy: Economy::new(),
            settings,
            tuning,
            audio,
            field,
            rng: Pcg32::seed_from_u64(seed),
            last_stats: None,
            next_wave: 1,
            current: SceneId::Menu,
            #[cfg(not(target_arch = "wasm32"))]
            settings_path: None,
            pending: None,
            quit: false,
        }
    }

    /// Request a transition, applied at the start of the next update.
    /// Illegal requests are logged and leave the current scene in place.
    pub fn request(&mut self, to: SceneId) -> Result<(), SceneError> {
        match self.check_request(to) {
            Ok(()) => {
                log::debug!("transition requested: {} -> {}", self.current, to);
                self.pending = Some(to);
                Ok(())
            }
            Err(e) => {
                log::warn!("transition rejected: {e}");
                Err(e)
            }
        }
    }

    /// Graph check, plus the wave the shop and the retry screen may enter
    fn check_request(&self, to: SceneId) -> Result<(), SceneError> {
        validate_transition(self.current, to)?;
        let allowed = match (self.current, to) {
            (SceneId::Shop, SceneId::Wave(n)) => n == self.next_wave,
            (SceneId::GameOver, SceneId::Wave(n)) => {
                self.last_stats.is_some_and(|stats| stats.wave_number == n)
            }
            _ => true,
        };
        if allowed {
            Ok(())
        } else {
            Err(SceneError::IllegalTransition {
                from: self.current,
                to,
            })
        }
    }

    /// Request a transition by scene name
    pub fn request_named(&mut self, name: &str) -> Result<(), SceneError> {
        match SceneId::parse(name) {
            Ok(id) => self.request(id),
            Err(e) => {
                log::warn!("transition rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn pending(&self) -> Option<SceneId> {
        self.pending
    }

    fn take_pending(&mut self) -> Option<SceneId> {
        self.pending.take()
    }

    pub fn request_quit(&mut self) {
        log::info!("quit requested");
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Fresh seed for a wave
    pub fn wave_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Persist settings; failures are logged, never fatal
    pub fn save_settings(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        let result = match &self.settings_path {
            Some(path) => self.settings.save_to(path),
            None => Ok(()),
        };
        #[cfg(target_arch = "wasm32")]
        let result = self.settings.save();

        if let Err(e) = result {
            log::warn!("Could not save settings: {e}");
        }
    }

    /// Push the settings volumes into the audio manager
    pub fn apply_volumes(&mut self) {
        self.audio.set_music_volume(self.settings.music_volume);
        self.audio.set_sfx_volume(self.settings.sfx_volume);
    }
}

/// A discrete screen of the game
pub trait Scene {
    fn enter(&mut self, _ctx: &mut SceneContext) {}
    fn exit(&mut self, _ctx: &mut SceneContext) {}
    /// Keys and clicks for this frame; runs before `update`
    fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState);
    fn update(&mut self, ctx: &mut SceneContext, dt: f32);
    fn draw(&self, ctx: &SceneContext, canvas: &mut dyn Canvas);
}

/// Every scene, built once
pub struct Scenes {
    pub menu: MenuScene,
    pub wave_select: WaveSelectScene,
    pub wave: WaveScene,
    pub shop: ShopScene,
    pub victory: VictoryScene,
    pub game_over: GameOverScene,
    pub settings: SettingsScene,
}

impl Scenes {
    pub fn new(field: Rect) -> Self {
        Self {
            menu: MenuScene::new(field),
            wave_select: WaveSelectScene::new(field),
            wave: WaveScene::new(field),
            shop: ShopScene::new(field),
            victory: VictoryScene::new(field),
            game_over: GameOverScene::new(field),
            settings: SettingsScene::new(field),
        }
    }

    pub fn get(&self, id: SceneId) -> &dyn Scene {
        match id {
            SceneId::Menu => &self.menu,
            SceneId::WaveSelect => &self.wave_select,
            SceneId::Wave(_) => &self.wave,
            SceneId::Shop => &self.shop,
            SceneId::Victory => &self.victory,
            SceneId::GameOver => &self.game_over,
            SceneId::Settings => &self.settings,
        }
    }

    pub fn get_mut(&mut self, id: SceneId) -> &mut dyn Scene {
        match id {
            SceneId::Menu => &mut self.menu,
            SceneId::WaveSelect => &mut self.wave_select,
            SceneId::Wave(_) => &mut self.wave,
            SceneId::Shop => &mut self.shop,
            SceneId::Victory => &mut self.victory,
            SceneId::GameOver => &mut self.game_over,
            SceneId::Settings => &mut self.settings,
        }
    }
}

/// Drives the current scene and applies deferred transitions
pub struct SceneManager {
    pub scenes: Scenes,
}

impl SceneManager {
    /// Build every scene and enter the context's current scene
    pub fn new(ctx: &mut SceneContext) -> Self {
        let mut scenes = Scenes::new(ctx.field);
        scenes.get_mut(ctx.current).enter(ctx);
        log::info!("starting in {}", ctx.current);
        Self { scenes }
    }

    /// Global toggles, then the current scene's input
    pub fn handle_input(&mut self, ctx: &mut SceneContext, input: &InputState) {
        if input.just_pressed(Action::ToggleFps) {
            ctx.settings.show_fps = !ctx.settings.show_fps;
        }
        if input.just_pressed(Action::ToggleHitboxes) {
            ctx.settings.show_hitboxes = !ctx.settings.show_hitboxes;
        }
        self.scenes.get_mut(ctx.current).handle_input(ctx, input);
    }

    /// Apply a pending transition, then update the current scene
    pub fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        if let Some(next) = ctx.take_pending() {
            let prev = ctx.current;
            self.scenes.get_mut(prev).exit(ctx);
            ctx.current = next;
            log::info!("scene {prev} -> {next}");
            self.scenes.get_mut(next).enter(ctx);
        }
        self.scenes.get_mut(ctx.current).update(ctx, dt);
    }

    pub fn draw(&self, ctx: &SceneContext, canvas: &mut dyn Canvas) {
        self.scenes.get(ctx.current).draw(ctx, canvas);
    }
}
