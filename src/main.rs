//! Ridiculously Overpowered entry point
//!
//! Browser builds run the game on a 2D canvas. Native builds run a headless
//! autopilot demo through the full scene machine and log the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use ridiculously_overpowered::renderer::canvas2d::Canvas2d;
    use ridiculously_overpowered::{Game, Settings, Tuning};

    /// Longest frame fed to the game; tab switches otherwise produce huge steps
    const MAX_FRAME_DT: f32 = 0.1;

    struct Runtime {
        game: Game,
        canvas: Canvas2d,
        last_time: f64,
    }

    impl Runtime {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / self.game.ctx.settings.fps.max(1) as f32
            };
            self.last_time = time;

            self.game.frame(dt.min(MAX_FRAME_DT));
            self.game.draw(&mut self.canvas);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Ridiculously Overpowered starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        document.set_title(&settings.title);
        canvas.set_width(settings.window_width);
        canvas.set_height(settings.window_height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let surface = Canvas2d::new(
            ctx,
            settings.window_width as f32,
            settings.window_height as f32,
        );

        let seed = js_sys::Date::now() as u64;
        let runtime = Rc::new(RefCell::new(Runtime {
            game: Game::new(settings, Tuning::default(), seed),
            canvas: surface,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, runtime.clone())?;
        request_animation_frame(runtime);

        log::info!("Ridiculously Overpowered running!");
        Ok(())
    }

    /// Mouse position in canvas pixels (the canvas may be CSS-scaled)
    fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let scale_x = canvas.width() as f64 / rect.width().max(1.0);
        let scale_y = canvas.height() as f64 / rect.height().max(1.0);
        Vec2::new(
            ((event.client_x() as f64 - rect.left()) * scale_x) as f32,
            ((event.client_y() as f64 - rect.top()) * scale_y) as f32,
        )
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        runtime: Rc<RefCell<Runtime>>,
    ) -> Result<(), JsValue> {
        // Mouse move
        {
            let runtime = runtime.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, &event);
                runtime.borrow_mut().game.pointer_moved(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let runtime = runtime.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let pos = canvas_point(&canvas_clone, &event);
                let mut rt = runtime.borrow_mut();
                rt.game.ctx.audio.resume();
                rt.game.mouse_down(pos);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Silence effects while the tab is hidden
        {
            let runtime = runtime.clone();
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("no document")?;
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                runtime.borrow_mut().game.ctx.audio.set_muted(hidden);
                log::debug!("tab hidden: {hidden}");
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Keyboard, mapped through the keybindings
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = match event.key().as_str() {
                    " " => "Space".to_string(),
                    other => other.to_string(),
                };
                let mut rt = runtime.borrow_mut();
                // Keep Tab and the arrows from moving browser focus or scrolling
                if !rt.game.key_actions(&key).is_empty() {
                    event.prevent_default();
                }
                rt.game.key_down(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(runtime: Rc<RefCell<Runtime>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(runtime, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(runtime: Rc<RefCell<Runtime>>, time: f64) {
        let running = {
            let mut rt = runtime.borrow_mut();
            rt.frame(time);
            rt.game.is_running()
        };

        if running {
            request_animation_frame(runtime);
        } else {
            log::info!("Game quit");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};

    use ridiculously_overpowered::autopilot::Autopilot;
    use ridiculously_overpowered::renderer::DrawList;
    use ridiculously_overpowered::{Game, Settings, Tuning};

    const TUNING_PATH: &str = "tuning.json";
    /// Simulated minutes when no limit is given
    const DEFAULT_MINUTES: u64 = 10;

    /// Optional balance overrides; a missing file means defaults
    fn load_tuning(path: &Path) -> Result<Tuning> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let tuning = Tuning::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?;
                log::info!("Loaded tuning from {}", path.display());
                Ok(tuning)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Tuning::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// `ridiculously-overpowered [seed] [minutes]`
    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(arg) => arg
                .parse::<u64>()
                .with_context(|| format!("seed must be an integer, got {arg:?}"))?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default(),
        };
        let minutes = match args.next() {
            Some(arg) => arg
                .parse::<u64>()
                .with_context(|| format!("minutes must be an integer, got {arg:?}"))?,
            None => DEFAULT_MINUTES,
        };

        let settings = Settings::load_from(Settings::DEFAULT_PATH);
        let tuning = load_tuning(Path::new(TUNING_PATH))?;
        let fps = settings.fps.max(1);
        let (width, height) = (settings.window_width as f32, settings.window_height as f32);

        let mut game = Game::new(settings, tuning, seed);
        game.ctx.settings_path = Some(PathBuf::from(Settings::DEFAULT_PATH));
        let mut pilot = Autopilot::new();
        let mut canvas = DrawList::new(width, height);

        let dt = 1.0 / fps as f32;
        let max_frames = minutes * 60 * fps as u64;
        log::info!("Autopilot demo: seed {seed}, {minutes} simulated minutes at {fps} fps");

        while game.is_running() && game.frames() < max_frames {
            let input = pilot.input(&game);
            game.step(&input, dt);
            game.draw(&mut canvas);
        }

        let economy = &game.ctx.economy;
        log::info!(
            "Demo finished after {} frames in {}: {} waves cleared, {} lost",
            game.frames(),
            game.current_scene(),
            pilot.waves_cleared,
            pilot.waves_lost
        );
        log::info!(
            "Bank {} seeds; upgrades health {} speed {} damage {} fire rate {}",
            economy.seeds,
            economy.health_level,
            economy.speed_level,
            economy.damage_level,
            economy.fire_rate_level
        );
        log::debug!("Last frame: {} draw commands", canvas.commands.len());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
