//! Ground Runner entry point
//!
//! Web: Canvas2D renderer and keyboard/touch input driving the simulation
//! from requestAnimationFrame. Native: a headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent,
        TouchEvent,
    };

    use ground_runner::sim::{Config, GamePhase, GameState, Snapshot, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        input: TickInput,
        /// Timestamp of the previous frame (ms); None before the first one
        last_time: Option<f64>,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(state: GameState, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state,
                ctx,
                input: TickInput::default(),
                last_time: None,
                last_phase: GamePhase::Playing,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            // First frame has no predecessor
            let dt = match self.last_time {
                Some(last) => ((time - last) / 1000.0) as f32,
                None => 0.0,
            };
            self.last_time = Some(time);

            let input = self.input.clone();
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.reset = false;
            self.input.tap = false;

            let phase = self.state.phase();
            if phase != self.last_phase {
                match phase {
                    GamePhase::Won => log::info!("Cleared! Survived {:.1}s", self.state.elapsed()),
                    GamePhase::Lost => log::info!("Game over at {:.1}s", self.state.elapsed()),
                    GamePhase::Playing => log::info!("Back in the game"),
                }
                self.last_phase = phase;
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let snap = self.state.snapshot();
            let ctx = &self.ctx;
            let w = snap.field_width as f64;
            let h = snap.field_height as f64;

            ctx.clear_rect(0.0, 0.0, w, h);
            draw_background(ctx, w, h);
            draw_ground(ctx, &snap);

            let c = snap.character;
            ctx.set_fill_style_str("#ffb703");
            ctx.fill_rect(c.x as f64, c.y as f64, c.width as f64, c.height as f64);

            ctx.set_fill_style_str("#1d3557");
            for o in &snap.obstacles {
                ctx.fill_rect(o.x as f64, o.y as f64, o.width as f64, o.height as f64);
            }

            if let Err(e) = draw_overlay(ctx, &snap) {
                log::warn!("Overlay draw failed: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("statusText") {
                el.set_text_content(Some(&self.state.snapshot().status_line()));
            }
        }
    }

    fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        for (offset, color) in [(0.0, "#9be2fe"), (0.6, "#67d5bf"), (1.0, "#5b8c5a")] {
            let _ = gradient.add_color_stop(offset, color);
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_ground(ctx: &CanvasRenderingContext2d, snap: &Snapshot) {
        let floor = snap.floor_y as f64;
        let w = snap.field_width as f64;
        ctx.set_fill_style_str("#3a5a40");
        ctx.fill_rect(0.0, floor, w, snap.field_height as f64 - floor);

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.12)");
        let mut x = 0.0;
        while x < w {
            ctx.fill_rect(x, floor - 4.0, 16.0, 4.0);
            x += 32.0;
        }
    }

    fn draw_overlay(ctx: &CanvasRenderingContext2d, snap: &Snapshot) -> Result<(), JsValue> {
        ctx.save();
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        ctx.fill_rect(0.0, 0.0, 240.0, 48.0);
        ctx.set_fill_style_str("#f1faee");
        ctx.set_font("20px 'Segoe UI', sans-serif");
        ctx.fill_text(&format!("Survived: {:.1}s", snap.elapsed_seconds), 18.0, 30.0)?;

        if snap.phase.is_over() {
            let w = snap.field_width as f64;
            let h = snap.field_height as f64;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.55)");
            ctx.fill_rect(0.0, 0.0, w, h);

            let (message, sub) = match snap.phase {
                GamePhase::Won => ("CLEAR!", "Well done! Press R to play again"),
                _ => ("GAME OVER", "Press R to restart"),
            };
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("bold 40px 'Segoe UI', sans-serif");
            let mw = ctx.measure_text(message)?.width();
            ctx.fill_text(message, (w - mw) / 2.0, h / 2.0 - 10.0)?;
            ctx.set_font("24px 'Segoe UI', sans-serif");
            let sw = ctx.measure_text(sub)?.width();
            ctx.fill_text(sub, (w - sw) / 2.0, h / 2.0 + 32.0)?;
        }

        ctx.restore();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ground Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Optional JSON override: <canvas data-config='{"survival_seconds": 30}'>
        let mut config = match canvas.get_attribute("data-config") {
            Some(json) => Config::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Config::default(),
        };
        config.field_width = canvas.width() as f32;
        config.field_height = canvas.height() as f32;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game::new(state, ctx)));

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Ground Runner running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    "KeyR" => {
                        event.prevent_default();
                        g.input.reset = true;
                    }
                    "KeyI" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.tap = true;
            });
            // Browsers default document-level touch listeners to passive,
            // which would ignore prevent_default()
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run: `ground-runner [seed] [config.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Ground Runner (native) starting...");

    match headless::run(std::env::args().skip(1)) {
        Ok(snap) => {
            println!("{} (episode {}, {:.1}s)", snap.status_line(), snap.episode, snap.elapsed_seconds);
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use ground_runner::sim::{Config, GameState, Snapshot, TickInput, tick};

    /// Frame rate of the simulated display
    const FRAME_DT: f32 = 1.0 / 60.0;

    pub fn run(mut args: impl Iterator<Item = String>) -> Result<Snapshot, Box<dyn Error>> {
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_millis() as u64,
        };
        let config = match args.next() {
            Some(path) => {
                log::info!("Loading config from {}", path);
                Config::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Config::default(),
        };

        let mut state = GameState::new(config, seed)?;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut next_report = 10.0;
        while !state.phase().is_over() {
            tick(&mut state, &input, FRAME_DT);
            if state.elapsed() >= next_report {
                log::info!(
                    "{:.0}s survived, {} obstacles on screen",
                    state.elapsed(),
                    state.field().len()
                );
                next_report += 10.0;
            }
        }

        Ok(state.snapshot())
    }
}
