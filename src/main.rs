//! Cat Siege entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use cat_siege::consts::*;
    use cat_siege::renderer::{CanvasRenderer, build_scene};
    use cat_siege::sim::{GameState, RenderFrame, TickInput, autopilot_input, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Demo mode - the autopilot drives movement and firing
        idle_mode: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::new(seed),
                renderer,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                idle_mode: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) -> Option<RenderFrame> {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut frame = None;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = if self.idle_mode {
                    TickInput {
                        click: self.input.click,
                        ..autopilot_input(&self.state)
                    }
                } else {
                    self.input.clone()
                };
                frame = Some(tick(&mut self.state, &input, SIM_DT));
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = false;
                self.input.click = None;
            }
            frame
        }

        /// Render the current frame
        fn render(&self, frame: Option<RenderFrame>) {
            let frame = frame.unwrap_or_else(|| RenderFrame::capture(&self.state));
            self.renderer.draw(&build_scene(&frame));
        }

        /// Set or clear a held movement key; returns false for other keys
        fn set_key(&mut self, key: &str, held: bool) -> bool {
            match key {
                "w" => self.input.up = held,
                "s" => self.input.down = held,
                "a" => self.input.left = held,
                "d" => self.input.right = held,
                _ => return false,
            }
            true
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat Siege starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()?;

        let renderer = CanvasRenderer::new(&canvas)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Cat Siege running!");
        Ok(())
    }

    /// Pointer position relative to the canvas' top-left corner
    fn canvas_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: movement keys, fire, demo toggle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_playing() {
                    return;
                }
                let key = event.key();
                if g.set_key(&key, true) {
                    return;
                }
                match key.as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.fire = true;
                    }
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release movement keys in any phase
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - aim point
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer = canvas_pos(&canvas_clone, &event);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - only the end-screen restart button reacts
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_playing() {
                    g.input.click = Some(canvas_pos(&canvas_clone, &event));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let frame = g.update(dt);
            g.render(frame);
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

/// Headless run driven by the autopilot: `cat-siege [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cat_siege::Tuning;
    use cat_siege::consts::SIM_DT;
    use cat_siege::sim::{GameEvent, GameState, autopilot_input, tick};

    /// Ten minutes of play at one tick per frame
    const MAX_TICKS: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Cat Siege (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {}", e);
            std::process::exit(2);
        }
    };
    let tuning = match args.next() {
        None => Tuning::default(),
        Some(path) => match Tuning::from_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
    };

    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", state.seed);

    let mut kills = 0u32;
    let mut hits = 0u32;
    while state.is_playing() && state.time_ticks < MAX_TICKS {
        let input = autopilot_input(&state);
        tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            match event {
                GameEvent::EnemyKilled { .. } | GameEvent::BossDefeated => kills += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                _ => {}
            }
        }
    }

    println!(
        "Seed {}: {:?} after {} ticks: level {} \"{}\", score {}, health {}, {} kills, {} hits taken",
        state.seed,
        state.phase,
        state.time_ticks,
        state.level_index + 1,
        state.current_level().name,
        state.score,
        state.player.health,
        kills,
        hits
    );
}
