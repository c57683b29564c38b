//! Sky Raid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

    use sky_raid::audio::MusicPlayer;
    use sky_raid::consts::*;
    use sky_raid::render::{CanvasSurface, draw_frame};
    use sky_raid::sim::{Command, GamePhase, GameState, TickInput, apply_command, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: Option<CanvasSurface>,
        audio: MusicPlayer,
        input: TickInput,
        /// Previous frame's phase, for reacting to automatic transitions
        last_phase: GamePhase,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64, audio: MusicPlayer) -> Self {
            Self {
                state: GameState::new(width, height, seed),
                surface: None,
                audio,
                input: TickInput::default(),
                last_phase: GamePhase::Idle,
            }
        }

        /// Run one simulation tick and react to automatic phase changes
        fn update(&mut self) {
            let input = self.input.clone();
            tick(&mut self.state, &input);
            // Taps are one-shot; the pointer target persists like a real
            // cursor position does
            self.input.fire = false;

            let phase = self.state.phase;
            if phase != self.last_phase {
                match (self.last_phase, phase) {
                    // Floor reached
                    (_, GamePhase::GameOver) => {
                        log::info!("Game over at score {}", self.state.score);
                        self.audio.pause();
                    }
                    // Countdown elapsed
                    (GamePhase::GameOver, GamePhase::Running) => {
                        log::info!("Auto-restarting session");
                        self.audio.rewind();
                        self.audio.play();
                    }
                    _ => {}
                }
                self.last_phase = phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(surface) = &mut self.surface {
                draw_frame(&self.state, surface);
            }
        }

        /// Apply a UI command and keep the music in step with it
        fn command(&mut self, command: Command) {
            if self.state.phase == GamePhase::Quitted {
                return;
            }
            apply_command(&mut self.state, command);
            match command {
                Command::Start | Command::Resume => self.audio.play(),
                Command::Pause => self.audio.pause(),
                Command::Restart => {
                    self.audio.rewind();
                    self.audio.play();
                }
                Command::Quit => self.audio.pause(),
            }
            self.last_phase = self.state.phase;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Raid starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Shrink the canvas on small viewports
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(CANVAS_WIDTH as f64) as f32;
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(CANVAS_HEIGHT as f64) as f32;
        let width = if inner_w < CANVAS_WIDTH { inner_w - 20.0 } else { CANVAS_WIDTH };
        let height = if inner_h < CANVAS_HEIGHT { inner_h - 20.0 } else { CANVAS_HEIGHT };
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let audio = MusicPlayer::new(&document, "game-music");
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(width, height, seed, audio);
        game.surface = CanvasSurface::new(&canvas);
        if game.surface.is_none() {
            log::warn!("No 2D context available - running headless");
        }
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {}", seed);

        // In-game controls stay hidden until the first start
        hide(&document, "pause-btn");
        hide(&document, "resume-btn");
        hide(&document, "restart-btn");
        hide(&document, "quit-btn");

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_volume_slider(&document, game.clone());

        request_animation_frame(game);

        log::info!("Sky Raid running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - steer the turret (centered on the pointer)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                g.input
                    .record_target(phase, event.offset_x() as f32 - TURRET_WIDTH / 2.0);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let mut g = game.borrow_mut();
                    let phase = g.state.phase;
                    g.input.record_target(phase, x - TURRET_WIDTH / 2.0);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start fires a manual bullet
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.fire = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", {
            let game = game.clone();
            move || {
                game.borrow_mut().command(Command::Start);
                let document = web_sys::window().unwrap().document().unwrap();
                hide(&document, "start-btn");
                show(&document, "pause-btn");
                show(&document, "restart-btn");
                show(&document, "quit-btn");
            }
        });

        on_click(document, "pause-btn", {
            let game = game.clone();
            move || {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Running {
                    return;
                }
                g.command(Command::Pause);
                drop(g);
                let document = web_sys::window().unwrap().document().unwrap();
                hide(&document, "pause-btn");
                show(&document, "resume-btn");
            }
        });

        on_click(document, "resume-btn", {
            let game = game.clone();
            move || {
                game.borrow_mut().command(Command::Resume);
                let document = web_sys::window().unwrap().document().unwrap();
                show(&document, "pause-btn");
                hide(&document, "resume-btn");
            }
        });

        on_click(document, "restart-btn", {
            let game = game.clone();
            move || {
                if confirm("Are you sure you want to restart?") {
                    game.borrow_mut().command(Command::Restart);
                    let document = web_sys::window().unwrap().document().unwrap();
                    show(&document, "pause-btn");
                    hide(&document, "resume-btn");
                    log::info!("Game restarted");
                }
            }
        });

        on_click(document, "quit-btn", {
            let game = game.clone();
            move || {
                if confirm("Are you sure you want to quit?") {
                    game.borrow_mut().command(Command::Quit);
                    log::info!("Game quitted");
                }
            }
        });

        on_click(document, "test-audio-btn", {
            let game = game.clone();
            move || game.borrow().audio.play()
        });
    }

    fn setup_volume_slider(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(slider) = document.get_element_by_id("volume-slider") else {
            log::warn!("No 'volume-slider' element");
            return;
        };
        let Ok(slider) = slider.dyn_into::<HtmlInputElement>() else {
            return;
        };
        let slider_clone = slider.clone();
        // Slider range [0, 100] maps linearly to gain [0, 1]; not phase-gated
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let volume = slider_clone.value_as_number() / 100.0;
            game.borrow().audio.set_volume(volume);
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No '{id}' button element");
        }
    }

    fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }
        // The frame loop stays alive in every phase so pause/resume and the
        // game-over countdown can reuse it
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Raid (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless sanity run: ten seconds of simulated play
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use sky_raid::consts::*;
    use sky_raid::sim::{Command, GameState, TickInput, apply_command, tick};

    let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 42);
    apply_command(&mut state, Command::Start);
    let input = TickInput {
        fire: true,
        ..Default::default()
    };
    for _ in 0..10 * TICKS_PER_SECOND {
        tick(&mut state, &input);
    }
    println!(
        "Simulated 10s: score={} level={} phase={:?} bullets={} objects={}",
        state.score,
        state.level,
        state.phase,
        state.bullets.len(),
        state.objects.len()
    );
}
