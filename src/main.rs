//! Superposition entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use superposition::audio::AudioManager;
    use superposition::renderer::RenderState;
    use superposition::sim::GameEvent;
    use superposition::{InputAction, Session, Settings, SettingsChange};

    /// Game instance holding all state
    struct Game {
        session: Session<RenderState, AudioManager>,
        settings: Settings,
        /// Title currently shown in the HUD
        shown_title: Option<&'static str>,
    }

    impl Game {
        fn new(render_state: RenderState, settings: Settings) -> Self {
            let audio = AudioManager::with_settings(&settings);
            Self {
                session: Session::new(render_state, audio),
                settings,
                shown_title: None,
            }
        }

        /// Tick, play sounds and draw one frame
        fn frame(&mut self) {
            let events = self.session.frame();
            for event in &events {
                match event {
                    GameEvent::LevelComplete { level } => {
                        log::info!("Level {} complete", level.number())
                    }
                    GameEvent::Won => log::info!("Every level solved"),
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let title = self.settings.hud_title(&self.session.state().level);
            if title == self.shown_title {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("Level") {
                match title {
                    Some(text) => el.set_inner_html(&format!("<b>{}</b>", text)),
                    None => el.set_inner_html(""),
                }
            }
            self.shown_title = title;
        }

        /// Apply a preference edit, persist it and push it to renderer and audio
        fn change_settings(&mut self, change: SettingsChange) {
            self.settings.apply(change);
            self.settings.save();
            self.session.renderer.apply_settings(&self.settings);
            self.session.audio.apply_settings(&self.settings);
            if !self.settings.mute_on_blur {
                self.session.audio.set_muted(false);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            if self.settings.mute_on_blur {
                self.session.audio.set_muted(muted);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Superposition starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gl-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let (width, height) = fit_canvas(&window, &canvas);

        let settings = Settings::load();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, &settings)
            .await
            .expect("Failed to create device");

        let game = Rc::new(RefCell::new(Game::new(render_state, settings)));

        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_mute(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Superposition running!");
    }

    /// Size the drawing buffer to the canvas' CSS size at device resolution
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if let Some(change) = SettingsChange::from_key(&key) {
                game.borrow_mut().change_settings(change);
                return;
            }
            let Some(action) = InputAction::from_key(&key) else {
                return;
            };
            // Arrows and space would otherwise scroll the page
            event.prevent_default();

            let mut g = game.borrow_mut();
            g.session.audio.resume();
            g.session.queue(action);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = fit_canvas(&window, &canvas);
            game.borrow_mut().session.renderer.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_mute(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                game.borrow_mut().set_muted(hidden);
                log::debug!("Visibility changed, hidden: {}", hidden);
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_muted(true);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_muted(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One simulation increment per redraw
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Superposition (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the playable web version");

    // Replay the known solutions headlessly
    println!("\nReplaying solutions...");
    if replay_solutions() {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play every known solution; false if the run does not end on the win screen
#[cfg(not(target_arch = "wasm32"))]
fn replay_solutions() -> bool {
    use superposition::present::{AudioSink, RenderFrame, RenderSink, SoundCue};
    use superposition::sim::{Direction, GamePhase};
    use superposition::{InputAction, Session};

    /// Counts frames and logs sounds instead of drawing and playing them
    #[derive(Default)]
    struct Headless {
        frames: u64,
    }

    impl RenderSink for Headless {
        fn render(&mut self, _frame: &RenderFrame<'_>) {
            self.frames += 1;
        }
    }

    impl AudioSink for Headless {
        fn notify(&mut self, cue: SoundCue) {
            log::debug!("Sound: {:?}", cue);
        }
    }

    let solutions = ["DRDRURUL", "RDLDLURDR", "RULDRDLURDR"];
    let mut session = Session::new(Headless::default(), Headless::default());

    for moves in solutions {
        let level = session.state().level_id();
        for c in moves.chars() {
            let direction = match c {
                'U' => Direction::Up,
                'D' => Direction::Down,
                'L' => Direction::Left,
                _ => Direction::Right,
            };
            session.queue(InputAction::Move(direction));
            session.frame();
            while matches!(session.state().phase, GamePhase::Moving(_)) {
                session.frame();
            }
        }
        println!("✓ {} solved with {}", level.title(), moves);
    }

    if !session.state().is_won() {
        log::error!(
            "Replay stopped on {} instead of the win screen",
            session.state().level.title()
        );
        return false;
    }
    println!("✓ All levels solved in {} frames", session.renderer.frames);
    true
}
