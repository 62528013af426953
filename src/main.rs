//! Alien Barrage entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use alien_barrage::persistence::{LocalStorage, MemoryStorage, Storage};
    use alien_barrage::platform::{FrameClock, InputState, canvas_to_logical};
    use alien_barrage::renderer::{RenderState, build_frame};
    use alien_barrage::sim::{GameEvent, GameMode, GameWorld, tick};
    use alien_barrage::{Settings, highscores, ui};

    /// Game instance holding all state
    struct Game {
        world: GameWorld,
        storage: Box<dyn Storage>,
        settings: Settings,
        input: InputState,
        clock: FrameClock,
        render_state: Option<RenderState>,
        document: Document,
    }

    impl Game {
        fn new(storage: Box<dyn Storage>, document: Document) -> Self {
            let settings = Settings::load(&*storage);
            let leaderboard = highscores::load_leaderboard(&*storage);
            Self {
                world: GameWorld::new(leaderboard),
                storage,
                settings,
                input: InputState::new(),
                clock: FrameClock::new(),
                render_state: None,
                document,
            }
        }

        /// Run one tick of the state machine
        fn update(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            let input = self.input.snapshot(&self.settings.bindings);
            let events = tick(&mut self.world, &input, dt, self.storage.as_mut());

            for event in &events {
                match event {
                    GameEvent::BulletFired
                    | GameEvent::AlienDamaged { .. }
                    | GameEvent::AlienDestroyed { .. } => log::trace!("{:?}", event),
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(&self.world);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            if let Err(e) = self.settings.save(self.storage.as_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        /// Focus lost or tab hidden
        fn auto_pause(&mut self, reason: &str) {
            self.input.blur();
            if self.world.mode == GameMode::Playing {
                self.input.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let world = &self.world;
            let playfield = world.mode.shows_playfield();

            set_visible(&self.document, "hud", playfield);
            set_text(&self.document, "#hud-score .hud-value", &world.session.score.to_string());
            set_text(&self.document, "#hud-level .hud-value", &world.session.level.to_string());
            set_text(&self.document, "#hud-name .hud-value", &world.session.player_name);

            set_visible(&self.document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&self.document, "#hud-fps .hud-value", &self.clock.fps().to_string());
            }

            set_visible(&self.document, "menu-labels", world.mode == GameMode::Menu);
            set_visible(&self.document, "pause-labels", world.mode == GameMode::Paused);

            let lines = ui::screen_lines(world);
            set_visible(&self.document, "screen", !lines.is_empty());
            set_text(&self.document, "#screen", &lines.join("\n"));
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Fill a caption container from the button table
    fn build_labels<T>(document: &Document, container_id: &str, buttons: &[ui::Button<T>]) {
        let Some(container) = document.get_element_by_id(container_id) else {
            log::warn!("Missing #{} element", container_id);
            return;
        };
        container.set_text_content(None);
        for button in buttons {
            let Ok(label) = document.create_element("div") else {
                continue;
            };
            label.set_class_name("label");
            let _ = label.set_attribute("style", &button.css_box());
            label.set_text_content(Some(button.label));
            let _ = container.append_child(&label);
        }
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; scores will not persist this session", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Alien Barrage starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution; logical space stays 800x600
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        build_labels(&document, "menu-labels", &ui::MENU_BUTTONS);
        build_labels(&document, "pause-labels", &ui::PAUSE_BUTTONS);

        let game = Rc::new(RefCell::new(Game::new(open_storage(), document.clone())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create renderer");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Alien Barrage running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Clicks, mapped from CSS pixels to logical canvas space
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = canvas_to_logical(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                game.borrow_mut().input.click(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                match key.as_str() {
                    "F3" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.toggle_fps();
                        }
                        return;
                    }
                    // Keep the page from scrolling
                    " " | "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" => {
                        event.prevent_default();
                    }
                    _ => {}
                }
                g.input.key_down(&key, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Alien Barrage (native) starting...");
    log::info!("Rendering requires a browser - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run of the simulation without a window
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use alien_barrage::consts::FRAME_MS;
    use alien_barrage::persistence::MemoryStorage;
    use alien_barrage::sim::{Controls, GameEvent, GameMode, GameWorld, KeyPress, TickInput, tick};
    use alien_barrage::{highscores, ui};

    /// Upper bound on simulated frames
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    pub fn run() {
        let mut storage = MemoryStorage::new();
        let mut world = GameWorld::new(highscores::load_leaderboard(&storage));

        // Menu -> name input -> playing
        let start = ui::MENU_BUTTONS[0].rect.center();
        tick(&mut world, &TickInput::click(start.x, start.y), FRAME_MS, &mut storage);
        for c in "PILOT".chars() {
            tick(&mut world, &TickInput::key(KeyPress::Char(c)), FRAME_MS, &mut storage);
        }
        tick(&mut world, &TickInput::key(KeyPress::Enter), FRAME_MS, &mut storage);

        // Sweep back and forth, tapping fire every other frame
        for frame in 0..MAX_FRAMES {
            let controls = Controls {
                left: (frame / 120) % 2 == 1,
                right: (frame / 120) % 2 == 0,
                fire: frame % 2 == 0,
            };
            let events = tick(&mut world, &TickInput::with_controls(controls), FRAME_MS, &mut storage);
            for event in events {
                match event {
                    GameEvent::LevelCleared { .. } | GameEvent::GameOver { .. } => {
                        log::info!("frame {}: {:?}", frame, event)
                    }
                    _ => log::debug!("frame {}: {:?}", frame, event),
                }
            }
            if world.mode == GameMode::GameOver {
                break;
            }
        }

        for line in ui::screen_lines(&world) {
            println!("{}", line);
        }
    }
}
