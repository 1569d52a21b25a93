//! Street Skate entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use street_skate::audio::{AudioManager, SoundCue};
    use street_skate::consts::*;
    use street_skate::render::{NullRenderer, RenderSnapshot, SceneRenderer};
    use street_skate::sim::{AI_EVENTS, GameEvent, GamePhase, GameWorld, TickInput, tick};
    use street_skate::Settings;

    /// Game instance holding all state
    struct Game {
        world: GameWorld,
        renderer: Box<dyn SceneRenderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// E is edge-debounced: held E must not retrigger the ollie
        ollie_held: bool,
        grind_sound_on: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volumes(
                settings.master_volume,
                settings.sfx_volume,
                settings.music_volume,
            );
            audio.set_muted(!settings.sound_enabled);

            Self {
                world: GameWorld::new(seed),
                renderer: Box::new(NullRenderer),
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                ollie_held: false,
                grind_sound_on: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                let events = tick(&mut self.world, &input);
                self.dispatch_events(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.ollie = false;
            }

            // The grind loop follows the grinding flag, not a one-shot event,
            // so it survives missed events and stops on reset
            let grinding = self.world.player.grinding;
            if grinding && !self.grind_sound_on {
                self.audio.start_grind();
                self.grind_sound_on = true;
            } else if !grinding && self.grind_sound_on {
                self.audio.stop_grind();
                self.grind_sound_on = false;
            }
        }

        /// Forward boundary cues from the core to the audio system
        fn dispatch_events(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::Jumped => self.audio.play(SoundCue::Jump),
                    GameEvent::Ollie => self.audio.play(SoundCue::Ollie),
                    GameEvent::ObstacleHit => self.audio.play(SoundCue::Collision),
                    GameEvent::CoinCollected { .. } => self.audio.play(SoundCue::Coin),
                    GameEvent::PowerUpApplied { .. } => self.audio.play(SoundCue::PowerUp),
                    GameEvent::GameOver { final_score } => {
                        self.audio.play(SoundCue::GameOver);
                        self.audio.stop_music();
                        log::info!("Game over with score {}", final_score);
                    }
                    GameEvent::NpcMessage { name, message } => {
                        show_banner(&format!("{}: {}", name, message));
                    }
                    GameEvent::GrindStarted
                    | GameEvent::GrindStopped
                    | GameEvent::PowerUpExpired { .. } => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = RenderSnapshot::capture(&self.world);
            self.renderer.render(&snapshot);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.world.score.to_string()));
            }

            // Current city event name (the NPC banner overrides it while held)
            if self.world.banner_until_ms.is_none() {
                if let Some(el) = document.get_element_by_id("hud-event") {
                    el.set_text_content(Some(AI_EVENTS[self.world.ai_event].name));
                }
                if let Some(el) = document.get_element_by_id("npc-banner") {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Ollie popup
            if let Some(el) = document.get_element_by_id("ollie-text") {
                let class = if self.world.ollie_text_until_ms.is_some() {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Sound indicator
            if let Some(el) = document.get_element_by_id("hud-sound") {
                let label = if self.audio.muted() { "Sound: OFF" } else { "Sound: ON" };
                el.set_text_content(Some(label));
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.world.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.world.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.sound_enabled = !self.settings.sound_enabled;
            self.audio.set_muted(!self.settings.sound_enabled);
            self.settings.save();
            log::info!("Sound enabled: {}", self.settings.sound_enabled);
        }

        /// Restart after a wipeout ('r' key, only from game over)
        fn restart(&mut self) {
            if self.world.phase != GamePhase::GameOver {
                return;
            }
            self.world.reset();
            self.input = TickInput::default();
            self.accumulator = 0.0;
            self.audio.start_music();
            log::info!("Run restarted");
        }
    }

    /// Show the NPC dialogue banner
    fn show_banner(text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("npc-banner") {
            el.set_text_content(Some(text));
            let _ = el.set_attribute("class", "");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Street Skate starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!(
            "Game initialized with seed {} - city event: {}",
            seed,
            AI_EVENTS[game.borrow().world.ai_event].name
        );

        setup_input_handlers(game.clone());

        // Music starts muted-aware; first key gesture resumes the context
        game.borrow_mut().audio.start_music();

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Street Skate running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown - latch held keys, edge-trigger ollie, handle commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" => g.input.forward = true,
                    "s" | "S" => g.input.back = true,
                    "a" | "A" => g.input.left = true,
                    "d" | "D" => g.input.right = true,
                    " " => {
                        g.input.jump = true;
                        event.prevent_default();
                    }
                    "Shift" => g.input.grind = true,
                    "e" | "E" => {
                        if !g.ollie_held {
                            g.input.ollie = true;
                            g.ollie_held = true;
                        }
                    }
                    "r" | "R" => g.restart(),
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup - release held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" => g.input.forward = false,
                    "s" | "S" => g.input.back = false,
                    "a" | "A" => g.input.left = false,
                    "d" | "D" => g.input.right = false,
                    " " => g.input.jump = false,
                    "Shift" => g.input.grind = false,
                    "e" | "E" => g.ollie_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - drop all held keys so nothing sticks across focus loss
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input = TickInput::default();
                g.ollie_held = false;
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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

            g.update(dt);
            g.render();
            g.update_hud();
        }

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
    use street_skate::consts::SIM_DT_MS;
    use street_skate::sim::{GameEvent, GameWorld, TickInput, tick};

    env_logger::init();
    log::info!("Street Skate (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    // Skate forward for ten simulated seconds and report what happened
    let mut world = GameWorld::new(42);
    let input = TickInput {
        forward: true,
        ..Default::default()
    };
    let ticks = (10_000.0 / SIM_DT_MS) as usize;
    let mut coins = 0u32;

    for _ in 0..ticks {
        for event in tick(&mut world, &input) {
            match event {
                GameEvent::CoinCollected { value } => coins += value,
                GameEvent::ObstacleHit => log::info!("Hit an obstacle, score {}", world.score),
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over at {}", final_score);
                }
                _ => {}
            }
        }
    }

    println!(
        "After 10s: score {} ({} from coins), {} obstacles on street, player at x={:.1}",
        world.score,
        coins,
        world.obstacles.len(),
        world.player.pos.x
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
