//! BJJ Reflex entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use bjj_reflex::audio::{WebTone, WebVibrator};
    use bjj_reflex::persistence::LocalStorageStore;
    use bjj_reflex::platform::clock::PerformanceClock;
    use bjj_reflex::platform::move_for_key;
    use bjj_reflex::sim::{PhaseKind, TimerKind, TimerToken};
    use bjj_reflex::{GatedFeedback, Move, RoundEngine, SettingKey, Settings, Snapshot};

    /// Shown when the engine has no coach line
    const IDLE_MESSAGE: &str = "Answer with the right counter.";

    /// Game instance holding all state
    struct Game {
        engine: RoundEngine,
        settings: Rc<Cell<Settings>>,
        /// Cooldown we already handed to setTimeout
        armed_cooldown: Option<TimerToken>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Rc::new(Cell::new(Settings::default()));
            let feedback = GatedFeedback::new(WebTone::new(), WebVibrator, settings.clone());
            let engine = RoundEngine::new(
                seed,
                Box::new(PerformanceClock),
                Box::new(LocalStorageStore::new()),
                Box::new(feedback),
            );
            Self {
                engine,
                settings,
                armed_cooldown: None,
            }
        }

        fn toggle(&mut self, key: SettingKey) {
            let mut settings = self.settings.get();
            let on = settings.toggle(key);
            self.settings.set(settings);
            log::info!("{} {}", key.as_str(), if on { "on" } else { "off" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("BJJ Reflex starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_control_buttons(&document, game.clone());
        setup_move_buttons(&document, game.clone());
        setup_keyboard(game.clone());
        setup_settings(&document, game.clone());
        setup_celebration(&document, game.clone());

        {
            let g = game.borrow();
            render(&document, &g.engine.snapshot(), g.settings.get());
        }

        request_animation_frame(game);
        log::info!("BJJ Reflex running!");
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_control_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "start-btn", move || {
                game.borrow_mut().engine.start();
                after_command(&game);
            });
        }
        {
            let game = game.clone();
            on_click(document, "pause-btn", move || {
                game.borrow_mut().engine.pause();
                after_command(&game);
            });
        }
        on_click(document, "reset-btn", move || {
            game.borrow_mut().engine.reset();
            after_command(&game);
        });
    }

    fn setup_move_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for m in Move::ALL {
            let game = game.clone();
            on_click(document, &move_button_id(m), move || {
                game.borrow_mut().engine.pick(m);
                after_command(&game);
            });
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(m) = move_for_key(&event.key()) else { return };
            let awaiting = game.borrow().engine.phase().kind() == PhaseKind::AwaitingInput;
            if awaiting {
                event.prevent_default();
                game.borrow_mut().engine.pick(m);
                after_command(&game);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        for key in [SettingKey::Sounds, SettingKey::Haptics] {
            let game = game.clone();
            on_click(document, &format!("toggle-{}", key.as_str()), move || {
                game.borrow_mut().toggle(key);
                after_command(&game);
            });
        }
    }

    fn setup_celebration(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "celebration", move || {
            game.borrow_mut().engine.dismiss_celebration();
            after_command(&game);
        });
    }

    /// Arm a one-shot callback for a fresh cooldown and redraw
    fn after_command(game: &Rc<RefCell<Game>>) {
        schedule_cooldown(game);
        let g = game.borrow();
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            render(&document, &g.engine.snapshot(), g.settings.get());
        }
    }

    fn schedule_cooldown(game: &Rc<RefCell<Game>>) {
        let (token, delay) = {
            let g = game.borrow();
            let Some(timer) = g.engine.pending_timer() else { return };
            if timer.token.kind != TimerKind::Cooldown || g.armed_cooldown == Some(timer.token) {
                return;
            }
            let now = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(timer.due_at_ms);
            (timer.token, timer.delay_from(now))
        };
        game.borrow_mut().armed_cooldown = Some(token);

        let game = game.clone();
        let closure = Closure::once(move || {
            // A stale token (pause/reset/restart since arming) is dropped by the engine
            game.borrow_mut().engine.fire(token);
            after_command(&game);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay.ceil() as i32,
            );
        }
        closure.forget();
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
        game.borrow_mut().engine.advance();
        after_command(&game);
        request_animation_frame(game);
    }

    fn move_button_id(m: Move) -> String {
        format!("move-{}", m.label().to_lowercase().replace(' ', "-"))
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_width(document: &Document, id: &str, percent: u32) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("style", &format!("width: {}%", percent));
        }
    }

    /// Update DOM elements from a snapshot
    fn render(document: &Document, snap: &Snapshot, settings: Settings) {
        set_text(document, "round", &format!("Round {}", snap.round_number));
        set_text(
            document,
            "time",
            &format!("Time: {:.2}s", f64::from(snap.time_remaining_ms) / 1000.0),
        );
        set_text(document, "score", &snap.score.to_string());
        set_text(document, "stamina", &format!("{}%", snap.stamina));
        set_width(document, "stamina-bar", u32::from(snap.stamina));
        set_text(document, "high-score", &snap.high_score.to_string());
        set_text(document, "belt", snap.belt.label());
        set_class(document, "belt", &format!("belt belt-{}", snap.belt.color()));
        set_width(document, "xp-bar", snap.xp_progress);

        let (glyph, label) = match snap.enemy_move {
            Some(m) => (m.glyph(), m.label()),
            None => ("⏳", "…"),
        };
        set_text(document, "enemy-glyph", glyph);
        set_text(document, "enemy-label", label);

        let message = if snap.message.is_empty() {
            IDLE_MESSAGE
        } else {
            snap.message.as_str()
        };
        set_text(document, "message", message);

        for m in Move::ALL {
            let class = match (snap.player_choice, snap.last_outcome) {
                (Some(c), Some(bjj_reflex::RoundOutcome::Win)) if c == m => "move selected win",
                (Some(c), _) if c == m => "move selected",
                _ => "move",
            };
            set_class(document, &move_button_id(m), class);
        }

        let running = snap.running;
        set_class(document, "start-btn", if running { "hidden" } else { "primary" });
        set_class(document, "pause-btn", if running { "" } else { "hidden" });

        match snap.celebration {
            Some(belt) => {
                set_class(document, "celebration", "overlay");
                set_text(document, "celebration-belt", belt.label());
            }
            None => set_class(document, "celebration", "overlay hidden"),
        }

        set_text(
            document,
            "toggle-sounds",
            if settings.sounds { "Sounds: on" } else { "Sounds: off" },
        );
        set_text(
            document,
            "toggle-haptics",
            if settings.haptics { "Haptics: on" } else { "Haptics: off" },
        );
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
    log::info!("BJJ Reflex (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB33F);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a simulated player rolls until gassed out
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use bjj_reflex::consts::COOLDOWN_MS;
    use bjj_reflex::platform::{Clock, ManualClock};
    use bjj_reflex::sim::{GameEvent, PhaseKind};
    use bjj_reflex::{MemoryStore, Move, NullFeedback, RoundEngine};

    /// Chance the simulated player knows the right counter
    const ACCURACY: f64 = 0.8;
    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 16.0;
    /// Stop a lucky run eventually
    const MAX_ROUNDS: u32 = 500;

    pub fn run(seed: u64) {
        let clock = ManualClock::new();
        let mut engine = RoundEngine::new(
            seed,
            Box::new(clock.clone()),
            Box::new(MemoryStore::new()),
            Box::new(NullFeedback),
        );
        let mut player = Pcg32::seed_from_u64(seed ^ 0x5EED);

        engine.start();
        while engine.phase().kind() != PhaseKind::Exhausted
            && engine.state().round_number < MAX_ROUNDS
        {
            let snap = engine.snapshot();
            let Some(enemy) = snap.enemy_move else { break };

            // Reaction time spread across the window; late answers time out
            let reaction = player.random_range(300.0..f64::from(snap.deadline_ms) * 1.1);
            let answer = if player.random_bool(ACCURACY) {
                enemy.counter()
            } else {
                Move::ALL[player.random_range(0..Move::ALL.len())]
            };

            let started = clock.now_ms();
            while engine.phase().kind() == PhaseKind::AwaitingInput {
                if clock.now_ms() - started >= reaction {
                    engine.pick(answer);
                    break;
                }
                clock.advance(FRAME_MS);
                engine.advance();
            }

            for event in engine.drain_events() {
                match event {
                    GameEvent::RoundResolved { round, outcome } => {
                        let s = engine.state();
                        println!(
                            "round {:>3}: {:<10} vs {:<10} -> {:?} (score {}, stamina {})",
                            round,
                            enemy.label(),
                            s.player_choice.map(Move::label).unwrap_or("-"),
                            outcome,
                            s.score,
                            s.stamina
                        );
                    }
                    GameEvent::BeltUnlocked(belt) => println!("  ** {} unlocked **", belt.label()),
                    _ => {}
                }
            }

            clock.advance(f64::from(COOLDOWN_MS));
            engine.advance();
        }

        let snap = engine.snapshot();
        match serde_json::to_string_pretty(&snap) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize final snapshot: {}", e),
        }
    }
}
