//! Color Match Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement};

    use color_match_rush::audio::{AudioManager, SoundEffect};
    use color_match_rush::consts::*;
    use color_match_rush::renderer::CanvasRenderer;
    use color_match_rush::sim::{self, Color, GamePhase, GameState, SessionEvent};
    use color_match_rush::{BestScore, Leaderboard, Settings, wallet};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        best: BestScore,
        leaderboard: Leaderboard,
        accumulator: f32,
        last_time: f64,
        /// Active 1 Hz countdown interval, cleared the moment a session ends
        timer_handle: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, best: BestScore, leaderboard: Leaderboard) -> Self {
            let mut state = GameState::new(seed);
            state.best_score = best.0;
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state,
                renderer: None,
                audio,
                settings,
                best,
                leaderboard,
                accumulator: 0.0,
                last_time: 0.0,
                timer_handle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run fixed-timestep simulation ticks for one frame
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                sim::tick(&mut self.state);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, &self.settings, time);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "score", &self.state.score.to_string());
            set_text(&document, "timer", &self.state.time_left.to_string());
            set_text(&document, "best", &self.state.best_score.to_string());

            if self.settings.show_fps {
                set_text(&document, "fps", &self.fps.to_string());
            }
        }

        /// Cancel the countdown interval, if one is active
        fn stop_countdown(&mut self) {
            if let Some(handle) = self.timer_handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    // === DOM helpers ===

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let result = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
            result.ok();
        }
    }

    /// Flash a button with a feedback class for 300ms
    fn flash_button(button: &Element, class: &str) {
        button.class_list().add_1(class).ok();
        let button = button.clone();
        let class = class.to_string();
        let cb = Closure::once_into_js(move || {
            button.class_list().remove_1(&class).ok();
        });
        if let Some(window) = web_sys::window() {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 300)
                .ok();
        }
    }

    // === Session orchestration ===

    /// Drain pending session events into audio, persistence and overlay UI
    fn handle_events(game: &mut Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for event in game.state.drain_events() {
            match event {
                SessionEvent::Started => {
                    set_hidden(&document, "startScreen", true);
                    set_hidden(&document, "gameOverScreen", true);
                    set_hidden(&document, "prizeSection", true);
                }
                SessionEvent::Hit { .. } => game.audio.play(SoundEffect::Correct),
                SessionEvent::WrongColor => game.audio.play(SoundEffect::Wrong),
                SessionEvent::IdleClick => game.audio.play(SoundEffect::IdleClick),
                SessionEvent::Ended { final_score } => {
                    game.audio.play(SoundEffect::GameOver);
                    set_text(&document, "finalScore", &final_score.to_string());
                    set_hidden(&document, "gameOverScreen", false);
                    if game
                        .leaderboard
                        .record_score(final_score, js_sys::Date::now())
                        .is_some()
                    {
                        game.leaderboard.save();
                    }
                }
                SessionEvent::NewBest { score } => {
                    game.audio.play(SoundEffect::NewBest);
                    game.best.update(score);
                }
                SessionEvent::PrizeWon { score } => {
                    log::info!("prize won with {score} points");
                    set_hidden(&document, "prizeSection", false);
                }
            }
        }
    }

    /// Begin a session: reset the sim, start the countdown, kick the frame
    /// loop. Only reached after the start gate has approved.
    fn begin_session(game: &Rc<RefCell<Game>>) {
        let was_running = {
            let mut g = game.borrow_mut();
            let was_running = g.state.phase == GamePhase::Running;
            // A stale timer from a previous session must never fire into
            // this one
            g.stop_countdown();
            sim::start(&mut g.state);
            handle_events(&mut g);
            g.accumulator = 0.0;
            g.last_time = 0.0;
            g.update_hud();

            let window = web_sys::window().expect("no window");
            let game_for_timer = game.clone();
            let cb = Closure::<dyn FnMut()>::new(move || {
                countdown_tick(&game_for_timer);
            });
            g.timer_handle = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    1000,
                )
                .ok();
            cb.forget();
            was_running
        };
        // The frame loop is self-cancelling; only kick it when no loop is
        // already in flight
        if !was_running {
            request_animation_frame(game.clone());
        }
    }

    /// 1 Hz countdown callback. Stops itself before end-of-session
    /// notifications go out, so no timer mutation can race the reporting.
    fn countdown_tick(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        sim::second_tick(&mut g.state);
        if g.state.phase == GamePhase::Ended {
            g.stop_countdown();
        }
        handle_events(&mut g);
        g.update_hud();
    }

    /// Resolve the start gate, then begin the session on approval
    fn start_flow(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            if wallet::authorize_start().await {
                begin_session(&game);
            }
            // Declined: UI stays on its pre-start affordance
        });
    }

    // === Frame loop ===

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            handle_events(&mut g);
            g.render(time);
            g.update_hud();

            g.state.phase == GamePhase::Running
        };

        // Self-cancelling loop: reschedule only while the session runs
        if keep_running {
            request_animation_frame(game);
        }
    }

    // === Input wiring ===

    fn setup_color_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all(".color-btn") else {
            log::warn!("no color buttons found");
            return;
        };

        for i in 0..buttons.length() {
            let Some(node) = buttons.item(i) else { continue };
            let Ok(button) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(color) = button
                .get_attribute("data-color")
                .as_deref()
                .and_then(Color::from_name)
            else {
                log::warn!("color button without a valid data-color attribute");
                continue;
            };

            let game = game.clone();
            let button_for_flash = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();

                let outcome = sim::resolve_click(&mut g.state, color);
                if outcome.hits > 0 {
                    flash_button(&button_for_flash, "correct");
                } else if outcome.wrong_matches > 0 {
                    flash_button(&button_for_flash, "wrong");
                }

                handle_events(&mut g);
                g.update_hud();
            });
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["startBtn", "restartBtn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow().audio.resume();
                    start_flow(game.clone());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Mute audio while the tab is hidden (if enabled in settings)
    fn setup_mute_on_blur(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if g.settings.mute_on_blur {
                let hidden =
                    document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                g.audio.set_muted(hidden);
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Color Match Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let settings = Settings::load();
        let best = BestScore::load();
        let leaderboard = Leaderboard::load();

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, settings, best, leaderboard);
        game.renderer = CanvasRenderer::new(&canvas);
        if game.renderer.is_none() {
            log::error!("2d canvas context unavailable");
        }

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_color_buttons(&document, game.clone());
        setup_start_buttons(&document, game.clone());
        setup_mute_on_blur(&document, game.clone());

        // Static first frame behind the start screen
        {
            let g = game.borrow();
            g.render(0.0);
            g.update_hud();
        }

        log::info!("Color Match Rush ready");
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
    log::info!("Color Match Rush (native) starting...");
    log::info!("Run with `trunk serve` for the web version");

    // Headless smoke run of the sim core
    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use color_match_rush::consts::SESSION_SECONDS;
    use color_match_rush::sim::{self, GamePhase, GameState};

    let mut state = GameState::new(0xC0FFEE);
    sim::start(&mut state);

    // One simulated second = 60 frame ticks + 1 countdown tick
    for _ in 0..SESSION_SECONDS {
        for _ in 0..60 {
            sim::tick(&mut state);
            // Greedily click the color of any zone resident
            let resident_color = state.zone_residents().next().map(|c| c.color);
            if let Some(color) = resident_color {
                sim::resolve_click(&mut state, color);
            }
        }
        sim::second_tick(&mut state);
    }

    assert_eq!(state.phase, GamePhase::Ended);
    println!(
        "headless session finished: score {} over {}s",
        state.score, SESSION_SECONDS
    );
}
