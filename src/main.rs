//! Lane Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, TouchEvent};

    use lane_dash::audio::AudioManager;
    use lane_dash::persistence;
    use lane_dash::platform::{Haptics, LocalStorageStore, SwipeRecognizer, intent_for_key};
    use lane_dash::renderer::RenderState;
    use lane_dash::sim::{GameEvent, GameState, Intent, SessionPhase, SoundCue, TickInput, tick};
    use lane_dash::{AchievementId, Difficulty, Settings, Tuning};

    /// Vibration for UI buttons (ms)
    const CLICK_VIBRATE_MS: u32 = 50;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        swipe: SwipeRecognizer,
        store: LocalStorageStore,
        audio: AudioManager,
        haptics: Haptics,
        last_time: f64,
        /// Frame time at which the current message hides
        message_until: Option<f64>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = LocalStorageStore::new();
            let profile = persistence::load(&store);
            let audio = AudioManager::new(profile.settings.sound);
            let haptics = Haptics::new(profile.settings.vibration);
            Self {
                state: GameState::new(seed, profile, Tuning::default()),
                render_state: None,
                input: TickInput::default(),
                swipe: SwipeRecognizer::default(),
                store,
                audio,
                haptics,
                last_time: 0.0,
                message_until: None,
            }
        }

        /// Run one simulation tick
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            tick(&mut self.state, &self.input, dt);
            self.input.clear();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state.snapshot()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Route queued simulation events to audio, haptics and the DOM
        fn dispatch_events(&mut self, document: &Document, time: f64) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::Vibrate { duration_ms } => self.haptics.vibrate(duration_ms),
                    GameEvent::Message { text, duration_ms } => {
                        set_text(document, "message", &text);
                        set_hidden(document, "message", false);
                        self.message_until = Some(time + duration_ms as f64);
                    }
                    GameEvent::PhaseChanged(phase) => {
                        show_screen(document, phase);
                        if phase == SessionPhase::Idle {
                            render_menu_lists(document, &self.state);
                        }
                    }
                    GameEvent::SpeedUp { speed } => {
                        log::debug!("World speed now {}", speed);
                    }
                    GameEvent::AchievementUnlocked(id) => {
                        log::debug!("Unlocked {}", id.key());
                    }
                    GameEvent::SessionEnded {
                        score,
                        distance,
                        time_secs,
                        rank,
                        quote,
                    } => {
                        set_text(document, "final-score", &score.to_string());
                        set_text(document, "final-distance", &format!("{}m", distance));
                        set_text(document, "final-time", &format!("{}s", time_secs));
                        let rank_text = match rank {
                            Some(1) => "New high score!".to_string(),
                            Some(r) => format!("Rank #{}", r),
                            None => String::new(),
                        };
                        set_text(document, "final-rank", &rank_text);
                        set_text(document, "final-quote", &quote);
                    }
                }
            }

            if self.message_until.is_some_and(|until| time >= until) {
                set_hidden(document, "message", true);
                self.message_until = None;
            }
        }

        /// Write the profile if the simulation changed it
        fn save_if_dirty(&mut self) {
            if self.state.take_profile_dirty() {
                if let Err(e) = persistence::save(&mut self.store, &self.state.profile) {
                    log::warn!("Failed to save profile: {}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if self.state.phase != SessionPhase::Playing {
                return;
            }
            let hud = self.state.hud();
            set_text(document, "hud-score", &hud.score.to_string());
            set_text(document, "hud-distance", &format!("{}m", hud.distance));
            set_text(document, "hud-health", &format!("{}%", hud.health));
            if let Some(el) = document.get_element_by_id("hud-health-bar") {
                let _ = el.set_attribute("style", &format!("width: {}%", hud.health));
            }

            let power_ups: Vec<String> = hud
                .power_ups
                .iter()
                .map(|p| format!("{} {}s", p.icon, p.secs_left))
                .collect();
            set_text(document, "hud-powerups", &power_ups.join(" "));
        }

        /// Button feedback
        fn click(&self) {
            self.audio.play(SoundCue::Click);
            self.haptics.vibrate(CLICK_VIBRATE_MS);
        }

        fn apply_settings(&mut self, settings: Settings) {
            self.audio.set_muted(!settings.sound);
            self.haptics.enabled = settings.vibration;
            self.state.update_settings(settings);
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Show the screen that belongs to a phase and hide the rest
    fn show_screen(document: &Document, phase: SessionPhase) {
        let screens = [
            ("loading-screen", SessionPhase::Loading),
            ("menu-screen", SessionPhase::Idle),
            ("pause-screen", SessionPhase::Paused),
            ("gameover-screen", SessionPhase::GameOver),
        ];
        for (id, screen_phase) in screens {
            set_hidden(document, id, phase != screen_phase);
        }
        let in_run = matches!(phase, SessionPhase::Playing | SessionPhase::Paused);
        set_hidden(document, "hud", !in_run);
    }

    /// Fill the menu's high score and achievement lists
    fn render_menu_lists(document: &Document, state: &GameState) {
        if let Some(el) = document.get_element_by_id("highscores-list") {
            let rows: String = if state.profile.high_scores.is_empty() {
                "<li>No runs yet</li>".to_string()
            } else {
                state
                    .profile
                    .high_scores
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        format!(
                            "<li>#{} {} pts · {}m · {}s · {}</li>",
                            i + 1,
                            e.score,
                            e.distance,
                            e.time,
                            e.date
                        )
                    })
                    .collect()
            };
            el.set_inner_html(&rows);
        }

        if let Some(el) = document.get_element_by_id("achievements-list") {
            let rows: String = state
                .profile
                .achievements
                .iter()
                .map(|a| {
                    let info = a.id.info();
                    let progress = match (a.progress, info.target) {
                        (Some(p), Some(t)) if !a.unlocked => format!(" ({}/{})", p, t),
                        _ => String::new(),
                    };
                    let class = if a.unlocked { "unlocked" } else { "locked" };
                    format!(
                        "<li class=\"{}\">{} {} - {}{}</li>",
                        class, info.icon, info.title, info.description, progress
                    )
                })
                .collect();
            el.set_inner_html(&rows);
        }

        let unlocked = state.profile.achievements.unlocked_count();
        set_text(
            document,
            "achievements-count",
            &format!("{}/{}", unlocked, AchievementId::ALL.len()),
        );
    }

    /// Host's display date for the high score table
    fn today() -> String {
        js_sys::Date::new_0()
            .to_locale_date_string("default", &JsValue::UNDEFINED)
            .into()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(canvas.clone(), width, height).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::error!("WebGPU unavailable - running without graphics"),
        }

        sync_settings_ui(&document, &game.borrow().state.profile.settings);
        show_screen(&document, SessionPhase::Loading);

        setup_keyboard(game.clone());
        setup_touch(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_settings(&document, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Lane Dash running!");
    }

    async fn init_renderer(canvas: HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| log::error!("{}", e))
            .ok()
    }

    fn sync_settings_ui(document: &Document, settings: &Settings) {
        if let Some(input) = element::<HtmlInputElement>(document, "sound-toggle") {
            input.set_checked(settings.sound);
        }
        if let Some(input) = element::<HtmlInputElement>(document, "vibration-toggle") {
            input.set_checked(settings.vibration);
        }
        if let Some(select) = element::<HtmlSelectElement>(document, "difficulty-select") {
            select.set_value(settings.difficulty.as_str());
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(intent) = intent_for_key(&event.code()) else {
                return;
            };
            event.prevent_default();

            let mut g = game.borrow_mut();
            if intent == Intent::Pause && g.state.phase == SessionPhase::Paused {
                g.state.resume();
                g.last_time = 0.0;
            } else {
                g.input.push(intent);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .swipe
                        .begin(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Keep the page from scrolling under a swipe
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if let Some(intent) = g
                    .swipe
                    .end(touch.client_x() as f32, touch.client_y() as f32)
                {
                    g.input.push(intent);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().swipe.cancel();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Attach a click handler that plays the button cue first
    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: impl Fn(&mut Game) + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio.resume();
            g.click();
            action(&mut *g);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let start = |g: &mut Game| {
            g.last_time = 0.0;
            g.state.start(today());
        };
        on_click(document, "play-btn", game.clone(), start);
        on_click(document, "restart-btn", game.clone(), start);
        on_click(document, "menu-btn", game.clone(), |g| {
            g.state.return_to_menu();
        });
        on_click(document, "pause-btn", game.clone(), |g| {
            g.input.push(Intent::Pause);
        });
        on_click(document, "resume-btn", game.clone(), |g| {
            g.last_time = 0.0;
            g.state.resume();
        });
        on_click(document, "quit-btn", game.clone(), |g| {
            g.state.end();
        });
        on_click(document, "reset-data-btn", game, |g| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Reset all scores and achievements?").ok())
                .unwrap_or(false);
            if confirmed {
                g.state.reset_profile();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    render_menu_lists(&document, &g.state);
                }
            }
        });
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["sound-toggle", "vibration-toggle", "difficulty-select"] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                let mut settings = g.state.profile.settings.clone();
                if let Some(input) = element::<HtmlInputElement>(&document, "sound-toggle") {
                    settings.sound = input.checked();
                }
                if let Some(input) = element::<HtmlInputElement>(&document, "vibration-toggle") {
                    settings.vibration = input.checked();
                }
                if let Some(select) = element::<HtmlSelectElement>(&document, "difficulty-select") {
                    settings.difficulty = Difficulty::from_str(&select.value()).unwrap_or_default();
                }
                g.apply_settings(settings);
                g.click();
            });
            let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
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
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();
            g.update(time);
            g.dispatch_events(&document, time);
            g.save_if_dirty();
            g.render();
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && game.borrow_mut().state.pause()
                {
                    log::info!("Auto-paused (tab hidden)");
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
                if game.borrow_mut().state.pause() {
                    log::info!("Auto-paused (window blur)");
                }
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
    env_logger::init();
    log::info!("Lane Dash (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(&path),
        None => lane_dash::Tuning::default(),
    };
    headless_run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Read a tuning override file, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> lane_dash::Tuning {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| lane_dash::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            lane_dash::Tuning::default()
        }
    }
}

/// Play one run with a simple dodging bot and print the result
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(tuning: lane_dash::Tuning) {
    use lane_dash::consts::*;
    use lane_dash::persistence::{self, MemoryStore};
    use lane_dash::sim::{GameEvent, GameState, Intent, SessionPhase, TickInput, tick};

    const DT_MS: f64 = 1000.0 / 60.0;
    const MAX_TICKS: u32 = 60 * 180;
    /// How far ahead the bot looks for hazards
    const LOOKAHEAD: f32 = 70.0;

    let mut store = MemoryStore::new();
    let profile = persistence::load(&store);
    let mut state = GameState::new(42, profile, tuning);

    tick(&mut state, &TickInput::default(), LOADING_DELAY_MS);
    state.start("native");

    let mut input = TickInput::default();
    let mut ticks = 0;
    while state.phase == SessionPhase::Playing && ticks < MAX_TICKS {
        let player = state.player.aabb();
        let threat = state
            .obstacles
            .iter()
            .map(|o| (o.aabb(), o.kind.is_airborne()))
            .chain(state.enemies.iter().map(|e| (e.aabb(), false)))
            .find(|(aabb, _)| {
                aabb.min.x < player.max.x + LOOKAHEAD
                    && aabb.max.x > player.min.x
                    && aabb.min.x > player.min.x
            });
        match threat {
            Some((_, true)) => input.push(if state.player.lane == 0 {
                Intent::MoveRight
            } else {
                Intent::MoveLeft
            }),
            Some((_, false)) => input.push(Intent::Jump),
            None => {}
        }

        tick(&mut state, &input, DT_MS);
        input.clear();
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Message { text, .. } => log::info!("[msg] {}", text),
                GameEvent::SessionEnded { .. } => log::info!("[end] {:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }
        if state.take_profile_dirty() {
            if let Err(e) = persistence::save(&mut store, &state.profile) {
                log::warn!("Failed to save profile: {}", e);
            }
        }
    }

    if state.phase == SessionPhase::Playing {
        state.end();
        state.drain_events();
        if let Err(e) = persistence::save(&mut store, &state.profile) {
            log::warn!("Failed to save profile: {}", e);
        }
    }
    let hud = state.hud();
    println!(
        "Run finished after {} ticks: score {}, distance {}m, health {}, {} achievements",
        ticks,
        hud.score,
        hud.distance,
        hud.health,
        state.profile.achievements.unlocked_count()
    );
}
