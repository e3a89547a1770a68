//! Penalty Shootout entry point
//!
//! In the browser the game mounts when the play button is pressed and tears
//! down when it is closed. Natively it plays scripted rounds headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

    use penalty_shootout::audio::{AudioManager, SoundEffect};
    use penalty_shootout::consts::*;
    use penalty_shootout::platform::{FieldMapper, MountGate};
    use penalty_shootout::platform::web::{EventSubscription, FrameLoop, HostError, document};
    use penalty_shootout::renderer::{RenderState, build_scene};
    use penalty_shootout::reward::reward_banner;
    use penalty_shootout::sim::{GameInput, GameSession, RoundEvent, advance, apply};
    use penalty_shootout::{Settings, Tuning};

    const CANVAS_ID: &str = "canvas";

    thread_local! {
        static ACTIVE: RefCell<Option<ShootoutHost>> = const { RefCell::new(None) };
        static GATE: RefCell<MountGate> = RefCell::new(MountGate::default());
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                session: GameSession::new(Tuning::default()),
                render_state: None,
                audio: AudioManager::new(&settings),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Forward one input to the session
        fn handle(&mut self, input: GameInput) {
            if matches!(input, GameInput::PointerDown(_)) {
                self.audio.resume();
            }
            let events = apply(&mut self.session, &input);
            self.react(&events);
        }

        /// Flip the mute setting and persist it
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
        }

        fn react(&self, events: &[RoundEvent]) {
            for event in events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                match event {
                    RoundEvent::GoalScored { score, shots_taken } => {
                        log::info!("Goal! {}/{}", score, shots_taken);
                    }
                    RoundEvent::ShotMissed { shots_taken } => {
                        log::info!("Missed (shot {})", shots_taken);
                    }
                    RoundEvent::RewardUnlocked { code } => {
                        log::info!("Reward unlocked: {}", code);
                    }
                    _ => {}
                }
            }
        }

        /// Run simulation steps
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = advance(&mut self.session);
                self.react(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.session, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Ok(document) = document() else { return };
            let session = &self.session;

            if let Some(el) = document.get_element_by_id("hud-shots") {
                el.set_text_content(Some(&session.shots_taken.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-goals") {
                el.set_text_content(Some(&session.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("shot-message") {
                el.set_text_content(Some(&session.message));
            }
            if let Some(el) = document.get_element_by_id("intro") {
                let class = if session.started { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("reward-banner") {
                if session.reward_unlocked() {
                    el.set_text_content(Some(&reward_banner(session.tuning.reward_threshold)));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    fn game_loop(game: &Rc<RefCell<Game>>, time: f64) {
        let mut g = game.borrow_mut();

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

    /// Pointer position in field units from page coordinates
    fn field_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        FieldMapper::new(rect.width() as f32, rect.height() as f32).to_field(Vec2::new(
            (client_x - rect.left()) as f32,
            (client_y - rect.top()) as f32,
        ))
    }

    /// A mounted game: dropping it removes every listener and stops the loop
    struct ShootoutHost {
        game: Rc<RefCell<Game>>,
        _frame_loop: FrameLoop,
        _subscriptions: Vec<EventSubscription>,
    }

    impl ShootoutHost {
        async fn mount() -> Result<Self, HostError> {
            let started = js_sys::Date::now();
            let window = web_sys::window().ok_or(HostError::MissingWindow)?;
            let document = document()?;

            let canvas: HtmlCanvasElement = document
                .get_element_by_id(CANVAS_ID)
                .ok_or_else(|| HostError::MissingElement(CANVAS_ID.to_string()))?
                .dyn_into()
                .map_err(|_| HostError::NotACanvas(CANVAS_ID.to_string()))?;

            // Shown before sizing so the canvas has a layout size
            show_container(true);

            // Backing store follows the display size; the scene is always 800×400
            let dpr = window.device_pixel_ratio();
            let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
            let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
            canvas.set_width(width);
            canvas.set_height(height);

            let settings = Settings::load()
                .with_quality_override(canvas.get_attribute("data-quality").as_deref());
            let game = Rc::new(RefCell::new(Game::new(settings)));

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::BROWSER_WEBGPU,
                ..Default::default()
            });

            let surface = instance
                .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
                .map_err(|e| HostError::Gpu(e.to_string()))?;

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|e| HostError::Gpu(e.to_string()))?;

            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state = RenderState::new(surface, &adapter, width, height).await?;
            game.borrow_mut().render_state = Some(render_state);

            let subscriptions = setup_input_handlers(&canvas, &game)?;

            let frame_loop = {
                let game = game.clone();
                FrameLoop::start(move |time| game_loop(&game, time))?
            };

            log::info!("Penalty shootout mounted in {:.0} ms", js_sys::Date::now() - started);

            Ok(Self {
                game,
                _frame_loop: frame_loop,
                _subscriptions: subscriptions,
            })
        }
    }

    impl Drop for ShootoutHost {
        fn drop(&mut self) {
            self.game.borrow_mut().audio.close();
            show_container(false);
            log::info!("Penalty shootout closed");
        }
    }

    fn show_container(visible: bool) {
        let Ok(document) = document() else { return };
        if let Some(container) = document.get_element_by_id("shootout") {
            let _ = container.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<Vec<EventSubscription>, HostError> {
        let mut subscriptions = Vec::new();

        let mouse_handlers: [(&'static str, fn(Vec2) -> GameInput); 3] = [
            ("mousedown", GameInput::PointerDown),
            ("mousemove", GameInput::PointerMove),
            ("mouseup", GameInput::PointerUp),
        ];
        for (kind, to_input) in mouse_handlers {
            let game = game.clone();
            let target = canvas.clone();
            subscriptions.push(EventSubscription::new(canvas, kind, move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let at = field_point(&target, event.client_x() as f64, event.client_y() as f64);
                game.borrow_mut().handle(to_input(at));
            })?);
        }

        // Touch release reports its point through changedTouches
        let touch_handlers: [(&'static str, fn(Vec2) -> GameInput, bool); 3] = [
            ("touchstart", GameInput::PointerDown, false),
            ("touchmove", GameInput::PointerMove, false),
            ("touchend", GameInput::PointerUp, true),
        ];
        for (kind, to_input, changed) in touch_handlers {
            let game = game.clone();
            let target = canvas.clone();
            subscriptions.push(EventSubscription::new(canvas, kind, move |event: Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else { return };
                event.prevent_default();
                let list = if changed {
                    event.changed_touches()
                } else {
                    event.touches()
                };
                let Some(touch) = list.get(0) else { return };
                let at = field_point(&target, touch.client_x() as f64, touch.client_y() as f64);
                game.borrow_mut().handle(to_input(at));
            })?);
        }

        Ok(subscriptions)
    }

    fn open() {
        if !GATE.with(|g| g.borrow_mut().try_begin()) {
            return;
        }

        wasm_bindgen_futures::spawn_local(async {
            let mounted = ShootoutHost::mount().await;
            let keep = GATE.with(|g| g.borrow_mut().finish(mounted.is_ok()));
            match mounted {
                Ok(host) if keep => ACTIVE.with(|a| *a.borrow_mut() = Some(host)),
                Ok(host) => {
                    log::info!("Closed while opening; discarding");
                    drop(host);
                }
                Err(e) => {
                    log::error!("Failed to open penalty shootout: {}", e);
                    show_container(false);
                }
            }
        });
    }

    fn close() {
        if GATE.with(|g| g.borrow_mut().request_close()) {
            // Take first so Drop runs without the slot borrowed
            let host = ACTIVE.with(|a| a.borrow_mut().take());
            drop(host);
        } else {
            show_container(false);
        }
    }

    fn setup_page_buttons() -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::MissingWindow)?;
        let document = document()?;

        if let Some(btn) = document.get_element_by_id("play-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| open());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("close-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| close());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    "Escape" => close(),
                    "m" | "M" => ACTIVE.with(|a| {
                        if let Some(host) = a.borrow().as_ref() {
                            host.game.borrow_mut().toggle_mute();
                        }
                    }),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Penalty Shootout loaded");

        if let Err(e) = setup_page_buttons() {
            log::error!("Failed to wire page buttons: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), penalty_shootout::TuningError> {
    use glam::Vec2;
    use penalty_shootout::Tuning;
    use penalty_shootout::sim::{GameInput, GameSession, apply};

    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_file(path)?
        }
        None => Tuning::default(),
    };

    let scenarios = [
        ("scoring shot", Vec2::new(420.0, 250.0)),
        ("sideways drag", Vec2::new(500.0, 330.0)),
    ];

    for (name, release) in scenarios {
        log::info!("Scenario: {}", name);
        let mut session = GameSession::new(tuning);
        let ball = session.ball.pos;

        let mut events = Vec::new();
        for input in [
            GameInput::PointerDown(ball),
            GameInput::PointerMove(release),
            GameInput::PointerUp(release),
        ] {
            events.extend(apply(&mut session, &input));
        }
        events.extend(session.run_until_settled(10_000));

        for event in &events {
            log::info!("  {:?}", event);
        }
        log::info!(
            "  phase {:?}, score {}/{}, \"{}\"",
            session.phase,
            session.score,
            session.shots_taken,
            session.message
        );

        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(&session) {
                Ok(json) => log::debug!("  snapshot: {}", json),
                Err(e) => log::warn!("  snapshot failed: {}", e),
            }
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}
