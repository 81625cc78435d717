//! Invisible Arena entry point
//!
//! Web: canvas renderer, keyboard listeners and a requestAnimationFrame loop.
//! Native: headless demo driven by the autopilot, printed as text.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent,
    };

    use invisible_arena::consts::CANVAS_SIZE;
    use invisible_arena::renderer::CanvasRenderer;
    use invisible_arena::sim::input::action_for;
    use invisible_arena::{FrameLoop, LoopStatus, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        frame_loop: FrameLoop,
        renderer: CanvasRenderer,
        settings: Settings,
        /// Whether a frame callback is currently scheduled
        running: bool,
        /// Newest log entry already written to the DOM
        last_log_id: Option<u64>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer, settings: Settings) -> Self {
            Self {
                session: Session::new(seed),
                frame_loop: FrameLoop::new(),
                renderer,
                settings,
                running: false,
                last_log_id: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Tick, draw and refresh the HUD
        fn frame(&mut self, time: f64) -> LoopStatus {
            let status = self.frame_loop.frame(&mut self.session, &mut self.renderer);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            self.update_hud();
            status
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.session.hud();

            set_text(&document, "hud-lives", &hud.integrity_label());
            set_text(&document, "hud-score", &hud.score.to_string());
            set_text(&document, "hud-proximity", &hud.proximity_label());
            if let Some(el) = document.get_element_by_id("hud-proximity-icon") {
                let class = if hud.proximity_ping() { "ping" } else { "" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Rebuild the log panel only when a new entry arrived
            let newest = hud.log.first().map(|e| e.id);
            if newest != self.last_log_id {
                if let Some(el) = document.get_element_by_id("kernel-log") {
                    let html: String = hud
                        .log
                        .iter()
                        .map(|e| {
                            format!(
                                "<div class=\"log-entry\"><div>{}</div><div class=\"log-time\">{}</div></div>",
                                e.message, e.timestamp
                            )
                        })
                        .collect();
                    el.set_inner_html(&html);
                }
                self.last_log_id = newest;
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if hud.game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if hud.game_over {
                set_text(&document, "final-score", &hud.score.to_string());
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.frame_loop = FrameLoop::new();
            self.last_log_id = None;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn new_seed(settings: &Settings) -> u64 {
        settings.seed_or(js_sys::Date::now() as u64)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Invisible Arena starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_SIZE as u32);
        canvas.set_height(CANVAS_SIZE as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = new_seed(&settings);
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            CanvasRenderer::new(ctx),
            settings,
        )));

        setup_input_handlers(&window, game.clone());
        setup_restart_button(&document, game.clone());
        setup_focus_loss(&window, game.clone());
        setup_page_lifecycle(&window, game.clone());

        start_loop(game);

        log::info!("Invisible Arena running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: record intent, keep arrows and space from scrolling the page
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if action_for(&key).is_some() {
                    event.prevent_default();
                }
                game.borrow_mut().session.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("reboot-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let was_running = {
                    let mut g = game.borrow_mut();
                    let seed = new_seed(&g.settings);
                    g.restart(seed);
                    g.running
                };
                if !was_running {
                    start_loop(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keyups are lost while the window is unfocused, so forget held keys
    fn setup_focus_loss(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().session.release_keys();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop ticking when the page is hidden. A page kept in the back/forward
    /// cache (`persisted`) comes back through `pageshow`, which resumes the loop.
    fn setup_page_lifecycle(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let mut g = game.borrow_mut();
                g.frame_loop.handle().cancel();
                if event.persisted() {
                    log::info!("Page suspended");
                    g.session.release_keys();
                } else {
                    g.session.teardown();
                }
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let restart = {
                    let g = game.borrow();
                    g.frame_loop.handle().resume();
                    !g.running && !g.session.is_over()
                };
                log::info!("Page restored");
                if restart {
                    start_loop(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().running = true;
        request_animation_frame(game);
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
        let status = game.borrow_mut().frame(time);
        if status.is_running() {
            request_animation_frame(game);
        } else {
            log::info!("Frame loop stopped: {:?}", status);
            game.borrow_mut().running = false;
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use invisible_arena::demo::Autopilot;
    use invisible_arena::renderer::AsciiRenderer;
    use invisible_arena::{FrameLoop, Session, Settings};

    env_logger::init();

    let settings = Settings::load();
    let fallback = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let seed = settings.seed_or(fallback);
    log::info!("Invisible Arena (native) starting, seed {}", seed);

    let mut session = Session::new(seed);
    let mut renderer = AsciiRenderer::new();
    let mut frame_loop = FrameLoop::new();
    let mut pilot = Autopilot::new();

    let status = frame_loop.run_for(
        &mut session,
        &mut renderer,
        u64::from(settings.demo_frames),
        |s| pilot.drive(s),
    );
    session.teardown();
    log::info!(
        "Demo finished after {} frames ({:?})",
        frame_loop.frames(),
        status
    );

    let hud = session.hud();
    println!("{}", renderer.frame());
    println!(
        "INTEGRITY {}  DATA_SECURED {}  PROX {}",
        hud.integrity_label(),
        hud.score,
        hud.proximity_label()
    );
    for entry in &hud.log {
        println!("[{}] {}", entry.timestamp, entry.message);
    }
    if let Some(message) = hud.final_message() {
        println!("{}", message);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
