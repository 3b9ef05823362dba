//! Shrimp Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        MouseEvent, TouchEvent,
    };

    use glam::Vec2;
    use shrimp_catch::audio::{AudioManager, SoundEffect};
    use shrimp_catch::consts::*;
    use shrimp_catch::fx::{self, EffectKind, Effects};
    use shrimp_catch::sim::{
        ClickMarker, GamePhase, GameSession, Target, TargetKind, Viewport, tick, to_logical,
    };
    use shrimp_catch::{Presenter, Tuning};

    /// Sprites, loaded once and shared for the page lifetime
    struct Sprites {
        shrimp: Option<HtmlImageElement>,
        golden_shrimp: Option<HtmlImageElement>,
        bomb: Option<HtmlImageElement>,
        octopus: Option<HtmlImageElement>,
    }

    impl Sprites {
        fn load() -> Self {
            fn image(src: &str) -> Option<HtmlImageElement> {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(src);
                Some(img)
            }
            Self {
                shrimp: image("./images/shrimp1.png"),
                golden_shrimp: image("./images/shrimp2.png"),
                bomb: image("./images/shrimp3.png"),
                octopus: image("./images/oct1.png"),
            }
        }

        /// Image for a kind, if it finished loading
        fn get(&self, kind: TargetKind) -> Option<&HtmlImageElement> {
            let img = match kind {
                TargetKind::Shrimp => &self.shrimp,
                TargetKind::GoldenShrimp => &self.golden_shrimp,
                TargetKind::Bomb => &self.bomb,
                TargetKind::Octopus => &self.octopus,
            };
            img.as_ref().filter(|i| i.complete() && i.natural_width() > 0)
        }
    }

    /// Canvas + DOM side of the game
    struct WebPresenter {
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        sprites: Sprites,
        fx: Effects,
        audio: AudioManager,
    }

    impl WebPresenter {
        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn set_visible(&self, id: &str, display: &str, visible: bool) {
            if let Some(el) = self.element(id) {
                let _ = el
                    .style()
                    .set_property("display", if visible { display } else { "none" });
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Match the backing store to the viewport and reset the transform
        fn apply_viewport(&mut self, view: Viewport) {
            self.canvas.set_width(view.width.round() as u32);
            self.canvas.set_height(view.height.round() as u32);
            let s = view.scale as f64;
            let _ = self.ctx.set_transform(s, 0.0, 0.0, s, 0.0, 0.0);
        }

        fn draw_target(&self, target: &Target) {
            let ctx = &self.ctx;
            ctx.save();
            let _ = ctx.translate(target.pos.x as f64, target.pos.y as f64);
            let _ = ctx.rotate(target.rotation as f64);

            let draw_size = match target.kind {
                TargetKind::Octopus => target.size * 2.5,
                _ => target.size * 2.0,
            } as f64;

            if let Some(img) = self.sprites.get(target.kind) {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    -draw_size / 2.0,
                    -draw_size / 2.0,
                    draw_size,
                    draw_size,
                );
            } else {
                // Sprite missing: plain disc so the game stays playable
                ctx.begin_path();
                let _ = ctx.arc(0.0, 0.0, target.size as f64, 0.0, std::f64::consts::TAU);
                ctx.set_fill_style_str(fx::hit_color(target.kind));
                ctx.fill();
            }
            ctx.restore();
        }

        fn draw_marker(&self, marker: &ClickMarker) {
            let ctx = &self.ctx;
            let color = if marker.hit { "#00FF00" } else { "#FF0000" };
            let (x, y) = (marker.pos.x as f64, marker.pos.y as f64);

            ctx.begin_path();
            let _ = ctx.arc(x, y, 10.0, 0.0, std::f64::consts::TAU);
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(3.0);
            ctx.stroke();

            ctx.begin_path();
            let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::TAU);
            ctx.set_fill_style_str(color);
            ctx.fill();
        }

        fn draw_effects(&self) {
            let ctx = &self.ctx;
            for effect in self.fx.iter() {
                if let EffectKind::HitRing { pos, radius, kind } = effect.kind {
                    ctx.save();
                    ctx.set_global_alpha(effect.alpha() as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        pos.x as f64,
                        pos.y as f64,
                        radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.set_stroke_style_str(fx::hit_color(kind));
                    ctx.set_line_width(3.0);
                    ctx.stroke();
                    ctx.restore();
                }
            }

            let flash = self.fx.flash_alpha();
            if flash > 0.0 {
                ctx.save();
                ctx.set_global_alpha(flash as f64 * 0.5);
                ctx.set_fill_style_str("#FFFFFF");
                ctx.fill_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);
                ctx.restore();
            }

            if let Some(level) = self.fx.banner_level() {
                ctx.save();
                ctx.set_fill_style_str("#FFD700");
                ctx.set_text_align("center");
                ctx.set_font("bold 48px sans-serif");
                let cx = LOGICAL_WIDTH as f64 / 2.0;
                let cy = LOGICAL_HEIGHT as f64 / 2.0;
                let _ = ctx.fill_text("LEVEL UP!", cx, cy - 20.0);
                ctx.set_font("bold 72px sans-serif");
                let _ = ctx.fill_text(&level.to_string(), cx, cy + 60.0);
                ctx.restore();
            }
        }
    }

    impl Presenter for WebPresenter {
        fn render_frame(&mut self, targets: &[Target], marker: Option<&ClickMarker>) {
            self.ctx
                .clear_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);
            for target in targets.iter().filter(|t| t.active) {
                self.draw_target(target);
            }
            if let Some(marker) = marker {
                self.draw_marker(marker);
            }
            self.draw_effects();
        }

        fn update_stats(&mut self, score: u64, hp: i32, level: u32) {
            self.set_text("score", &score.to_string());
            self.set_text("hp", &hp.to_string());
            self.set_text("level", &level.to_string());
        }

        fn on_level_up(&mut self, level: u32) {
            self.fx.level_up(level);
            self.audio.play(SoundEffect::LevelUp);
        }

        fn on_game_over(&mut self, score: u64, level: u32) {
            self.set_text("finalScore", &score.to_string());
            self.set_text("finalLevel", &level.to_string());
            self.set_visible("gameOverModal", "flex", true);
            self.audio.play(SoundEffect::GameOver);
        }

        fn on_quit(&mut self, score: u64, level: u32) {
            self.set_text("completionScore", &score.to_string());
            self.set_text("completionLevel", &level.to_string());
            self.set_visible("completionModal", "flex", true);
        }

        fn on_countdown(&mut self, remaining: u8) {
            if let Ok(Some(el)) = self.document.query_selector("#countdown .countdown-number") {
                el.set_text_content(Some(&remaining.to_string()));
            }
            self.audio.play(SoundEffect::CountdownBeep);
        }

        fn on_phase_change(&mut self, phase: GamePhase) {
            log::info!("Phase: {:?}", phase);
            self.set_visible("startScreen", "flex", phase == GamePhase::Idle);
            self.set_visible("countdown", "flex", phase == GamePhase::Countdown);
            self.set_visible("quitButton", "block", phase == GamePhase::Running);
            if phase == GamePhase::Countdown {
                self.set_visible("gameOverModal", "flex", false);
                self.set_visible("completionModal", "flex", false);
                self.fx.clear();
            }
        }

        fn on_hit(&mut self, target: &Target) {
            self.fx.hit_ring(target);
            self.audio.play(SoundEffect::for_hit(target.kind));
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        presenter: WebPresenter,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.presenter.fx.advance(dt);
            tick(&mut self.session, dt.min(0.25), &mut self.presenter);
        }

        /// Refit canvas to its container
        fn resize(&mut self) {
            let Some(container) = self.presenter.canvas.parent_element() else {
                return;
            };
            match self.session.resize(container.client_width() as f32) {
                Ok(_) => self.presenter.apply_viewport(self.session.viewport()),
                Err(e) => log::warn!("Resize ignored: {e}"),
            }
        }

        /// Forward a pointer position given in client (page) coordinates
        fn pointer(&mut self, client_x: f64, client_y: f64) {
            let rect = self.presenter.canvas.get_bounding_client_rect();
            let physical = Vec2::new(
                (client_x - rect.left()) as f32,
                (client_y - rect.top()) as f32,
            );
            let result = to_logical(physical, rect.width() as f32)
                .and_then(|p| self.session.pointer_input(p.x, p.y));
            if let Err(e) = result {
                log::warn!("Pointer ignored: {e}");
            }
        }
    }

    /// Build any UI pieces the page doesn't provide itself
    fn ensure_overlays(document: &Document) -> Result<(), JsValue> {
        let Some(container) = document.query_selector(".game-container")? else {
            return Ok(());
        };

        if document.get_element_by_id("completionModal").is_none() {
            let modal = document.create_element("div")?;
            modal.set_id("completionModal");
            modal.set_class_name("overlay");
            modal.set_attribute("style", "display: none")?;
            modal.set_inner_html(
                r#"<div class="modal-content completion">
                    <h2>Nice work!</h2>
                    <p>Score: <span id="completionScore">0</span></p>
                    <p>Level: <span id="completionLevel">1</span></p>
                    <button id="completionRestartButton" class="game-button">Play again</button>
                </div>"#,
            );
            container.append_child(&modal)?;
        }

        if document.get_element_by_id("quitButton").is_none() {
            let quit = document.create_element("button")?;
            quit.set_id("quitButton");
            quit.set_class_name("quit-button");
            quit.set_text_content(Some("Quit"));
            quit.set_attribute("style", "display: none")?;
            container.append_child(&quit)?;
        }
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Shrimp Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        ensure_overlays(&document)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(seed, Tuning::default()),
            presenter: WebPresenter {
                document: document.clone(),
                canvas: canvas.clone(),
                ctx,
                sprites: Sprites::load(),
                fx: Effects::new(),
                audio: AudioManager::new(),
            },
            last_time: 0.0,
        }));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            g.resize();
            let view = g.session.viewport();
            g.presenter.apply_viewport(view);
            g.presenter.on_phase_change(GamePhase::Idle);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Shrimp Catch running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .pointer(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "startButton", game.clone(), |g| {
            g.session.start();
        });
        on_click(document, "restartButton", game.clone(), |g| {
            g.session.restart();
        });
        on_click(document, "completionRestartButton", game.clone(), |g| {
            g.session.restart();
        });
        on_click(document, "quitButton", game, |g| {
            g.session.quit();
        });
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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

/// Headless autoplay: taps the topmost on-field target every few frames
/// until the run ends, then prints the final scoreboard.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use shrimp_catch::consts::*;
    use shrimp_catch::sim::{ClickMarker, GamePhase, GameSession, Target, tick};
    use shrimp_catch::{GameError, Presenter, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const TAP_EVERY: u64 = 20;
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
        hits: u32,
    }

    impl Presenter for LogPresenter {
        fn render_frame(&mut self, _targets: &[Target], _marker: Option<&ClickMarker>) {
            self.frames += 1;
        }

        fn update_stats(&mut self, score: u64, hp: i32, level: u32) {
            log::debug!("score {score} hp {hp} level {level}");
        }

        fn on_level_up(&mut self, level: u32) {
            log::info!("LEVEL UP! {level}");
        }

        fn on_game_over(&mut self, score: u64, level: u32) {
            log::info!("Game over: score {score}, level {level}");
        }

        fn on_quit(&mut self, score: u64, level: u32) {
            log::info!("Quit: score {score}, level {level}");
        }

        fn on_countdown(&mut self, remaining: u8) {
            log::info!("{remaining}...");
        }

        fn on_hit(&mut self, target: &Target) {
            self.hits += 1;
            log::info!("Tapped {} #{}", target.kind.as_str(), target.id);
        }
    }

    fn on_field(t: &Target) -> bool {
        t.active
            && (0.0..=LOGICAL_WIDTH).contains(&t.pos.x)
            && (0.0..=LOGICAL_HEIGHT).contains(&t.pos.y)
    }

    pub fn run() -> Result<(), GameError> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s
                .parse::<u64>()
                .map_err(|e| GameError::InvalidInput(format!("seed {s:?}: {e}")))?,
            None => 42,
        };
        let tuning = match args.next() {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(&path)?)?,
            None => Tuning::default(),
        };

        let mut session = GameSession::new(seed, tuning);
        let mut presenter = LogPresenter::default();
        log::info!("Autoplay with seed {seed}");

        session.start();
        while session.phase == GamePhase::Countdown {
            tick(&mut session, FRAME_DT, &mut presenter);
        }

        let mut frame = 0u64;
        while session.phase == GamePhase::Running {
            if frame % TAP_EVERY == 0 {
                if let Some(t) = session.targets.iter().rev().find(|t| on_field(t)) {
                    let (x, y) = (t.pos.x, t.pos.y);
                    session.pointer_input(x, y)?;
                }
            }
            if frame == MAX_FRAMES {
                session.quit();
            }
            tick(&mut session, FRAME_DT, &mut presenter);
            frame += 1;
        }

        log::info!(
            "{} frames ({} running), {} hits, final {:?}",
            presenter.frames,
            session.time_ticks,
            presenter.hits,
            session.phase
        );
        println!("{}", serde_json::to_string_pretty(&session.stats)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Shrimp Catch (native) starting...");
    log::info!("Native mode runs a headless autoplay - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
