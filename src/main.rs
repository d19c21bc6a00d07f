//! Bouncing Balls entry point
//!
//! Sets up the platform, then drives the world once per frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use bouncing_balls::Settings;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use bouncing_balls::display::Scene;
    use bouncing_balls::settings::QualityPreset;
    use bouncing_balls::{FrameClock, Settings, World};

    /// App instance holding all state
    struct App {
        world: World,
        scene: Scene,
        clock: FrameClock,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        /// Advance the simulation by the time since the last frame and draw
        fn frame(&mut self, now_ms: f64) {
            let elapsed = self.clock.advance(now_ms);
            let report = self.world.frame(elapsed);
            if report.bounces > 0 {
                log::debug!(
                    "frame {}: {} bounce(s) over {:.2} ms",
                    self.world.frames,
                    report.bounces,
                    report.elapsed_ms
                );
            }

            self.scene.sync(&self.world);
            self.draw();
        }

        /// Match the canvas to the window and re-center the scene
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);

            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.scene.recenter(width as f32, height as f32);
        }

        fn draw(&self) {
            let ctx = &self.ctx;
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            let max_segments = self.settings.quality.circle_segments();

            ctx.set_fill_style_str(&self.settings.background);
            ctx.fill_rect(0.0, 0.0, width, height);

            ctx.set_fill_style_str(&self.settings.ball_color);
            for handle in &self.scene.balls {
                trace_polygon(ctx, &handle.polygon(self.scene.origin, max_segments));
                ctx.fill();
            }

            ctx.set_stroke_style_str(&self.settings.boundary_color);
            ctx.set_line_width(self.settings.boundary_line_width as f64);
            trace_polygon(
                ctx,
                &self.scene.boundary.polygon(self.scene.origin, max_segments),
            );
            ctx.stroke();
        }

        /// Step to the next quality preset and persist it
        fn cycle_quality(&mut self) {
            self.settings.quality = match self.settings.quality {
                QualityPreset::Low => QualityPreset::Medium,
                QualityPreset::Medium => QualityPreset::High,
                QualityPreset::High => QualityPreset::Low,
            };
            log::info!("Quality: {}", self.settings.quality.as_str());
            self.settings.save();
        }
    }

    fn trace_polygon(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
        ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            ctx.close_path();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Trace);
        log::set_max_level(log::LevelFilter::Info);

        log::info!("Bouncing Balls starting...");

        let settings = Settings::load();
        log::set_max_level(settings.level_filter());

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        body.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let mut world = World::new(seed);
        world.set_paused(settings.start_paused);
        log::info!("World initialized with seed: {}", seed);

        let scene = Scene::new(&world, &settings);
        let app = Rc::new(RefCell::new(App {
            world,
            scene,
            clock: FrameClock::starting_at(js_sys::Date::now()),
            settings,
            canvas,
            ctx,
        }));
        app.borrow_mut().resize();

        setup_resize_handler(app.clone());
        setup_keyboard(app.clone());

        request_animation_frame(app);

        log::info!("Bouncing Balls running!");
        Ok(())
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                " " | "p" | "P" => a.world.toggle_pause(),
                "q" | "Q" => a.cycle_quality(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame(js_sys::Date::now());
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // RUST_LOG wins; otherwise the settings file picks the level
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .init();
    if !from_env {
        log::set_max_level(log::LevelFilter::Info);
    }
    log::info!("Bouncing Balls (native, headless) starting...");

    let settings = Settings::load();
    if !from_env {
        log::set_max_level(settings.level_filter());
    }

    run_headless(&settings);
}

/// Drive the world with a synthetic 60 Hz clock and log what happens
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &Settings) {
    use bouncing_balls::consts::MAX_FRAME_MS;
    use bouncing_balls::display::Scene;
    use bouncing_balls::{FrameClock, World};

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut world = World::new(seed);
    world.set_paused(settings.start_paused);
    let mut scene = Scene::new(&world, settings);
    scene.recenter(800.0, 600.0);
    let mut clock = FrameClock::starting_at(0.0);

    log::info!(
        "World initialized with seed: {} ({} frames)",
        seed,
        settings.native_frames
    );

    let mut now_ms = 0.0;
    let mut bounces = 0;
    for _ in 0..settings.native_frames {
        now_ms += MAX_FRAME_MS;
        let report = world.frame(clock.advance(now_ms));
        bounces += report.bounces;

        if report.bounces > 0 {
            log::debug!(
                "frame {}: {} bounce(s) over {:.2} ms",
                world.frames,
                report.bounces,
                report.elapsed_ms
            );
        }
        if world.frames > 0 && world.frames % 60 == 0 && !report.skipped {
            log::info!(
                "frame {}: energy {:.4}, {} overlapping pair(s)",
                world.frames,
                world.mechanical_energy(),
                world.overlapping_pairs().len()
            );
        }
    }

    scene.sync(&world);
    for (ball, handle) in world.balls.iter().zip(&scene.balls) {
        let screen = scene.to_screen(handle);
        log::debug!(
            "ball {}: world ({:.3}, {:.3}) screen ({:.1}, {:.1})",
            ball.id,
            ball.pos.x,
            ball.pos.y,
            screen.x,
            screen.y
        );
    }

    match serde_json::to_string(&world) {
        Ok(json) => log::trace!("final state: {json}"),
        Err(e) => log::warn!("Could not serialize world: {e}"),
    }

    log::info!("Done: {} frames, {} bounces", world.frames, bounces);
}
