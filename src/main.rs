//! Rain Splash entry point
//!
//! Handles platform-specific initialization and starts the render loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_splash {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;

    use rain_splash::app::Splash;
    use rain_splash::fullscreen::FullscreenApi;
    use rain_splash::layout::ChromeSlot;
    use rain_splash::platform::ViewportEvent;
    use rain_splash::platform::web::{self, RafClock, WebFullscreen};
    use rain_splash::renderer::RenderState;
    use rain_splash::{SplashApp, SplashError, render_loop};

    type WebSplash = Splash<WebFullscreen, RenderState>;

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Rain Splash starting...");

        if let Err(e) = start().await {
            log::error!("Splash failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), SplashError> {
        let window = web::window()?;
        let document = web::document()?;
        let canvas = web::canvas(&document)?;

        let settings = web::read_settings(&canvas);
        let viewport = web::current_viewport(&window);
        web::size_canvas(&canvas, &viewport);

        let seed = js_sys::Date::now() as u64;
        let mut app = SplashApp::new(
            settings,
            viewport,
            WebFullscreen::new(document.clone()),
            seed,
        )?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| SplashError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SplashError::Device(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, viewport).await?;

        app.attach_chrome(&web::read_chrome_sizes(&document));
        web::sync_chrome_dom(app.stage(), app.chrome(), &document);

        let splash = Rc::new(RefCell::new(Splash::new(app, render_state)));

        setup_viewport_handlers(&splash, &canvas);
        setup_fullscreen_handlers(&splash);
        setup_toggle_buttons(&splash);
        setup_chrome_measurement(&splash);

        render_loop::start(Rc::new(RafClock::new(window)), splash);

        log::info!("Rain Splash running!");
        Ok(())
    }

    fn setup_viewport_handlers(splash: &Rc<RefCell<WebSplash>>, canvas: &web_sys::HtmlCanvasElement) {
        let Ok(window) = web::window() else { return };
        for event in ViewportEvent::ALL {
            let splash = splash.clone();
            let canvas = canvas.clone();
            let handler_window = window.clone();
            web::listen(&window, event.as_str(), move |_event: web_sys::Event| {
                let Ok(document) = web::document() else { return };
                let viewport = web::current_viewport(&handler_window);
                web::size_canvas(&canvas, &viewport);
                if event == ViewportEvent::OrientationChange {
                    web::fix_ios_landscape_scroll(&handler_window, &document);
                }
                let mut s = splash.borrow_mut();
                s.handle_viewport_event(event, viewport);
                web::sync_chrome_dom(s.app.stage(), s.app.chrome(), &document);
            });
        }
    }

    fn setup_fullscreen_handlers(splash: &Rc<RefCell<WebSplash>>) {
        let Ok(document) = web::document() else { return };
        for api in FullscreenApi::PRIORITY {
            let splash = splash.clone();
            let handler_document = document.clone();
            web::listen(&document, api.change_event(), move |event: web_sys::Event| {
                let mut s = splash.borrow_mut();
                if let Some(state) = s.app.handle_fullscreen_change(&event.type_()) {
                    log::info!("Fullscreen state: {:?}", state);
                }
                web::sync_chrome_dom(s.app.stage(), s.app.chrome(), &handler_document);
                // A button shown for the first time can be measured now
                for slot in ChromeSlot::ALL {
                    let size = web::measure_chrome(&handler_document, slot);
                    if size.x > 0.0 && size.y > 0.0 {
                        s.app.set_chrome_size(slot, size);
                    }
                }
            });
        }
    }

    /// Images that finish loading after startup report their real size
    fn setup_chrome_measurement(splash: &Rc<RefCell<WebSplash>>) {
        let Ok(document) = web::document() else { return };
        for slot in ChromeSlot::ALL {
            let Some(image) = document.get_element_by_id(slot.dom_id()) else {
                continue;
            };
            let splash = splash.clone();
            let handler_document = document.clone();
            web::listen(&image, "load", move |_event: web_sys::Event| {
                let size = web::measure_chrome(&handler_document, slot);
                let mut s = splash.borrow_mut();
                if s.app.set_chrome_size(slot, size) {
                    log::debug!("#{} measured at {:?}", slot.dom_id(), size);
                }
                web::sync_chrome_dom(s.app.stage(), s.app.chrome(), &handler_document);
            });
        }
    }

    /// The toggle images sit above the canvas and receive the clicks
    fn setup_toggle_buttons(splash: &Rc<RefCell<WebSplash>>) {
        let Ok(document) = web::document() else { return };
        for slot in [ChromeSlot::EnterFullscreen, ChromeSlot::ExitFullscreen] {
            let Some(button) = document.get_element_by_id(slot.dom_id()) else {
                log::warn!("Missing #{} element", slot.dom_id());
                continue;
            };
            let splash = splash.clone();
            web::listen(&button, "click", move |event: web_sys::Event| {
                event.prevent_default();
                let mut s = splash.borrow_mut();
                let center = s
                    .app
                    .chrome()
                    .get(slot)
                    .and_then(|id| s.app.stage().get(id))
                    .map(|el| {
                        let (min, max) = el.bounds();
                        (min + max) * 0.5
                    });
                if let Some(point) = center {
                    s.app.click(point);
                }
            });
            if let Some(el) = button.dyn_ref::<web_sys::HtmlElement>() {
                if let Err(e) = el.style().set_property("cursor", "pointer") {
                    log::debug!("Could not style #{}: {:?}", slot.dom_id(), e);
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_splash::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rain Splash (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drives the splash against the in-memory platform and logs what it would draw
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rain_splash::app::{ChromeSizes, Splash};
    use rain_splash::layout::ChromeSlot;
    use rain_splash::platform::{HeadlessPlatform, Viewport, ViewportEvent};
    use rain_splash::render_loop::{self, ManualClock, Painter};
    use rain_splash::scene::Stage;
    use rain_splash::{Settings, SplashApp, SplashError};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const SECONDS: usize = 3;

    /// Counts the bars that would be visible each frame
    #[derive(Default)]
    struct LogPainter {
        max_visible: usize,
    }

    impl Painter for LogPainter {
        fn paint(&mut self, stage: &Stage) -> Result<(), SplashError> {
            let visible = stage.iter().filter(|e| e.is_drawn()).count();
            self.max_visible = self.max_visible.max(visible);
            Ok(())
        }

        fn resize(&mut self, viewport: &Viewport) {
            log::info!("Surface resized to {:?}", viewport.physical_size());
        }
    }

    type HeadlessSplash = Splash<HeadlessPlatform, LogPainter>;

    fn dispatch_fullscreen_events(splash: &RefCell<HeadlessSplash>) {
        let mut s = splash.borrow_mut();
        let events = s.app.fullscreen_mut().platform_mut().drain_events();
        for name in events {
            if let Some(state) = s.app.handle_fullscreen_change(name) {
                log::info!("{} -> {:?}", name, state);
            }
        }
    }

    fn run_frames(clock: &ManualClock, time: &mut f64, frames: usize) {
        for _ in 0..frames {
            *time += FRAME_MS;
            clock.fire(*time);
        }
    }

    pub fn run() -> Result<(), SplashError> {
        let app = SplashApp::new(
            Settings::default(),
            Viewport::new(800.0, 600.0),
            HeadlessPlatform::new(),
            42,
        )?;
        let splash = Rc::new(RefCell::new(Splash::new(app, LogPainter::default())));
        splash.borrow_mut().app.attach_chrome(&ChromeSizes {
            title: Vec2::new(320.0, 64.0),
            enter_fullscreen: Vec2::new(48.0, 48.0),
            exit_fullscreen: Vec2::new(48.0, 48.0),
        });

        let clock = Rc::new(ManualClock::new());
        render_loop::start(clock.clone(), splash.clone());

        let mut time = 0.0;
        run_frames(&clock, &mut time, SECONDS * 60);

        splash
            .borrow_mut()
            .handle_viewport_event(ViewportEvent::OrientationChange, Viewport::new(600.0, 800.0));
        {
            let s = splash.borrow();
            let title = s.app.layout().position_of(ChromeSlot::Title, &s.app.viewport());
            let enter = s
                .app
                .layout()
                .position_of(ChromeSlot::EnterFullscreen, &s.app.viewport());
            log::info!("After rotation: title at {:?}, toggle at {:?}", title, enter);
        }

        let target = splash
            .borrow()
            .app
            .layout()
            .position_of(ChromeSlot::EnterFullscreen, &Viewport::new(600.0, 800.0))
            .map(|p| p + Vec2::new(-10.0, 10.0));
        if let Some(point) = target {
            let hit = splash.borrow_mut().app.click(point);
            log::info!("Clicked {:?}", hit);
        }
        dispatch_fullscreen_events(&splash);
        run_frames(&clock, &mut time, 60);

        let mut s = splash.borrow_mut();
        log::info!(
            "Painted {} frames at {} fps, up to {} bars visible, enter button visible: {:?}",
            s.render.frames(),
            s.render.fps(),
            s.render.painter().max_visible,
            s.app.is_visible(ChromeSlot::EnterFullscreen)
        );
        s.app.teardown();
        Ok(())
    }
}
