//! Splash context
//!
//! `SplashApp` owns the stage, the chrome handles, the layout table, the
//! fullscreen controller and the drop scheduler. Platform event handlers get
//! it by `&mut` and nothing else holds scene state.

use glam::Vec2;

use crate::anim::DropScheduler;
use crate::error::SplashError;
use crate::fullscreen::{FullscreenController, FullscreenPlatform, FullscreenState, ToggleVisibility};
use crate::layout::{ChromeHandles, ChromeSlot, LayoutManager};
use crate::platform::{Viewport, ViewportEvent};
use crate::render_loop::{Frame, Painter, RenderLoop};
use crate::scene::Stage;
use crate::settings::Settings;

/// Pixel sizes of the chrome images, supplied once they are available
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeSizes {
    pub title: Vec2,
    pub enter_fullscreen: Vec2,
    pub exit_fullscreen: Vec2,
}

impl ChromeSizes {
    pub fn get(&self, slot: ChromeSlot) -> Vec2 {
        match slot {
            ChromeSlot::Title => self.title,
            ChromeSlot::EnterFullscreen => self.enter_fullscreen,
            ChromeSlot::ExitFullscreen => self.exit_fullscreen,
        }
    }
}

pub struct SplashApp<F: FullscreenPlatform> {
    settings: Settings,
    viewport: Viewport,
    stage: Stage,
    chrome: ChromeHandles,
    layout: LayoutManager,
    fullscreen: FullscreenController<F>,
    drops: DropScheduler,
}

impl<F: FullscreenPlatform> SplashApp<F> {
    /// Build the stage and start one drop per palette color.
    /// `seed` is used unless the settings pin one.
    pub fn new(
        settings: Settings,
        viewport: Viewport,
        platform: F,
        seed: u64,
    ) -> Result<Self, SplashError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or(seed);

        let mut stage = Stage::new(settings.background);
        let mut drops = DropScheduler::new(seed, &settings.drop);
        for &color in &settings.palette {
            let id = stage.add_bar(color, settings.bar_offset, settings.bar_size);
            drops.register(id, &mut stage, &viewport);
        }
        log::info!("Spawned {} drops (seed {})", drops.len(), seed);

        Ok(Self {
            layout: LayoutManager::splash(settings.chrome_margin),
            settings,
            viewport,
            stage,
            chrome: ChromeHandles::default(),
            fullscreen: FullscreenController::new(platform),
            drops,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn chrome(&self) -> &ChromeHandles {
        &self.chrome
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn drops(&self) -> &DropScheduler {
        &self.drops
    }

    pub fn fullscreen(&self) -> &FullscreenController<F> {
        &self.fullscreen
    }

    pub fn fullscreen_mut(&mut self) -> &mut FullscreenController<F> {
        &mut self.fullscreen
    }

    /// Create the title and toggle sprites (once), place them and set button visibility
    pub fn attach_chrome(&mut self, sizes: &ChromeSizes) {
        for slot in ChromeSlot::ALL {
            if self.chrome.get(slot).is_some() {
                continue;
            }
            let id = self.stage.add_sprite(slot, sizes.get(slot), slot.pivot());
            self.chrome.set(slot, id);
        }
        self.layout.apply(&self.viewport, &self.chrome, &mut self.stage);
        let visibility = self.sync_toggle_visibility();
        log::info!("Chrome attached ({:?})", visibility);
    }

    /// Update a chrome sprite's size once its image has been measured.
    /// Returns false if the slot has no sprite yet.
    pub fn set_chrome_size(&mut self, slot: ChromeSlot, size: Vec2) -> bool {
        match self.chrome.get(slot).and_then(|id| self.stage.get_mut(id)) {
            Some(el) => {
                el.size = size;
                true
            }
            None => false,
        }
    }

    /// Resize/orientation change: adopt the new viewport and re-layout now
    pub fn handle_viewport_event(&mut self, event: ViewportEvent, viewport: Viewport) {
        log::debug!(
            "{}: {}x{} @{}x",
            event.as_str(),
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
        self.viewport = viewport;
        self.layout.apply(&self.viewport, &self.chrome, &mut self.stage);
    }

    /// Any vendor fullscreen change event: re-query and update button visibility
    pub fn handle_fullscreen_change(&mut self, name: &str) -> Option<FullscreenState> {
        let state = self.fullscreen.handle_change_event(name)?;
        self.sync_toggle_visibility();
        Some(state)
    }

    /// Route a platform event by DOM name; returns whether it was recognized
    pub fn handle_event(&mut self, name: &str, viewport: Viewport) -> bool {
        if let Some(event) = ViewportEvent::from_name(name) {
            self.handle_viewport_event(event, viewport);
            true
        } else {
            self.handle_fullscreen_change(name).is_some()
        }
    }

    pub fn toggle_visibility(&self) -> ToggleVisibility {
        ToggleVisibility::of(&self.fullscreen)
    }

    /// Push the platform's current fullscreen state onto the chrome sprites
    pub fn sync_toggle_visibility(&mut self) -> ToggleVisibility {
        let visibility = self.toggle_visibility();
        for slot in ChromeSlot::ALL {
            if let Some(el) = self.chrome.get(slot).and_then(|id| self.stage.get_mut(id)) {
                el.visible = visibility.for_slot(slot);
            }
        }
        visibility
    }

    /// Whether a chrome slot is shown; `None` until it exists
    pub fn is_visible(&self, slot: ChromeSlot) -> Option<bool> {
        self.chrome
            .get(slot)
            .and_then(|id| self.stage.get(id))
            .map(|el| el.visible)
    }

    pub fn request_fullscreen(&mut self) -> bool {
        self.fullscreen.request_fullscreen()
    }

    pub fn exit_fullscreen(&mut self) -> bool {
        self.fullscreen.exit_fullscreen()
    }

    /// Click or tap at `point`; a visible toggle button fires its action.
    /// Visibility is left alone until the platform reports the change.
    pub fn click(&mut self, point: Vec2) -> Option<ChromeSlot> {
        let id = self.stage.hit_test(point)?.id;
        let slot = self.chrome.slot_of(id)?;
        match slot {
            ChromeSlot::EnterFullscreen => {
                self.fullscreen.request_fullscreen();
            }
            ChromeSlot::ExitFullscreen => {
                self.fullscreen.exit_fullscreen();
            }
            ChromeSlot::Title => {}
        }
        Some(slot)
    }

    /// Advance every drop by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.drops.advance(dt, &mut self.stage, &self.viewport);
    }

    /// Stop all drop animations; returns how many were running
    pub fn teardown(&mut self) -> usize {
        let stopped = self.drops.cancel_all(&mut self.stage);
        log::info!("Stopped {} drops", stopped);
        stopped
    }
}

/// App plus render loop, driven by a frame clock
pub struct Splash<F: FullscreenPlatform, P: Painter> {
    pub app: SplashApp<F>,
    pub render: RenderLoop<P>,
}

impl<F: FullscreenPlatform, P: Painter> Splash<F, P> {
    pub fn new(app: SplashApp<F>, painter: P) -> Self {
        Self {
            app,
            render: RenderLoop::new(painter),
        }
    }

    /// Re-layout and resize the painter's surface
    pub fn handle_viewport_event(&mut self, event: ViewportEvent, viewport: Viewport) {
        self.app.handle_viewport_event(event, viewport);
        self.render.resize(&viewport);
    }
}

impl<F: FullscreenPlatform, P: Painter> Frame for Splash<F, P> {
    fn frame(&mut self, time_ms: f64) -> Result<(), SplashError> {
        self.render.tick(time_ms, &mut self.app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::scene::ElementKind;

    fn sizes() -> ChromeSizes {
        ChromeSizes {
            title: Vec2::new(300.0, 80.0),
            enter_fullscreen: Vec2::new(48.0, 48.0),
            exit_fullscreen: Vec2::new(48.0, 48.0),
        }
    }

    fn app(platform: HeadlessPlatform) -> SplashApp<HeadlessPlatform> {
        SplashApp::new(Settings::default(), Viewport::new(800.0, 600.0), platform, 11).unwrap()
    }

    #[test]
    fn test_one_bar_per_palette_color() {
        let app = app(HeadlessPlatform::new());
        assert_eq!(app.drops().len(), 18);
        let bars = app
            .stage()
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Bar { .. }))
            .count();
        assert_eq!(bars, 18);
    }

    #[test]
    fn test_empty_palette_spawns_nothing() {
        let settings = Settings {
            palette: Vec::new(),
            ..Settings::default()
        };
        let app = SplashApp::new(
            settings,
            Viewport::new(800.0, 600.0),
            HeadlessPlatform::new(),
            1,
        )
        .unwrap();
        assert!(app.drops().is_empty());
        assert!(app.stage().is_empty());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.drop.entry_band = 2.0;
        let result = SplashApp::new(
            settings,
            Viewport::new(800.0, 600.0),
            HeadlessPlatform::new(),
            1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_events_before_chrome_are_harmless() {
        let mut app = app(HeadlessPlatform::new());
        assert!(app.handle_event("resize", Viewport::new(640.0, 480.0)));
        assert!(app.handle_event("fullscreenchange", app.viewport()));
        assert!(!app.handle_event("scroll", app.viewport()));
        assert_eq!(app.is_visible(ChromeSlot::Title), None);
        assert_eq!(app.viewport(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn test_attach_chrome_is_idempotent() {
        let mut app = app(HeadlessPlatform::new());
        app.attach_chrome(&sizes());
        let count = app.stage().len();
        app.attach_chrome(&sizes());
        assert_eq!(app.stage().len(), count);
        assert_eq!(app.is_visible(ChromeSlot::Title), Some(true));
        assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(true));
        assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(false));
    }

    #[test]
    fn test_click_enter_button_requests_fullscreen() {
        let mut app = app(HeadlessPlatform::new());
        app.attach_chrome(&sizes());

        // Button spans x in [732, 780], y in [20, 68]
        assert_eq!(
            app.click(Vec2::new(760.0, 40.0)),
            Some(ChromeSlot::EnterFullscreen)
        );
        assert!(app.fullscreen().is_fullscreen());
        // No change event dispatched yet: buttons unchanged
        assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(true));

        assert_eq!(app.click(Vec2::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_late_measured_button_becomes_clickable() {
        let mut app = app(HeadlessPlatform::new());
        assert!(!app.set_chrome_size(ChromeSlot::EnterFullscreen, Vec2::ONE));
        app.attach_chrome(&ChromeSizes {
            title: Vec2::ZERO,
            enter_fullscreen: Vec2::ZERO,
            exit_fullscreen: Vec2::ZERO,
        });
        assert_eq!(app.click(Vec2::new(760.0, 40.0)), None);

        assert!(app.set_chrome_size(ChromeSlot::EnterFullscreen, Vec2::new(48.0, 48.0)));
        assert_eq!(
            app.click(Vec2::new(760.0, 40.0)),
            Some(ChromeSlot::EnterFullscreen)
        );
        // Anchor unchanged by the new size
        let id = app.chrome().get(ChromeSlot::EnterFullscreen).unwrap();
        assert_eq!(app.stage().get(id).unwrap().pos, Vec2::new(780.0, 20.0));
    }

    #[test]
    fn test_teardown_stops_drops() {
        let mut app = app(HeadlessPlatform::new());
        app.advance(0.5);
        assert_eq!(app.teardown(), 18);
        assert!(app.drops().is_empty());
        assert!(app.stage().iter().all(|e| e.alpha == 0.0));
    }
}
