//! End-to-end splash scenarios against the headless platform

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rain_splash::anim::TrajectoryGenerator;
use rain_splash::app::{ChromeSizes, Splash};
use rain_splash::fullscreen::FullscreenState;
use rain_splash::layout::ChromeSlot;
use rain_splash::platform::{HeadlessPlatform, Viewport, ViewportEvent};
use rain_splash::render_loop::{self, ManualClock, Painter};
use rain_splash::scene::Stage;
use rain_splash::settings::DropSettings;
use rain_splash::{Settings, SplashApp, SplashError};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Records how many bars were visible in each painted frame
#[derive(Default)]
struct RecordingPainter {
    visible_bars: Vec<usize>,
    resizes: Vec<Viewport>,
    fail_after: Option<usize>,
}

impl Painter for RecordingPainter {
    fn paint(&mut self, stage: &Stage) -> Result<(), SplashError> {
        if self.fail_after == Some(self.visible_bars.len()) {
            return Err(SplashError::Surface("device lost".to_string()));
        }
        self.visible_bars
            .push(stage.iter().filter(|e| e.is_drawn()).count());
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.resizes.push(*viewport);
    }
}

fn chrome_sizes() -> ChromeSizes {
    ChromeSizes {
        title: Vec2::new(320.0, 64.0),
        enter_fullscreen: Vec2::new(48.0, 48.0),
        exit_fullscreen: Vec2::new(48.0, 48.0),
    }
}

fn splash_app(platform: HeadlessPlatform) -> SplashApp<HeadlessPlatform> {
    let mut app = SplashApp::new(
        Settings::default(),
        Viewport::new(800.0, 600.0),
        platform,
        2024,
    )
    .unwrap();
    app.attach_chrome(&chrome_sizes());
    app
}

fn chrome_pos(app: &SplashApp<HeadlessPlatform>, slot: ChromeSlot) -> Vec2 {
    let id = app.chrome().get(slot).unwrap();
    app.stage().get(id).unwrap().pos
}

fn dispatch_pending(app: &mut SplashApp<HeadlessPlatform>) -> Vec<FullscreenState> {
    let events = app.fullscreen_mut().platform_mut().drain_events();
    events
        .into_iter()
        .filter_map(|name| app.handle_fullscreen_change(name))
        .collect()
}

#[test]
fn orientation_change_reanchors_chrome() {
    let mut app = splash_app(HeadlessPlatform::new());
    app.handle_event("orientationchange", Viewport::new(800.0, 600.0));

    assert_eq!(chrome_pos(&app, ChromeSlot::Title), Vec2::new(20.0, 20.0));
    assert_eq!(chrome_pos(&app, ChromeSlot::EnterFullscreen).x, 780.0);
    assert_eq!(chrome_pos(&app, ChromeSlot::ExitFullscreen).x, 780.0);
}

#[test]
fn resize_keeps_anchor_contract() {
    let mut app = splash_app(HeadlessPlatform::new());
    for (w, h) in [(1024.0, 768.0), (320.0, 480.0), (1920.0, 1080.0)] {
        app.handle_viewport_event(ViewportEvent::Resize, Viewport::new(w, h));
        assert_eq!(chrome_pos(&app, ChromeSlot::Title), Vec2::new(20.0, 20.0));
        assert_eq!(
            chrome_pos(&app, ChromeSlot::EnterFullscreen),
            Vec2::new(w - 20.0, 20.0)
        );
        assert_eq!(
            chrome_pos(&app, ChromeSlot::ExitFullscreen),
            Vec2::new(w - 20.0, 20.0)
        );
    }
}

#[test]
fn request_flips_toggle_visibility() {
    let mut app = splash_app(HeadlessPlatform::new());
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(true));
    assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(false));

    let before = chrome_pos(&app, ChromeSlot::Title);
    assert!(app.request_fullscreen());
    assert_eq!(dispatch_pending(&mut app), vec![FullscreenState::Fullscreen]);

    assert!(app.fullscreen().is_fullscreen());
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(false));
    assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(true));
    assert_eq!(chrome_pos(&app, ChromeSlot::Title), before);

    assert!(app.exit_fullscreen());
    assert_eq!(dispatch_pending(&mut app), vec![FullscreenState::Normal]);
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(true));
    assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(false));
}

#[test]
fn user_exit_is_reported_through_change_event() {
    let mut app = splash_app(HeadlessPlatform::new());
    app.request_fullscreen();
    dispatch_pending(&mut app);

    app.fullscreen_mut().platform_mut().user_exit();
    assert_eq!(dispatch_pending(&mut app), vec![FullscreenState::Normal]);
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(true));
}

#[test]
fn unsupported_platform_hides_both_buttons() {
    let mut app = splash_app(HeadlessPlatform::unsupported());
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(false));
    assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(false));

    assert!(!app.request_fullscreen());
    assert!(!app.exit_fullscreen());
    assert!(dispatch_pending(&mut app).is_empty());
    assert_eq!(app.fullscreen().state(), FullscreenState::Normal);
    assert_eq!(app.is_visible(ChromeSlot::EnterFullscreen), Some(false));
    assert_eq!(app.is_visible(ChromeSlot::ExitFullscreen), Some(false));
    assert!(app.fullscreen().platform().requests().is_empty());
}

#[test]
fn drops_fade_in_and_repeat_forever() {
    let app = SplashApp::new(
        Settings::default(),
        Viewport::new(800.0, 600.0),
        HeadlessPlatform::new(),
        7,
    )
    .unwrap();
    let splash = Rc::new(RefCell::new(Splash::new(app, RecordingPainter::default())));
    let clock = Rc::new(ManualClock::new());
    render_loop::start(clock.clone(), splash.clone());

    let mut time = 0.0;
    for _ in 0..600 {
        time += FRAME_MS;
        assert_eq!(clock.fire(time), 1);
    }

    let s = splash.borrow();
    assert_eq!(s.render.frames(), 600);
    let painted = &s.render.painter().visible_bars;
    assert!(painted.iter().any(|&n| n > 0));
    // Ten seconds covers at least three cycles of at most 2.9 s
    for (_, task) in s.app.drops().tasks() {
        assert!(task.cycles_completed() >= 3);
    }
    assert!(s
        .app
        .stage()
        .iter()
        .all(|e| (0.0..=1.0).contains(&e.alpha)));
}

#[test]
fn failing_painter_stops_loop() {
    let app = SplashApp::new(
        Settings::default(),
        Viewport::new(800.0, 600.0),
        HeadlessPlatform::new(),
        7,
    )
    .unwrap();
    let painter = RecordingPainter {
        fail_after: Some(3),
        ..Default::default()
    };
    let splash = Rc::new(RefCell::new(Splash::new(app, painter)));
    let clock = Rc::new(ManualClock::new());
    render_loop::start(clock.clone(), splash.clone());

    let mut time = 0.0;
    for _ in 0..4 {
        time += FRAME_MS;
        clock.fire(time);
    }
    assert_eq!(clock.pending(), 0);
    assert_eq!(splash.borrow().render.frames(), 3);
    assert_eq!(clock.fire(time + FRAME_MS), 0);
}

#[test]
fn viewport_change_resizes_painter() {
    let app = splash_app(HeadlessPlatform::new());
    let mut splash = Splash::new(app, RecordingPainter::default());
    let rotated = Viewport::new(600.0, 800.0).with_pixel_ratio(2.0);
    splash.handle_viewport_event(ViewportEvent::OrientationChange, rotated);

    assert_eq!(splash.render.painter().resizes, vec![rotated]);
    assert_eq!(splash.app.viewport(), rotated);
    assert_eq!(
        chrome_pos(&splash.app, ChromeSlot::EnterFullscreen),
        Vec2::new(580.0, 20.0)
    );
}

#[test]
fn trajectories_stay_in_bounds_for_many_cycles() {
    let mut generator = TrajectoryGenerator::new(99, DropSettings::default());
    let viewport = Viewport::new(1280.0, 720.0);
    for t in generator.cycles(viewport).take(1000) {
        assert!(t.from_y >= 0.0 && t.from_y < 720.0 / 4.0);
        assert!(t.dist_y >= 100.0 && t.dist_y < 720.0);
        assert!(t.from_x >= 5.0 && t.from_x < 1270.0);
    }
}

#[test]
fn settings_from_json_drive_the_stage() {
    let settings = Settings::from_json(r#"{"palette": [16711680, 255], "seed": 5}"#).unwrap();
    let app = SplashApp::new(settings, Viewport::new(400.0, 300.0), HeadlessPlatform::new(), 1)
        .unwrap();
    assert_eq!(app.drops().len(), 2);

    let inverted = Settings::from_json(r#"{"drop": {"duration": {"min": 2.0, "max": 1.0}}}"#);
    assert!(inverted.is_err());
}
