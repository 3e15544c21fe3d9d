//! Per-frame render tick
//!
//! A `FrameClock` hands out one-shot frame callbacks (requestAnimationFrame on
//! the web, `ManualClock` natively). `start` keeps re-requesting frames until
//! a frame fails; a failed paint is fatal to the loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::app::SplashApp;
use crate::consts::{FIRST_FRAME_DT, FPS_WINDOW, MAX_FRAME_DT};
use crate::error::SplashError;
use crate::fullscreen::FullscreenPlatform;
use crate::platform::Viewport;
use crate::scene::Stage;

/// Paints the stage
pub trait Painter {
    fn paint(&mut self, stage: &Stage) -> Result<(), SplashError>;

    /// Viewport changed; resize backing surfaces
    fn resize(&mut self, _viewport: &Viewport) {}
}

/// Source of display refresh callbacks (timestamp in ms)
pub trait FrameClock {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

/// Something that runs once per frame
pub trait Frame {
    fn frame(&mut self, time_ms: f64) -> Result<(), SplashError>;
}

/// Run `target` on every frame of `clock` until a frame returns an error
pub fn start<C, T>(clock: Rc<C>, target: Rc<RefCell<T>>)
where
    C: FrameClock + 'static,
    T: Frame + 'static,
{
    let next_clock = clock.clone();
    clock.request_frame(Box::new(move |time| {
        let result = target.borrow_mut().frame(time);
        match result {
            Ok(()) => start(next_clock, target),
            Err(e) => log::error!("Render loop stopped: {}", e),
        }
    }));
}

/// Frame clock that fires only when told to
#[derive(Default)]
pub struct ManualClock {
    pending: RefCell<VecDeque<Box<dyn FnOnce(f64)>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback requested so far; returns how many ran
    pub fn fire(&self, time_ms: f64) -> usize {
        let callbacks: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let count = callbacks.len();
        for callback in callbacks {
            callback(time_ms);
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameClock for ManualClock {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        self.pending.borrow_mut().push_back(callback);
    }
}

/// Rolling FPS estimate over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    filled: usize,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            filled: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.filled = (self.filled + 1).min(FPS_WINDOW);

        // Oldest sample sits at the write index once the ring is full
        let oldest = if self.filled == FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let intervals = (self.filled - 1) as f64;
        let elapsed = time_ms - oldest;
        if intervals > 0.0 && elapsed > 0.0 {
            self.fps = (intervals * 1000.0 / elapsed).round() as u32;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Advances the animations and paints the stage once per frame
pub struct RenderLoop<P: Painter> {
    painter: P,
    last_time: Option<f64>,
    stats: FrameStats,
    frames: u64,
}

impl<P: Painter> RenderLoop<P> {
    pub fn new(painter: P) -> Self {
        Self {
            painter,
            last_time: None,
            stats: FrameStats::default(),
            frames: 0,
        }
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    pub fn fps(&self) -> u32 {
        self.stats.fps()
    }

    /// Frames painted successfully
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`
    fn frame_dt(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FIRST_FRAME_DT,
        };
        self.last_time = Some(time_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    pub fn tick<F: FullscreenPlatform>(
        &mut self,
        time_ms: f64,
        app: &mut SplashApp<F>,
    ) -> Result<(), SplashError> {
        let dt = self.frame_dt(time_ms);
        app.advance(dt);
        self.painter.paint(app.stage())?;
        self.stats.record(time_ms);
        self.frames += 1;
        Ok(())
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.painter.resize(viewport);
    }
}
