//! Randomized drop trajectories
//!
//! One trajectory per animation cycle:
//! - `from_x` in [x_inset_start, width - x_inset_end), whole pixels
//! - `from_y` in [0, height * entry_band), whole pixels
//! - `dist_y` in [min_fall, height)
//! - `duration`, `delay` from the configured ranges
//!
//! The fall is not clamped to the viewport; a long draw may carry the bar
//! past the bottom edge before it has fully faded.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::tween::{Easing, Tween, TweenProps};
use crate::platform::Viewport;
use crate::settings::DropSettings;

/// Parameters of one fall cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTrajectory {
    pub from_x: f32,
    pub from_y: f32,
    /// Total fall distance
    pub dist_y: f32,
    /// Length of each of the two tween phases (seconds)
    pub duration: f32,
    /// Pause before the entry phase (seconds)
    pub delay: f32,
}

impl DropTrajectory {
    /// Invisible at the entry point
    pub fn start(&self) -> TweenProps {
        TweenProps::new(0.0, self.from_x, self.from_y)
    }

    /// Fully opaque halfway down
    pub fn midpoint(&self) -> TweenProps {
        TweenProps::new(1.0, self.from_x, self.from_y + self.dist_y / 2.0)
    }

    /// Faded out at the bottom of the fall
    pub fn end(&self) -> TweenProps {
        TweenProps::new(0.0, self.from_x, self.from_y + self.dist_y)
    }

    /// Phase 1: fade in while falling the first half
    pub fn entry_tween(&self, easing: Easing) -> Tween {
        Tween::new(self.start(), self.midpoint(), self.duration, easing)
    }

    /// Phase 2: from wherever the element is now to the end; x is left as is
    pub fn exit_tween(&self, from: TweenProps, easing: Easing) -> Tween {
        let to = TweenProps::new(0.0, from.x, self.from_y + self.dist_y);
        Tween::new(from, to, self.duration, easing)
    }

    /// Delay plus both phases
    pub fn cycle_length(&self) -> f32 {
        self.delay + 2.0 * self.duration
    }
}

/// Uniform real in [min, max); degenerate ranges yield `min`
pub fn random_arbitrary<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Uniform whole number in [min, max); degenerate ranges yield `min`
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + random_arbitrary(rng, 0.0, max - min).floor()
}

/// Seeded source of trajectories; never runs dry
#[derive(Debug, Clone)]
pub struct TrajectoryGenerator {
    rng: Pcg32,
    settings: DropSettings,
}

impl TrajectoryGenerator {
    pub fn new(seed: u64, settings: DropSettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            settings,
        }
    }

    pub fn settings(&self) -> &DropSettings {
        &self.settings
    }

    /// Draw the next trajectory against the current viewport
    pub fn next_for(&mut self, viewport: &Viewport) -> DropTrajectory {
        let s = &self.settings;
        let rng = &mut self.rng;

        let from_x = random_int(rng, s.x_inset_start, viewport.width - s.x_inset_end);
        let from_y = random_int(rng, 0.0, viewport.height * s.entry_band);
        let dist_y = random_arbitrary(rng, s.min_fall, viewport.height);
        let duration = random_arbitrary(rng, s.duration.min, s.duration.max);
        let delay = random_arbitrary(rng, s.delay.min, s.delay.max);

        DropTrajectory {
            from_x,
            from_y,
            dist_y,
            duration,
            delay,
        }
    }

    /// Infinite iterator of trajectories for a fixed viewport
    pub fn cycles(&mut self, viewport: Viewport) -> Cycles<'_> {
        Cycles {
            generator: self,
            viewport,
        }
    }
}

/// See [`TrajectoryGenerator::cycles`]
pub struct Cycles<'a> {
    generator: &'a mut TrajectoryGenerator,
    viewport: Viewport,
}

impl Iterator for Cycles<'_> {
    type Item = DropTrajectory;

    fn next(&mut self) -> Option<DropTrajectory> {
        Some(self.generator.next_for(&self.viewport))
    }
}
