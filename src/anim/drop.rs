//! Per-element drop animation
//!
//! States cycle waiting -> entering -> exiting -> waiting forever. Leaving
//! `Exiting` draws a fresh trajectory from the generator in the same
//! `advance` call, and any time left over is spent on the new cycle.

use super::trajectory::{DropTrajectory, TrajectoryGenerator};
use super::tween::{Easing, Tween, TweenProps};
use crate::platform::Viewport;
use crate::scene::{ElementId, Stage};

/// Upper bound on cycles completed within one `advance` call
const MAX_CYCLES_PER_ADVANCE: u32 = 64;

/// Where in the cycle an animator is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropPhase {
    /// Pre-roll pause; element already sits invisible at the entry point
    Waiting { remaining: f32 },
    /// Fading in while falling the first half
    Entering { elapsed: f32 },
    /// Fading out while falling the second half
    Exiting { elapsed: f32 },
}

/// Drives one stage element through endless fall cycles
#[derive(Debug, Clone)]
pub struct DropAnimator {
    element: ElementId,
    trajectory: DropTrajectory,
    phase: DropPhase,
    /// Captured from the element when the exit phase starts
    exit: Option<Tween>,
    easing: Easing,
    cycles: u64,
}

impl DropAnimator {
    /// Start waiting on `trajectory`; the element jumps to the entry point at once
    pub fn new(
        element: ElementId,
        trajectory: DropTrajectory,
        easing: Easing,
        stage: &mut Stage,
    ) -> Self {
        let mut animator = Self {
            element,
            trajectory,
            phase: DropPhase::Waiting {
                remaining: trajectory.delay,
            },
            exit: None,
            easing,
            cycles: 0,
        };
        animator.begin_cycle(trajectory, stage);
        animator
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn trajectory(&self) -> &DropTrajectory {
        &self.trajectory
    }

    pub fn phase(&self) -> DropPhase {
        self.phase
    }

    /// Number of cycles that ran to completion
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    fn begin_cycle(&mut self, trajectory: DropTrajectory, stage: &mut Stage) {
        self.trajectory = trajectory;
        self.phase = DropPhase::Waiting {
            remaining: trajectory.delay,
        };
        self.exit = None;
        self.write(stage, trajectory.start());
    }

    fn write(&self, stage: &mut Stage, props: TweenProps) {
        if let Some(el) = stage.get_mut(self.element) {
            props.write(el);
        }
    }

    /// Advance by `dt` seconds. Returns false once the element is gone from
    /// the stage, after which the animator should be dropped.
    pub fn advance(
        &mut self,
        dt: f32,
        stage: &mut Stage,
        generator: &mut TrajectoryGenerator,
        viewport: &Viewport,
    ) -> bool {
        if stage.get(self.element).is_none() {
            return false;
        }

        let mut budget = dt.max(0.0);
        let mut wrapped = 0;

        loop {
            match self.phase {
                DropPhase::Waiting { remaining } => {
                    if budget < remaining {
                        self.phase = DropPhase::Waiting {
                            remaining: remaining - budget,
                        };
                        return true;
                    }
                    budget -= remaining;
                    self.phase = DropPhase::Entering { elapsed: 0.0 };
                }
                DropPhase::Entering { elapsed } => {
                    let tween = self.trajectory.entry_tween(self.easing);
                    let elapsed = elapsed + budget;
                    if !tween.is_complete(elapsed) {
                        self.write(stage, tween.sample(elapsed));
                        self.phase = DropPhase::Entering { elapsed };
                        return true;
                    }
                    self.write(stage, tween.to);
                    budget = elapsed - tween.duration.max(0.0);

                    let from = stage
                        .get(self.element)
                        .map(TweenProps::of)
                        .unwrap_or(tween.to);
                    self.exit = Some(self.trajectory.exit_tween(from, self.easing));
                    self.phase = DropPhase::Exiting { elapsed: 0.0 };
                }
                DropPhase::Exiting { elapsed } => {
                    let tween = self.exit.unwrap_or_else(|| {
                        self.trajectory
                            .exit_tween(self.trajectory.midpoint(), self.easing)
                    });
                    let elapsed = elapsed + budget;
                    if !tween.is_complete(elapsed) {
                        self.write(stage, tween.sample(elapsed));
                        self.phase = DropPhase::Exiting { elapsed };
                        return true;
                    }
                    self.write(stage, tween.to);
                    budget = elapsed - tween.duration.max(0.0);
                    self.cycles += 1;

                    let next = generator.next_for(viewport);
                    self.begin_cycle(next, stage);

                    wrapped += 1;
                    if wrapped >= MAX_CYCLES_PER_ADVANCE {
                        log::warn!(
                            "Drop {:?} skipped {:.2}s after {} cycles in one step",
                            self.element,
                            budget,
                            wrapped
                        );
                        return true;
                    }
                }
            }
        }
    }
}
