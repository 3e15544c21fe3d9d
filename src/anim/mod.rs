//! Drop animation module
//!
//! Everything that moves lives here. Each falling bar is driven by a
//! `DropAnimator` registered with the `DropScheduler`; trajectories come from
//! a seeded, never-ending `TrajectoryGenerator`. Time only advances through
//! `DropScheduler::advance`, so the whole module is deterministic for a seed.

pub mod drop;
pub mod scheduler;
pub mod trajectory;
pub mod tween;

pub use drop::{DropAnimator, DropPhase};
pub use scheduler::{DropScheduler, TaskId};
pub use trajectory::{DropTrajectory, TrajectoryGenerator, random_arbitrary, random_int};
pub use tween::{Easing, Tween, TweenProps};
