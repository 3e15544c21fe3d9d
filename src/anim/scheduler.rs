//! Repeating drop tasks
//!
//! Each bar is a registered task that runs until cancelled. All tasks share
//! one trajectory generator, so a single seed reproduces the whole rain.

use super::drop::DropAnimator;
use super::trajectory::TrajectoryGenerator;
use super::tween::Easing;
use crate::platform::Viewport;
use crate::scene::{ElementId, Stage};
use crate::settings::DropSettings;

/// Handle returned by [`DropScheduler::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

/// Owns every running drop animator
#[derive(Debug, Clone)]
pub struct DropScheduler {
    generator: TrajectoryGenerator,
    easing: Easing,
    /// Sorted by task id
    tasks: Vec<(TaskId, DropAnimator)>,
    next_id: u32,
}

impl DropScheduler {
    pub fn new(seed: u64, settings: &DropSettings) -> Self {
        Self {
            generator: TrajectoryGenerator::new(seed, settings.clone()),
            easing: settings.easing,
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Start animating `element` with a fresh trajectory
    pub fn register(&mut self, element: ElementId, stage: &mut Stage, viewport: &Viewport) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let trajectory = self.generator.next_for(viewport);
        let animator = DropAnimator::new(element, trajectory, self.easing, stage);
        self.tasks.push((id, animator));
        id
    }

    /// Stop one task and leave its element transparent
    pub fn cancel(&mut self, id: TaskId, stage: &mut Stage) -> bool {
        let Some(index) = self.tasks.iter().position(|(t, _)| *t == id) else {
            return false;
        };
        let (_, animator) = self.tasks.remove(index);
        if let Some(el) = stage.get_mut(animator.element()) {
            el.alpha = 0.0;
        }
        true
    }

    /// Stop every task; returns how many were running
    pub fn cancel_all(&mut self, stage: &mut Stage) -> usize {
        let count = self.tasks.len();
        for (_, animator) in self.tasks.drain(..) {
            if let Some(el) = stage.get_mut(animator.element()) {
                el.alpha = 0.0;
            }
        }
        count
    }

    /// Advance every task by `dt` seconds
    pub fn advance(&mut self, dt: f32, stage: &mut Stage, viewport: &Viewport) {
        let generator = &mut self.generator;
        self.tasks.retain_mut(|(id, animator)| {
            let alive = animator.advance(dt, stage, generator, viewport);
            if !alive {
                log::warn!(
                    "Drop task {:?} dropped: element {:?} left the stage",
                    id,
                    animator.element()
                );
            }
            alive
        });
    }

    pub fn get(&self, id: TaskId) -> Option<&DropAnimator> {
        self.tasks.iter().find(|(t, _)| *t == id).map(|(_, a)| a)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, &DropAnimator)> {
        self.tasks.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn stage_with_bars(n: usize) -> (Stage, Vec<ElementId>) {
        let mut stage = Stage::new(0);
        let ids = (0..n)
            .map(|i| stage.add_bar(i as u32, Vec2::new(-5.0, 0.0), Vec2::new(5.0, 100.0)))
            .collect();
        (stage, ids)
    }

    #[test]
    fn test_tasks_run_independently() {
        let (mut stage, ids) = stage_with_bars(4);
        let vp = Viewport::new(800.0, 600.0);
        let mut scheduler = DropScheduler::new(5, &DropSettings::default());
        for &id in &ids {
            scheduler.register(id, &mut stage, &vp);
        }
        assert_eq!(scheduler.len(), 4);

        // Ten seconds of 60 Hz frames: every bar has cycled at least twice
        for _ in 0..600 {
            scheduler.advance(1.0 / 60.0, &mut stage, &vp);
        }
        for (_, animator) in scheduler.tasks() {
            assert!(animator.cycles_completed() >= 2);
        }

        // Decorrelated: not every bar is on the same trajectory
        let first = *scheduler.tasks().next().unwrap().1.trajectory();
        assert!(scheduler.tasks().any(|(_, a)| *a.trajectory() != first));
    }

    #[test]
    fn test_cancel_freezes_element() {
        let (mut stage, ids) = stage_with_bars(2);
        let vp = Viewport::new(800.0, 600.0);
        let mut scheduler = DropScheduler::new(5, &DropSettings::default());
        let a = scheduler.register(ids[0], &mut stage, &vp);
        let b = scheduler.register(ids[1], &mut stage, &vp);

        scheduler.advance(1.0, &mut stage, &vp);
        assert!(scheduler.cancel(a, &mut stage));
        assert!(!scheduler.cancel(a, &mut stage));

        let frozen = stage.get(ids[0]).unwrap().clone();
        assert_eq!(frozen.alpha, 0.0);
        for _ in 0..120 {
            scheduler.advance(1.0 / 60.0, &mut stage, &vp);
        }
        assert_eq!(stage.get(ids[0]).unwrap(), &frozen);
        assert!(scheduler.get(a).is_none());
        assert!(scheduler.get(b).is_some());
    }

    #[test]
    fn test_cancel_all() {
        let (mut stage, ids) = stage_with_bars(3);
        let vp = Viewport::new(800.0, 600.0);
        let mut scheduler = DropScheduler::new(5, &DropSettings::default());
        for &id in &ids {
            scheduler.register(id, &mut stage, &vp);
        }
        assert_eq!(scheduler.cancel_all(&mut stage), 3);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_missing_element_is_dropped() {
        let (mut stage, _) = stage_with_bars(1);
        let vp = Viewport::new(800.0, 600.0);
        let mut scheduler = DropScheduler::new(5, &DropSettings::default());
        scheduler.register(ElementId(999), &mut stage, &vp);
        scheduler.advance(0.1, &mut stage, &vp);
        assert!(scheduler.is_empty());
    }
}
