//! Property tweens

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::VisualElement;

/// Rate curve of a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Quadratic acceleration
    EaseIn,
}

impl Easing {
    /// Map progress in [0, 1] to eased progress in [0, 1]
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
        }
    }
}

/// The animated properties of an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenProps {
    pub alpha: f32,
    pub x: f32,
    pub y: f32,
}

impl TweenProps {
    pub const fn new(alpha: f32, x: f32, y: f32) -> Self {
        Self { alpha, x, y }
    }

    /// Read the current properties of an element
    pub fn of(el: &VisualElement) -> Self {
        Self::new(el.alpha, el.pos.x, el.pos.y)
    }

    /// Write into an element; alpha is kept within [0, 1]
    pub fn write(&self, el: &mut VisualElement) {
        el.alpha = self.alpha.clamp(0.0, 1.0);
        el.pos = Vec2::new(self.x, self.y);
    }

    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            alpha: a.alpha + (b.alpha - a.alpha) * t,
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// A from/to interpolation over a fixed duration (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: TweenProps,
    pub to: TweenProps,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: TweenProps, to: TweenProps, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Progress (0.0 to 1.0); zero-length tweens are always complete
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, elapsed: f32) -> bool {
        self.progress(elapsed) >= 1.0
    }

    pub fn sample(&self, elapsed: f32) -> TweenProps {
        let t = self.easing.apply(self.progress(elapsed));
        TweenProps::lerp(&self.from, &self.to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sample() {
        let tween = Tween::new(
            TweenProps::new(0.0, 10.0, 0.0),
            TweenProps::new(1.0, 10.0, 100.0),
            0.5,
            Easing::Linear,
        );
        let mid = tween.sample(0.25);
        assert!((mid.alpha - 0.5).abs() < 1e-6);
        assert!((mid.y - 50.0).abs() < 1e-4);
        assert_eq!(mid.x, 10.0);
        assert!(!tween.is_complete(0.49));
        assert!(tween.is_complete(0.5));
        // Past the end stays at the end
        assert_eq!(tween.sample(3.0), tween.to);
    }

    #[test]
    fn test_ease_in_is_slower_at_start() {
        assert!(Easing::EaseIn.apply(0.5) < Easing::Linear.apply(0.5));
        assert_eq!(Easing::EaseIn.apply(1.0), 1.0);
        assert_eq!(Easing::EaseIn.apply(-1.0), 0.0);
    }

    #[test]
    fn test_zero_duration_completes() {
        let tween = Tween::new(
            TweenProps::default(),
            TweenProps::new(1.0, 0.0, 0.0),
            0.0,
            Easing::Linear,
        );
        assert!(tween.is_complete(0.0));
        assert_eq!(tween.sample(0.0).alpha, 1.0);
    }
}
