//! Splash settings
//!
//! Supplied by the host page as JSON; every field is optional and falls back
//! to the reference deployment values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::anim::Easing;
use crate::consts::*;
use crate::error::SplashError;

/// Half-open `[min, max)` interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: f32,
    pub max: f32,
}

impl SecondsRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, allow_zero: bool) -> Result<(), SplashError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(field, "bounds must be finite"));
        }
        if self.min < 0.0 || (!allow_zero && self.min == 0.0) {
            return Err(invalid(
                field,
                if allow_zero {
                    "min must not be negative"
                } else {
                    "min must be positive"
                },
            ));
        }
        if self.min >= self.max {
            return Err(invalid(field, "min must be below max"));
        }
        Ok(())
    }
}

/// Drop trajectory ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropSettings {
    /// Left inset for the entry x (inclusive lower bound)
    pub x_inset_start: f32,
    /// Right inset for the entry x (exclusive upper bound is `width - inset`)
    pub x_inset_end: f32,
    /// Fraction of the viewport height the entry y is drawn from
    pub entry_band: f32,
    /// Shortest total fall; the longest is the viewport height
    pub min_fall: f32,
    /// Length of each tween phase
    pub duration: SecondsRange,
    /// Pause before the entry phase
    pub delay: SecondsRange,
    pub easing: Easing,
}

impl Default for DropSettings {
    fn default() -> Self {
        Self {
            x_inset_start: 5.0,
            x_inset_end: 10.0,
            entry_band: 0.25,
            min_fall: 100.0,
            duration: SecondsRange::new(0.5, 1.0),
            delay: SecondsRange::new(0.3, 0.9),
            easing: Easing::Linear,
        }
    }
}

/// Splash settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One falling bar per color (0xRRGGBB)
    pub palette: Vec<u32>,
    /// Stage clear color (0xRRGGBB)
    pub background: u32,
    /// Bar rectangle origin relative to the element position
    pub bar_offset: Vec2,
    pub bar_size: Vec2,
    /// Chrome distance from the viewport edges
    pub chrome_margin: f32,
    pub drop: DropSettings,
    /// Fixed RNG seed; the clock is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: PALETTE.to_vec(),
            background: BACKGROUND,
            bar_offset: Vec2::from(BAR_OFFSET),
            bar_size: Vec2::from(BAR_SIZE),
            chrome_margin: CHROME_MARGIN,
            drop: DropSettings::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SplashError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from an optional JSON source. Malformed or invalid input is
    /// logged and replaced by the defaults.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values the animator cannot work with
    pub fn validate(&self) -> Result<(), SplashError> {
        self.drop.duration.check("drop.duration", false)?;
        self.drop.delay.check("drop.delay", true)?;

        if !(0.0..=1.0).contains(&self.drop.entry_band) {
            return Err(invalid("drop.entry_band", "must be within [0, 1]"));
        }
        if self.drop.x_inset_start < 0.0 || self.drop.x_inset_end < 0.0 {
            return Err(invalid("drop.x_inset", "insets must not be negative"));
        }
        if !self.drop.min_fall.is_finite() || self.drop.min_fall < 0.0 {
            return Err(invalid("drop.min_fall", "must be a non-negative number"));
        }
        if self.bar_size.x <= 0.0 || self.bar_size.y <= 0.0 {
            return Err(invalid("bar_size", "width and height must be positive"));
        }
        if !self.chrome_margin.is_finite() || self.chrome_margin < 0.0 {
            return Err(invalid("chrome_margin", "must be a non-negative number"));
        }
        if self.palette.is_empty() {
            log::warn!("Empty palette, no drops will be spawned");
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> SplashError {
    SplashError::InvalidSettings {
        field,
        reason: reason.to_string(),
    }
}
