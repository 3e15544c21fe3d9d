//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Viewport size and device pixel ratio
//! - Viewport change events (resize, orientation)
//! - Fullscreen primitives (see `crate::fullscreen::FullscreenPlatform`)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessPlatform;

use glam::Vec2;

use crate::scene::VisualElement;

/// Current viewport dimensions in logical (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Backing surface size in physical pixels (never zero)
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        let w = (self.width * ratio).round().max(1.0) as u32;
        let h = (self.height * ratio).round().max(1.0) as u32;
        (w, h)
    }
}

/// Events that require a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    Resize,
    OrientationChange,
}

impl ViewportEvent {
    pub const ALL: [ViewportEvent; 2] = [ViewportEvent::Resize, ViewportEvent::OrientationChange];

    /// DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewportEvent::Resize => "resize",
            ViewportEvent::OrientationChange => "orientationchange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

/// CSS placement of a chrome image. The pivot becomes a percentage
/// translate, so it holds before the image has been measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomPlacement {
    pub left: f32,
    pub top: f32,
    /// Percent of the image's own size
    pub translate: Vec2,
}

impl DomPlacement {
    pub fn of(el: &VisualElement) -> Self {
        let origin = el.pos + el.offset;
        Self {
            left: origin.x,
            top: origin.y,
            translate: Vec2::ZERO - el.pivot * 100.0,
        }
    }

    /// Value for the `transform` style property
    pub fn transform(&self) -> String {
        format!("translate({}%, {}%)", self.translate.x, self.translate.y)
    }
}
