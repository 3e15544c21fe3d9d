//! Chrome layout
//!
//! Chrome positions are a pure function of the viewport: each slot has a
//! corner anchor plus a signed offset, and every layout pass recomputes all
//! positions from scratch.

use glam::Vec2;

use crate::platform::Viewport;
use crate::scene::{ElementId, Stage};

/// Viewport corner an anchor is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corner point in logical pixels
    pub fn point(&self, viewport: &Viewport) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::ZERO,
            Corner::TopRight => Vec2::new(viewport.width, 0.0),
            Corner::BottomLeft => Vec2::new(0.0, viewport.height),
            Corner::BottomRight => Vec2::new(viewport.width, viewport.height),
        }
    }
}

/// Corner plus signed offset, e.g. top-right (-20, +20)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub corner: Corner,
    pub offset: Vec2,
}

impl Anchor {
    pub const fn new(corner: Corner, offset: Vec2) -> Self {
        Self { corner, offset }
    }

    pub fn resolve(&self, viewport: &Viewport) -> Vec2 {
        self.corner.point(viewport) + self.offset
    }
}

/// Named chrome elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeSlot {
    Title,
    EnterFullscreen,
    ExitFullscreen,
}

impl ChromeSlot {
    pub const ALL: [ChromeSlot; 3] = [
        ChromeSlot::Title,
        ChromeSlot::EnterFullscreen,
        ChromeSlot::ExitFullscreen,
    ];

    /// Horizontal pivot: buttons hang off their right edge
    pub fn pivot(&self) -> Vec2 {
        match self {
            ChromeSlot::Title => Vec2::ZERO,
            ChromeSlot::EnterFullscreen | ChromeSlot::ExitFullscreen => Vec2::new(1.0, 0.0),
        }
    }

    /// DOM id of the backing image on the web build
    pub fn dom_id(&self) -> &'static str {
        match self {
            ChromeSlot::Title => "title",
            ChromeSlot::EnterFullscreen => "screen-mode-full-button",
            ChromeSlot::ExitFullscreen => "screen-mode-normal-button",
        }
    }
}

/// Stage handles of the chrome elements; `None` until created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeHandles {
    pub title: Option<ElementId>,
    pub enter_fullscreen: Option<ElementId>,
    pub exit_fullscreen: Option<ElementId>,
}

impl ChromeHandles {
    pub fn get(&self, slot: ChromeSlot) -> Option<ElementId> {
        match slot {
            ChromeSlot::Title => self.title,
            ChromeSlot::EnterFullscreen => self.enter_fullscreen,
            ChromeSlot::ExitFullscreen => self.exit_fullscreen,
        }
    }

    pub fn set(&mut self, slot: ChromeSlot, id: ElementId) {
        match slot {
            ChromeSlot::Title => self.title = Some(id),
            ChromeSlot::EnterFullscreen => self.enter_fullscreen = Some(id),
            ChromeSlot::ExitFullscreen => self.exit_fullscreen = Some(id),
        }
    }

    /// Reverse lookup from a stage element
    pub fn slot_of(&self, id: ElementId) -> Option<ChromeSlot> {
        ChromeSlot::ALL.into_iter().find(|&s| self.get(s) == Some(id))
    }
}

/// Anchor table for the chrome slots
#[derive(Debug, Clone)]
pub struct LayoutManager {
    anchors: Vec<(ChromeSlot, Anchor)>,
}

impl LayoutManager {
    pub fn new(anchors: Vec<(ChromeSlot, Anchor)>) -> Self {
        Self { anchors }
    }

    /// Title top-left, both toggle buttons top-right, `margin` from the edges
    pub fn splash(margin: f32) -> Self {
        Self::new(vec![
            (
                ChromeSlot::Title,
                Anchor::new(Corner::TopLeft, Vec2::new(margin, margin)),
            ),
            (
                ChromeSlot::EnterFullscreen,
                Anchor::new(Corner::TopRight, Vec2::new(-margin, margin)),
            ),
            (
                ChromeSlot::ExitFullscreen,
                Anchor::new(Corner::TopRight, Vec2::new(-margin, margin)),
            ),
        ])
    }

    pub fn position_of(&self, slot: ChromeSlot, viewport: &Viewport) -> Option<Vec2> {
        self.anchors
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, anchor)| anchor.resolve(viewport))
    }

    /// Position every existing chrome element; returns how many were placed.
    /// Slots without an element yet are skipped.
    pub fn apply(&self, viewport: &Viewport, chrome: &ChromeHandles, stage: &mut Stage) -> usize {
        let mut placed = 0;
        for (slot, anchor) in &self.anchors {
            let Some(el) = chrome.get(*slot).and_then(|id| stage.get_mut(id)) else {
                continue;
            };
            el.pos = anchor.resolve(viewport);
            placed += 1;
        }
        log::debug!(
            "Layout applied for {}x{} ({} elements)",
            viewport.width,
            viewport.height,
            placed
        );
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_resolution() {
        let layout = LayoutManager::splash(20.0);
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(
            layout.position_of(ChromeSlot::Title, &vp),
            Some(Vec2::new(20.0, 20.0))
        );
        assert_eq!(
            layout.position_of(ChromeSlot::EnterFullscreen, &vp),
            Some(Vec2::new(780.0, 20.0))
        );
        assert_eq!(
            layout.position_of(ChromeSlot::ExitFullscreen, &vp),
            Some(Vec2::new(780.0, 20.0))
        );
    }

    #[test]
    fn test_bottom_corners() {
        let vp = Viewport::new(300.0, 200.0);
        let a = Anchor::new(Corner::BottomRight, Vec2::new(-10.0, -10.0));
        assert_eq!(a.resolve(&vp), Vec2::new(290.0, 190.0));
        let b = Anchor::new(Corner::BottomLeft, Vec2::new(10.0, -10.0));
        assert_eq!(b.resolve(&vp), Vec2::new(10.0, 190.0));
    }

    #[test]
    fn test_apply_with_no_elements() {
        let layout = LayoutManager::splash(20.0);
        let mut stage = Stage::new(0);
        let placed = layout.apply(
            &Viewport::new(800.0, 600.0),
            &ChromeHandles::default(),
            &mut stage,
        );
        assert_eq!(placed, 0);
    }

    #[test]
    fn test_apply_skips_missing_and_is_idempotent() {
        let layout = LayoutManager::splash(20.0);
        let mut stage = Stage::new(0);
        let mut chrome = ChromeHandles::default();
        let enter = stage.add_sprite(
            ChromeSlot::EnterFullscreen,
            Vec2::new(40.0, 40.0),
            ChromeSlot::EnterFullscreen.pivot(),
        );
        chrome.set(ChromeSlot::EnterFullscreen, enter);

        let vp = Viewport::new(1024.0, 768.0);
        assert_eq!(layout.apply(&vp, &chrome, &mut stage), 1);
        assert_eq!(layout.apply(&vp, &chrome, &mut stage), 1);
        assert_eq!(stage.get(enter).unwrap().pos, Vec2::new(1004.0, 20.0));

        // Shrink: recomputed, not adjusted
        let vp = Viewport::new(320.0, 480.0);
        layout.apply(&vp, &chrome, &mut stage);
        assert_eq!(stage.get(enter).unwrap().pos, Vec2::new(300.0, 20.0));
    }

    #[test]
    fn test_slot_lookup() {
        let mut chrome = ChromeHandles::default();
        chrome.set(ChromeSlot::ExitFullscreen, ElementId(9));
        assert_eq!(chrome.slot_of(ElementId(9)), Some(ChromeSlot::ExitFullscreen));
        assert_eq!(chrome.slot_of(ElementId(1)), None);
    }
}
