//! Visual elements

use glam::Vec2;

use crate::layout::ChromeSlot;

/// Stable handle to an element on the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// What an element draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Solid rectangle painted by the GPU renderer
    Bar { color: u32 },
    /// Image sprite for a chrome slot (title, toggle buttons)
    Sprite { slot: ChromeSlot },
}

/// A renderable item
#[derive(Debug, Clone, PartialEq)]
pub struct VisualElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Position in logical pixels
    pub pos: Vec2,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub visible: bool,
    pub size: Vec2,
    /// Drawing origin relative to `pos` (bars draw at (-5, 0))
    pub offset: Vec2,
    /// Fraction of `size` the position refers to (x = 1 means right edge)
    pub pivot: Vec2,
}

impl VisualElement {
    /// Top-left and bottom-right corners in logical pixels
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = self.pos + self.offset - self.pivot * self.size;
        (min, min + self.size)
    }

    /// Point-in-bounds test, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Whether the element would produce any pixels
    pub fn is_drawn(&self) -> bool {
        self.visible && self.alpha > 0.0
    }
}
