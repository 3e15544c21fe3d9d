//! The stage: an ordered list of elements painted back to front

use glam::Vec2;

use super::element::{ElementId, ElementKind, VisualElement};
use crate::layout::ChromeSlot;

/// Mutable scene graph
#[derive(Debug, Clone)]
pub struct Stage {
    /// Clear color (0xRRGGBB)
    background: u32,
    /// Paint order = insertion order
    elements: Vec<VisualElement>,
    next_id: u32,
}

impl Stage {
    pub fn new(background: u32) -> Self {
        Self {
            background,
            elements: Vec::new(),
            next_id: 1,
        }
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    /// Add a bar rectangle, initially transparent at the origin
    pub fn add_bar(&mut self, color: u32, offset: Vec2, size: Vec2) -> ElementId {
        self.push(ElementKind::Bar { color }, size, offset, Vec2::ZERO, 0.0)
    }

    /// Add a chrome sprite, initially hidden until visibility is synced
    pub fn add_sprite(&mut self, slot: ChromeSlot, size: Vec2, pivot: Vec2) -> ElementId {
        let id = self.push(ElementKind::Sprite { slot }, size, Vec2::ZERO, pivot, 1.0);
        if let Some(el) = self.get_mut(id) {
            el.visible = slot == ChromeSlot::Title;
        }
        id
    }

    fn push(
        &mut self,
        kind: ElementKind,
        size: Vec2,
        offset: Vec2,
        pivot: Vec2,
        alpha: f32,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(VisualElement {
            id,
            kind,
            pos: Vec2::ZERO,
            alpha,
            visible: true,
            size,
            offset,
            pivot,
        });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&VisualElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut VisualElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements in paint order
    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost visible sprite under `point`
    pub fn hit_test(&self, point: Vec2) -> Option<&VisualElement> {
        self.elements
            .iter()
            .rev()
            .filter(|e| matches!(e.kind, ElementKind::Sprite { .. }) && e.is_drawn())
            .find(|e| e.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable_and_ordered() {
        let mut stage = Stage::new(0x000000);
        let a = stage.add_bar(0xff0000, Vec2::new(-5.0, 0.0), Vec2::new(5.0, 100.0));
        let b = stage.add_bar(0x00ff00, Vec2::new(-5.0, 0.0), Vec2::new(5.0, 100.0));
        assert_ne!(a, b);
        assert_eq!(stage.len(), 2);
        let order: Vec<_> = stage.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(stage.get(a).unwrap().alpha, 0.0);
    }

    #[test]
    fn test_buttons_start_hidden() {
        let mut stage = Stage::new(0x000000);
        let title = stage.add_sprite(ChromeSlot::Title, Vec2::new(100.0, 40.0), Vec2::ZERO);
        let enter = stage.add_sprite(
            ChromeSlot::EnterFullscreen,
            Vec2::new(40.0, 40.0),
            Vec2::new(1.0, 0.0),
        );
        assert!(stage.get(title).unwrap().visible);
        assert!(!stage.get(enter).unwrap().visible);
    }

    #[test]
    fn test_hit_test_skips_hidden_and_bars() {
        let mut stage = Stage::new(0x000000);
        let bar = stage.add_bar(0xff0000, Vec2::ZERO, Vec2::new(50.0, 50.0));
        stage.get_mut(bar).unwrap().alpha = 1.0;
        let enter = stage.add_sprite(
            ChromeSlot::EnterFullscreen,
            Vec2::new(40.0, 40.0),
            Vec2::ZERO,
        );

        assert!(stage.hit_test(Vec2::new(10.0, 10.0)).is_none());

        stage.get_mut(enter).unwrap().visible = true;
        assert_eq!(stage.hit_test(Vec2::new(10.0, 10.0)).map(|e| e.id), Some(enter));
    }
}
