//! Stage to vertex conversion

use glam::Vec2;

use super::vertex::{Vertex, linearize};
use crate::hex_to_rgba;
use crate::scene::{ElementKind, Stage, VisualElement};

/// Logical pixel (origin top-left, y down) to clip space
#[inline]
pub fn pixel_to_ndc(p: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(p.x / viewport.x * 2.0 - 1.0, 1.0 - p.y / viewport.y * 2.0)
}

/// Two triangles covering a bar, or `None` if the element draws nothing
pub fn bar_quad(el: &VisualElement, viewport: Vec2, linear: bool) -> Option<[Vertex; 6]> {
    let ElementKind::Bar { color } = el.kind else {
        return None;
    };
    if !el.is_drawn() || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }

    let mut rgba = hex_to_rgba(color, el.alpha.clamp(0.0, 1.0));
    if linear {
        rgba = linearize(rgba);
    }

    let (min, max) = el.bounds();
    let tl = pixel_to_ndc(min, viewport);
    let br = pixel_to_ndc(max, viewport);

    Some([
        Vertex::new(tl.x, tl.y, rgba),
        Vertex::new(tl.x, br.y, rgba),
        Vertex::new(br.x, tl.y, rgba),
        Vertex::new(br.x, tl.y, rgba),
        Vertex::new(tl.x, br.y, rgba),
        Vertex::new(br.x, br.y, rgba),
    ])
}

/// Vertices for every drawn bar, back to front
pub fn stage_vertices(stage: &Stage, viewport: Vec2, linear: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stage.len() * 6);
    for el in stage.iter() {
        if let Some(quad) = bar_quad(el, viewport, linear) {
            vertices.extend_from_slice(&quad);
        }
    }
    vertices
}
