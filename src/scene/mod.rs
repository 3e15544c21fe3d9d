//! Scene graph
//!
//! The stage owns every visual element. Animators and the layout manager
//! refer to elements by `ElementId` only; the renderer iterates the stage.

pub mod element;
pub mod stage;

pub use element::{ElementId, ElementKind, VisualElement};
pub use stage::Stage;
