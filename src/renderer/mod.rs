//! WebGPU rendering module
//!
//! Paints the stage's bars as alpha-blended quads. Chrome sprites are not
//! drawn here; on the web they are DOM images positioned from the stage.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
