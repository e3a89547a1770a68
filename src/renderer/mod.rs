//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in field coordinates and
//! mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
