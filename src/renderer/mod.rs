//! WebGPU rendering module
//!
//! `shapes` turns the world into a flat list of coloured triangles in canvas
//! coordinates; `pipeline` uploads and draws them. Text lives in the DOM HUD.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use shapes::build_frame;
pub use vertex::Vertex;
