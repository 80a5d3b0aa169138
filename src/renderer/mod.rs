//! WebGPU rendering module
//!
//! Turns a simulation `Snapshot` into colored quads each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, world_to_ndc};
pub use vertex::Vertex;
