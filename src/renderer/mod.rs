//! WebGPU rendering module
//!
//! Flat vertex-coloured triangles through a single pipeline. Meshes are
//! rebuilt from the `RenderFrame` every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
