//! WebGPU rendering module
//!
//! Tessellates the frame's render list into colored triangles and draws them
//! in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::tessellate;
pub use vertex::Vertex;
