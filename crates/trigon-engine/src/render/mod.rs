//! GPU rendering subsystem.
//!
//! The mesh renderer consumes tessellated canvas content and issues GPU
//! commands via wgpu. It owns its GPU resources (pipeline, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
