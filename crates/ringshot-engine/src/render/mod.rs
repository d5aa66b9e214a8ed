//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily from the `RenderCtx` they are handed.
//!
//! Convention:
//! - CPU geometry is in canvas pixels (top-left origin, +Y down).
//! - The vertex shader maps it to clip space with the `u_matrix` uniform.

mod canvas;
mod ctx;
mod spokes;

pub use canvas::Canvas;
pub use ctx::{RenderCtx, RenderTarget};
pub use spokes::{SpokeRenderer, SpokeUniforms};
