//! Coordinate and color types shared by the renderer, input and export layers.
//!
//! Canonical CPU space:
//! - Pixels of the fixed export canvas
//! - Origin top-left
//! - +X right, +Y down
//!
//! The transform module maps this space to clip space.

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
