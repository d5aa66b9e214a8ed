//! Coordinate-space transforms.
//!
//! Pixel space (top-left origin, +Y down) is mapped to clip space by an
//! orthographic projection with bottom/top swapped. The view is identity; the
//! combined matrix is always `projection * view`.

mod mat4;

pub use mat4::Mat4;

use crate::coords::Viewport;

/// Projection, view and their product for a fixed viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub projection: Mat4,
    pub view: Mat4,
    pub combined: Mat4,
}

impl Transform {
    /// Builds the pixel-space transform for `viewport`.
    ///
    /// Resizing is unsupported, so callers compute this once.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let projection =
            Mat4::orthographic(0.0, viewport.width, viewport.height, 0.0, 0.0, 1.0);
        Self::compose(projection, Mat4::identity())
    }

    /// Combines as `projection * view`: the view applies first.
    pub fn compose(projection: Mat4, view: Mat4) -> Self {
        Self {
            projection,
            view,
            combined: Mat4::multiply(&projection, &view),
        }
    }
}
