//! Procedural spoke geometry.
//!
//! The ring is generated once on the CPU as `i16` coordinate pairs and
//! uploaded to an immutable vertex buffer drawn as a line list.

mod buffer;
mod ring;

pub use buffer::GeometryBuffer;
pub use ring::{SpokeRing, SpokeVertex};
