//! Ringshot engine crate.
//!
//! Platform + GPU runtime, the shader program layer, geometry, and the
//! frame export pipeline used by the viewer.

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod export;
pub mod geometry;
pub mod logging;
pub mod program;
pub mod render;
pub mod transform;
