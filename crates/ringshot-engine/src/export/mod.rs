//! Frame export.
//!
//! Each redraw the canvas is copied back from the GPU into a [`FrameBuffer`],
//! normalized to top-down row order, encoded as PNG and written over the
//! artifact. All of it happens synchronously inside the redraw.

mod error;
mod exporter;
mod frame;
mod fs;
mod png;
mod readback;

pub use error::ExportError;
pub use exporter::FrameExporter;
pub use frame::{FrameBuffer, RowOrigin};
pub use fs::{read_file, write_file};
pub use png::{decode_png, encode_png, encode_png_with, PngCompression};
pub use readback::CanvasReadback;
