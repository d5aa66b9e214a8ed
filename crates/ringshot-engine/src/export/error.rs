use std::path::PathBuf;

/// Frame export failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("frame buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("failed to encode PNG")]
    Encode(#[source] image::ImageError),

    #[error("failed to decode PNG")]
    Decode(#[source] image::ImageError),

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("canvas readback failed: {reason}")]
    Readback { reason: String },
}
