use std::path::{Path, PathBuf};

use super::{encode_png_with, write_file, ExportError, FrameBuffer, PngCompression};

/// Encodes frames and overwrites a single artifact with each one.
#[derive(Debug, Clone)]
pub struct FrameExporter {
    path: PathBuf,
    compression: PngCompression,
    frames_written: u64,
}

impl FrameExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            compression: PngCompression::default(),
            frames_written: 0,
        }
    }

    pub fn with_compression(mut self, compression: PngCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Row-corrects, encodes and persists one frame.
    ///
    /// Rows are flipped only for `RowOrigin::BottomLeft` frames; GPU readback
    /// is already top-down and is written as is. On error the previous
    /// artifact is left as it was.
    pub fn export(&mut self, frame: FrameBuffer) -> Result<(), ExportError> {
        let frame = frame.into_top_down();
        let png = encode_png_with(frame.width(), frame.height(), frame.as_bytes(), self.compression)?;
        write_file(&self.path, &png)?;

        self.frames_written += 1;
        log::debug!(
            "exported frame {} ({} bytes) to {}",
            self.frames_written,
            png.len(),
            self.path.display()
        );
        Ok(())
    }
}
