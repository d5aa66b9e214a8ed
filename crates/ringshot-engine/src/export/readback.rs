use super::{ExportError, FrameBuffer, RowOrigin};

/// Staging buffer for copying the canvas texture back to host memory.
///
/// wgpu requires texture-to-buffer rows aligned to
/// `COPY_BYTES_PER_ROW_ALIGNMENT` (256 bytes); the padding is stripped again
/// when the mapped rows are packed into a [`FrameBuffer`].
pub struct CanvasReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
}

impl CanvasReadback {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let padded_bytes_per_row = padded_bytes_per_row(width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ringshot readback buffer"),
            size: padded_bytes_per_row as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            width,
            height,
            padded_bytes_per_row,
        }
    }

    /// Records the copy of `texture` into the staging buffer.
    ///
    /// The texture must be `width`×`height`, 4 bytes per texel, with `COPY_SRC`.
    pub fn record_copy(&self, encoder: &mut wgpu::CommandEncoder, texture: &wgpu::Texture) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Blocks until the submitted copy is visible and returns the pixels.
    ///
    /// wgpu copies rows top-down, so the frame is tagged `TopLeft`.
    pub fn read(&self, device: &wgpu::Device) -> Result<FrameBuffer, ExportError> {
        let slice = self.buffer.slice(..);

        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| ExportError::Readback {
                reason: e.to_string(),
            })?;

        rx.recv()
            .map_err(|_| ExportError::Readback {
                reason: "map callback was dropped".to_string(),
            })?
            .map_err(|e| ExportError::Readback {
                reason: e.to_string(),
            })?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, self.width, self.height, self.padded_bytes_per_row)
        };
        self.buffer.unmap();

        FrameBuffer::from_rgba(self.width, self.height, RowOrigin::TopLeft, pixels)
    }
}

fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * FrameBuffer::BYTES_PER_PIXEL as u32;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

fn unpad_rows(mapped: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row_len = width as usize * FrameBuffer::BYTES_PER_PIXEL;
    let mut pixels = Vec::with_capacity(FrameBuffer::byte_len(width, height));
    for row in mapped
        .chunks(padded_bytes_per_row as usize)
        .take(height as usize)
    {
        pixels.extend_from_slice(&row[..row_len]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_256_bytes() {
        assert_eq!(padded_bytes_per_row(640), 2560);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn unpad_strips_row_padding() {
        let (w, h) = (3u32, 2u32);
        let padded = padded_bytes_per_row(w) as usize;
        let mut mapped = vec![0xEEu8; padded * h as usize];
        for y in 0..h as usize {
            for i in 0..w as usize * 4 {
                mapped[y * padded + i] = (y * 100 + i) as u8;
            }
        }

        let pixels = unpad_rows(&mapped, w, h, padded as u32);
        assert_eq!(pixels.len(), FrameBuffer::byte_len(w, h));
        assert!(!pixels.contains(&0xEE));
        assert_eq!(pixels[12], 100);
    }
}
