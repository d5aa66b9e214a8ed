use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use super::{ExportError, FrameBuffer, RowOrigin};

/// zlib effort used for the artifact.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PngCompression {
    /// Favors encode speed; the redraw loop waits on every encode.
    #[default]
    Fast,
    Default,
    Best,
}

impl PngCompression {
    fn to_image(self) -> CompressionType {
        match self {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

/// Encodes a top-down RGBA8 raster as PNG with default compression.
///
/// `rgba` must be exactly `width * height * 4` bytes; it is never modified.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ExportError> {
    encode_png_with(width, height, rgba, PngCompression::Default)
}

pub fn encode_png_with(
    width: u32,
    height: u32,
    rgba: &[u8],
    compression: PngCompression,
) -> Result<Vec<u8>, ExportError> {
    let expected = FrameBuffer::byte_len(width, height);
    if rgba.len() != expected {
        return Err(ExportError::SizeMismatch {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, compression.to_image(), FilterType::Adaptive)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(ExportError::Encode)?;
    Ok(out)
}

/// Decodes a PNG into a top-down RGBA8 frame.
pub fn decode_png(bytes: &[u8]) -> Result<FrameBuffer, ExportError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(ExportError::Decode)?
        .to_rgba8();
    let (width, height) = image.dimensions();
    FrameBuffer::from_rgba(width, height, RowOrigin::TopLeft, image.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(frame: &FrameBuffer) {
        let before = frame.as_bytes().to_vec();
        let png = encode_png(frame.width(), frame.height(), frame.as_bytes()).unwrap();
        assert_eq!(frame.as_bytes(), &before[..], "encoder must not touch its input");

        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.width(), frame.width());
        assert_eq!(decoded.height(), frame.height());
        assert_eq!(decoded.as_bytes(), frame.as_bytes());
    }

    #[test]
    fn all_zero_round_trips() {
        round_trip(&FrameBuffer::new(64, 48, RowOrigin::TopLeft));
    }

    #[test]
    fn all_ff_round_trips() {
        let frame =
            FrameBuffer::from_rgba(64, 48, RowOrigin::TopLeft, vec![0xFF; 64 * 48 * 4]).unwrap();
        round_trip(&frame);
    }

    #[test]
    fn distinct_corners_round_trip() {
        let mut frame = FrameBuffer::new(640, 480, RowOrigin::TopLeft);
        frame.set_pixel(0, 0, [255, 0, 0, 255]);
        frame.set_pixel(639, 0, [0, 255, 0, 255]);
        frame.set_pixel(0, 479, [0, 0, 255, 255]);
        frame.set_pixel(639, 479, [255, 255, 255, 7]);
        round_trip(&frame);
    }

    #[test]
    fn every_compression_level_is_lossless() {
        let pixels = (0..32 * 8 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let frame = FrameBuffer::from_rgba(32, 8, RowOrigin::TopLeft, pixels).unwrap();
        for level in [PngCompression::Fast, PngCompression::Default, PngCompression::Best] {
            let png = encode_png_with(32, 8, frame.as_bytes(), level).unwrap();
            assert_eq!(decode_png(&png).unwrap(), frame);
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            encode_png(4, 4, &[0; 63]),
            Err(ExportError::SizeMismatch { expected: 64, actual: 63, .. })
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(decode_png(b"not a png"), Err(ExportError::Decode(_))));
    }
}
