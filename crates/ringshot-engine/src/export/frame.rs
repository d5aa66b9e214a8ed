use super::ExportError;

/// Where row 0 of a pixel buffer sits in the image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RowOrigin {
    /// Row 0 is the top scanline (PNG order).
    TopLeft,
    /// Row 0 is the bottom scanline (GL-style readback order).
    BottomLeft,
}

impl RowOrigin {
    fn flipped(self) -> Self {
        match self {
            RowOrigin::TopLeft => RowOrigin::BottomLeft,
            RowOrigin::BottomLeft => RowOrigin::TopLeft,
        }
    }
}

/// Tightly packed RGBA8 raster, addressed by row.
///
/// Invariant: `pixels.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    origin: RowOrigin,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Exact byte length of a `width`×`height` RGBA8 raster.
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * Self::BYTES_PER_PIXEL
    }

    /// Zero-filled buffer.
    pub fn new(width: u32, height: u32, origin: RowOrigin) -> Self {
        Self {
            width,
            height,
            origin,
            pixels: vec![0; Self::byte_len(width, height)],
        }
    }

    /// Wraps existing RGBA8 bytes. Any length other than `width * height * 4`
    /// is rejected.
    pub fn from_rgba(
        width: u32,
        height: u32,
        origin: RowOrigin,
        pixels: Vec<u8>,
    ) -> Result<Self, ExportError> {
        let expected = Self::byte_len(width, height);
        if pixels.len() != expected {
            return Err(ExportError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            origin,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> RowOrigin {
        self.origin
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }

    /// Rows in storage order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // `chunks_exact(0)` panics; a zero-width frame has no row bytes.
        self.pixels.chunks_exact(self.stride().max(1))
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let start = x as usize * Self::BYTES_PER_PIXEL;
        let row = self.row(y);
        [row[start], row[start + 1], row[start + 2], row[start + 3]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let start = x as usize * Self::BYTES_PER_PIXEL;
        self.row_mut(y)[start..start + Self::BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Exchanges two rows in place.
    pub fn swap_rows(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let stride = self.stride();
        let (lo, hi) = (a.min(b) as usize, a.max(b) as usize);
        let (head, tail) = self.pixels.split_at_mut(hi * stride);
        head[lo * stride..(lo + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }

    /// Reverses the row order in place: row `i` ↔ row `height - 1 - i`.
    ///
    /// The buffer then describes the same image from the opposite origin.
    /// Applying it twice restores the original bytes.
    pub fn flip_vertical(&mut self) {
        let h = self.height;
        for i in 0..h / 2 {
            self.swap_rows(i, h - 1 - i);
        }
        self.origin = self.origin.flipped();
    }

    /// Returns the buffer with row 0 at the top, flipping only when needed.
    pub fn into_top_down(mut self) -> Self {
        if self.origin == RowOrigin::BottomLeft {
            self.flip_vertical();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned(width: u32, height: u32) -> FrameBuffer {
        let pixels = (0..FrameBuffer::byte_len(width, height))
            .map(|i| (i % 251) as u8)
            .collect();
        FrameBuffer::from_rgba(width, height, RowOrigin::BottomLeft, pixels).unwrap()
    }

    #[test]
    fn byte_len_is_exact() {
        for (w, h) in [(0, 0), (1, 1), (3, 7), (640, 480), (1, 1000)] {
            assert_eq!(FrameBuffer::byte_len(w, h), w as usize * h as usize * 4);
            assert_eq!(FrameBuffer::new(w, h, RowOrigin::TopLeft).as_bytes().len(), FrameBuffer::byte_len(w, h));
        }
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        let err = FrameBuffer::from_rgba(2, 2, RowOrigin::TopLeft, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            ExportError::SizeMismatch { expected: 16, actual: 15, .. }
        ));
        assert!(FrameBuffer::from_rgba(2, 2, RowOrigin::TopLeft, vec![0; 17]).is_err());
    }

    #[test]
    fn flip_twice_is_identity() {
        for (w, h) in [(5, 4), (5, 5), (1, 1), (640, 3)] {
            let original = patterned(w, h);
            let mut frame = original.clone();
            frame.flip_vertical();
            frame.flip_vertical();
            assert_eq!(frame, original);
        }
    }

    #[test]
    fn flip_reverses_rows() {
        let original = patterned(3, 5);
        let mut flipped = original.clone();
        flipped.flip_vertical();
        for y in 0..5 {
            assert_eq!(flipped.row(y), original.row(4 - y));
        }
        assert_eq!(flipped.origin(), RowOrigin::TopLeft);
    }

    #[test]
    fn odd_height_keeps_middle_row() {
        let original = patterned(2, 3);
        let mut flipped = original.clone();
        flipped.flip_vertical();
        assert_eq!(flipped.row(1), original.row(1));
    }

    #[test]
    fn swap_rows_is_order_independent() {
        let mut a = patterned(4, 4);
        let mut b = a.clone();
        a.swap_rows(0, 3);
        b.swap_rows(3, 0);
        assert_eq!(a, b);

        let before = b.clone();
        b.swap_rows(2, 2);
        assert_eq!(b, before);
    }

    #[test]
    fn into_top_down_only_flips_bottom_left() {
        let mut top = FrameBuffer::new(2, 2, RowOrigin::TopLeft);
        top.set_pixel(0, 0, [1, 2, 3, 4]);
        let same = top.clone().into_top_down();
        assert_eq!(same, top);

        let mut bottom = FrameBuffer::new(2, 2, RowOrigin::BottomLeft);
        bottom.set_pixel(1, 0, [9, 9, 9, 9]);
        let fixed = bottom.into_top_down();
        assert_eq!(fixed.origin(), RowOrigin::TopLeft);
        assert_eq!(fixed.pixel(1, 1), [9, 9, 9, 9]);
        assert_eq!(fixed.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn rows_iterates_every_row() {
        let frame = patterned(3, 4);
        assert_eq!(frame.rows().count(), 4);
        assert!(frame.rows().all(|r| r.len() == 12));
    }
}
