use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

/// Column-major 4×4 matrix, laid out the way WGSL `mat4x4<f32>` expects.
///
/// `cols[c][r]` is the element at row `r`, column `c`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Orthographic projection of the box onto clip space.
    ///
    /// x maps `left..right` to `-1..1` and y maps `bottom..top` to `-1..1`.
    /// Passing `bottom > top` flips y so that it grows downward. Depth maps
    /// `near..far` to `0..1`, the clip range wgpu uses.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        Self {
            cols: [
                [-2.0 * lr, 0.0, 0.0, 0.0],
                [0.0, -2.0 * bt, 0.0, 0.0],
                [0.0, 0.0, nf, 0.0],
                [(left + right) * lr, (top + bottom) * bt, near * nf, 1.0],
            ],
        }
    }

    /// Matrix product `a * b`.
    ///
    /// Applied to a point, `b` acts first. Not commutative.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Self {
        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, out) in col.iter_mut().enumerate() {
                *out = (0..4).map(|k| a.cols[k][r] * b.cols[c][k]).sum();
            }
        }
        Self { cols }
    }

    /// Transforms `(x, y, z, 1)`.
    pub fn transform_point(&self, x: f32, y: f32, z: f32) -> [f32; 4] {
        let v = [x, y, z, 1.0];
        let mut out = [0.0f32; 4];
        for (r, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|k| self.cols[k][r] * v[k]).sum();
        }
        out
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::multiply(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(x: f32, y: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.cols[3] = [x, y, 0.0, 1.0];
        m
    }

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    fn scale(s: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.cols[0][0] = s;
        m.cols[1][1] = s;
        m
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::orthographic(0.0, 640.0, 480.0, 0.0, 0.0, 1.0);
        assert_eq!(Mat4::multiply(&m, &Mat4::identity()), m);
        assert_eq!(Mat4::multiply(&Mat4::identity(), &m), m);
    }

    #[test]
    fn multiply_is_not_commutative() {
        let t = translation(10.0, 0.0);
        let s = scale(2.0);
        assert_ne!(Mat4::multiply(&t, &s), Mat4::multiply(&s, &t));
    }

    #[test]
    fn right_operand_applies_first() {
        // (t * s) scales, then translates.
        let m = translation(10.0, 0.0) * scale(2.0);
        assert_eq!(m.transform_point(1.0, 1.0, 0.0), [12.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn orthographic_maps_box_to_clip_volume() {
        let m = Mat4::orthographic(0.0, 200.0, 0.0, 100.0, 0.0, 1.0);
        assert!(approx(m.transform_point(0.0, 0.0, 0.0), [-1.0, -1.0, 0.0, 1.0]));
        assert!(approx(m.transform_point(200.0, 100.0, 0.0), [1.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn orthographic_depth_uses_zero_to_one() {
        let m = Mat4::orthographic(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(m.transform_point(0.0, 0.0, 0.0)[2], 0.0);
        assert_eq!(m.transform_point(0.0, 0.0, -1.0)[2], 1.0);
    }

    #[test]
    fn bytes_are_column_major() {
        let m = translation(3.0, 4.0);
        let floats: &[f32] = bytemuck::cast_slice(m.as_bytes());
        assert_eq!(&floats[12..16], &[3.0, 4.0, 0.0, 1.0]);
    }
}
