use core::ops::AddAssign;

/// 2D vector in pixels (or pixel offsets).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Clamps both components to `[-limit, limit]`.
    #[inline]
    pub fn clamp_abs(self, limit: f32) -> Self {
        let limit = limit.abs();
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assign_accumulates() {
        let mut v = Vec2::zero();
        v += Vec2::new(-0.5, 0.25);
        v += Vec2::new(-0.5, 0.25);
        assert_eq!(v, Vec2::new(-1.0, 0.5));
    }

    #[test]
    fn clamp_abs_is_symmetric() {
        let v = Vec2::new(3.0, -7.0).clamp_abs(2.0);
        assert_eq!(v, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn clamp_abs_keeps_values_in_range() {
        let v = Vec2::new(0.1, -0.2);
        assert_eq!(v.clamp_abs(1.0), v);
    }
}
