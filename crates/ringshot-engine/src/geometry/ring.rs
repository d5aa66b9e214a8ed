use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};

/// One spoke endpoint in pixel coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
pub struct SpokeVertex {
    pub pos: [i16; 2],
}

impl SpokeVertex {
    /// Position attribute bound to the program's resolved `shader_location`.
    pub fn attributes(shader_location: u32) -> [wgpu::VertexAttribute; 1] {
        [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Sint16x2,
            offset: 0,
            shader_location,
        }]
    }

    pub fn layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpokeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// Radial spokes between an inner and an outer circle.
///
/// Each angular sample contributes one inner point and one outer point, so
/// consecutive vertex pairs form independent line segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpokeRing {
    pub center: (f64, f64),
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub samples: u32,
}

impl Default for SpokeRing {
    fn default() -> Self {
        Self {
            center: (320.0, 240.0),
            inner_radius: 50.0,
            outer_radius: 300.0,
            samples: 64,
        }
    }
}

impl SpokeRing {
    /// Generates `2 * samples` vertices over `[0, 2π)`.
    ///
    /// Coordinates are truncated toward zero into `i16`. Values outside the
    /// `i16` range are not detected; keep the center and radii small enough.
    pub fn build(&self) -> Vec<SpokeVertex> {
        let (cx, cy) = self.center;
        let step = TAU / self.samples.max(1) as f64;

        let mut out = Vec::with_capacity(self.samples as usize * 2);
        for i in 0..self.samples {
            let angle = i as f64 * step;
            let (sin, cos) = angle.sin_cos();
            for radius in [self.inner_radius, self.outer_radius] {
                out.push(SpokeVertex {
                    pos: [(cx + radius * cos) as i16, (cy + radius * sin) as i16],
                });
            }
        }
        out
    }

    /// Flattened coordinates: `x0, y0, x1, y1, ...` (`4 * samples` values).
    pub fn coordinates(&self) -> Vec<i16> {
        self.build().iter().flat_map(|v| v.pos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_determines_coordinate_count() {
        for samples in [1, 3, 64, 100] {
            let ring = SpokeRing {
                samples,
                ..SpokeRing::default()
            };
            assert_eq!(ring.coordinates().len(), 4 * samples as usize);
            assert_eq!(ring.build().len(), 2 * samples as usize);
        }
    }

    #[test]
    fn first_spoke_points_along_positive_x() {
        let v = SpokeRing::default().build();
        assert_eq!(v[0].pos, [370, 240]);
        assert_eq!(v[1].pos, [620, 240]);
    }

    #[test]
    fn quarter_turn_points_down() {
        let v = SpokeRing::default().build();
        // Sample 16 of 64 is at π/2; +y is down in pixel space.
        assert_eq!(v[32].pos, [320, 290]);
        assert_eq!(v[33].pos, [320, 540]);
    }

    #[test]
    fn coordinates_truncate_toward_zero() {
        let ring = SpokeRing {
            center: (0.0, 0.0),
            inner_radius: 10.7,
            outer_radius: -10.7,
            samples: 1,
        };
        assert_eq!(ring.coordinates(), vec![10, 0, -10, 0]);
    }

    #[test]
    fn default_ring_can_go_off_canvas() {
        // The outer circle reaches above the canvas; negative values survive as i16.
        let min_y = SpokeRing::default()
            .build()
            .iter()
            .map(|v| v.pos[1])
            .min()
            .unwrap();
        assert!((-60..0).contains(&min_y));
    }

    #[test]
    fn vertex_is_four_bytes() {
        assert_eq!(std::mem::size_of::<SpokeVertex>(), 4);
    }
}
