use wgpu::util::DeviceExt;

use super::SpokeVertex;

/// Immutable GPU vertex buffer holding the spoke geometry.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    /// Uploads `vertices` once. The buffer is never written again.
    pub fn upload(device: &wgpu::Device, vertices: &[SpokeVertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ringshot spoke vbo"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("uploaded {} spoke vertices", vertices.len());

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}
