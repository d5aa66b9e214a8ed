/// A single acquired surface frame.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// frame. `Gpu::submit` consumes it and presents the texture.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
