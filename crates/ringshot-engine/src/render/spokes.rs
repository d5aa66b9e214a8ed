use std::collections::HashMap;

use crate::coords::{ColorRgba, Vec2};
use crate::geometry::{GeometryBuffer, SpokeRing, SpokeVertex};
use crate::program::{AttributeLocation, Program, ProgramError, UniformLocation};
use crate::render::{RenderCtx, RenderTarget};
use crate::transform::Mat4;

/// Per-frame uniform values.
///
/// Only `matrix` is mandatory; the others are written when the program
/// actually reads them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpokeUniforms {
    pub matrix: Mat4,
    pub offset: Vec2,
    pub color: ColorRgba,
    pub world: Vec2,
}

/// Draws the spoke ring as a line list with straight alpha blending.
///
/// Resolves its program interface up front (a missing `a_pos` or `u_matrix`
/// is a startup fault) and creates GPU resources on first use. One pipeline
/// is kept per target format, since the canvas and the window surface
/// usually differ.
pub struct SpokeRenderer {
    program: Program,
    ring: SpokeRing,

    a_pos: AttributeLocation,
    u_matrix: UniformLocation,
    u_offset: Option<UniformLocation>,
    u_color: Option<UniformLocation>,
    u_world: Option<UniformLocation>,

    vs_module: Option<wgpu::ShaderModule>,
    fs_module: Option<wgpu::ShaderModule>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipelines: HashMap<wgpu::TextureFormat, wgpu::RenderPipeline>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_buffers: HashMap<u32, wgpu::Buffer>,

    geometry: Option<GeometryBuffer>,
}

impl SpokeRenderer {
    pub fn new(program: Program, ring: SpokeRing) -> Result<Self, ProgramError> {
        let a_pos = program.require_attribute("a_pos")?;
        let u_matrix = program.require_uniform("u_matrix")?;
        let u_offset = program.uniform("u_offset");
        let u_color = program.uniform("u_color");
        let u_world = program.uniform("u_world");

        log::debug!("a_pos: {a_pos:?}");
        log::debug!("u_matrix: {u_matrix:?}");
        log::debug!("u_offset: {u_offset:?}");
        log::debug!("u_color: {u_color:?}");
        log::debug!("u_world: {u_world:?}");

        if let Some((name, loc)) = program
            .active_uniforms()
            .into_iter()
            .find(|(_, loc)| loc.group != 0)
        {
            return Err(ProgramError::validate(format!(
                "uniform `{name}` is in bind group {}; only group 0 is bound",
                loc.group
            )));
        }

        check_size("u_matrix", Some(u_matrix), MAT4_SIZE)?;
        check_size("u_offset", u_offset, VEC2_SIZE)?;
        check_size("u_color", u_color, VEC4_SIZE)?;
        check_size("u_world", u_world, VEC2_SIZE)?;

        Ok(Self {
            program,
            ring,
            a_pos,
            u_matrix,
            u_offset,
            u_color,
            u_world,
            vs_module: None,
            fs_module: None,
            pipeline_layout: None,
            pipelines: HashMap::new(),
            bind_group: None,
            uniform_buffers: HashMap::new(),
            geometry: None,
        })
    }

    /// Uploads this frame's uniform values.
    ///
    /// Absent optional uniforms are skipped.
    pub fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, uniforms: &SpokeUniforms) {
        self.ensure_bindings(ctx);

        self.write_uniform(ctx, Some(self.u_matrix), uniforms.matrix.as_bytes());
        self.write_uniform(ctx, self.u_offset, bytemuck::bytes_of(&uniforms.offset.to_array()));
        self.write_uniform(ctx, self.u_color, bytemuck::bytes_of(&uniforms.color.to_array()));
        self.write_uniform(ctx, self.u_world, bytemuck::bytes_of(&uniforms.world.to_array()));
    }

    /// Clears `target` to `clear` and draws the ring into it.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, clear: ColorRgba) {
        self.ensure_modules(ctx);
        self.ensure_bindings(ctx);
        self.ensure_geometry(ctx);
        self.ensure_pipeline(ctx);

        let Some(pipeline) = self.pipelines.get(&ctx.format) else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(geometry) = self.geometry.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ringshot spoke pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, geometry.slice());
        rpass.draw(0..geometry.vertex_count(), 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn write_uniform(&self, ctx: &RenderCtx<'_>, loc: Option<UniformLocation>, bytes: &[u8]) {
        let Some(loc) = loc else { return };
        let Some(buffer) = self.uniform_buffers.get(&loc.binding) else { return };
        ctx.queue.write_buffer(buffer, 0, bytes);
    }

    fn ensure_modules(&mut self, ctx: &RenderCtx<'_>) {
        if self.vs_module.is_some() && self.fs_module.is_some() {
            return;
        }

        self.vs_module = Some(ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ringshot spoke vertex shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.vertex().source().to_owned().into()),
        }));
        self.fs_module = Some(ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ringshot spoke fragment shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.fragment().source().to_owned().into()),
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.pipeline_layout.is_some() {
            return;
        }

        let active = self.program.active_uniforms();

        let entries: Vec<wgpu::BindGroupLayoutEntry> = active
            .iter()
            .map(|(_, loc)| wgpu::BindGroupLayoutEntry {
                binding: loc.binding,
                visibility: loc.visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(loc.size as u64),
                },
                count: None,
            })
            .collect();

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("ringshot spoke bgl"),
                entries: &entries,
            });

        let mut buffers = HashMap::new();
        for (name, loc) in &active {
            let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(*name),
                size: uniform_buffer_size(loc.size),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            buffers.insert(loc.binding, buffer);
        }

        let bind_entries: Vec<wgpu::BindGroupEntry> = active
            .iter()
            .filter_map(|(_, loc)| {
                let buffer = buffers.get(&loc.binding)?;
                Some(wgpu::BindGroupEntry {
                    binding: loc.binding,
                    resource: buffer.as_entire_binding(),
                })
            })
            .collect();

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ringshot spoke bind group"),
            layout: &bind_group_layout,
            entries: &bind_entries,
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("ringshot spoke pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        self.uniform_buffers = buffers;
        self.bind_group = Some(bind_group);
        self.pipeline_layout = Some(pipeline_layout);
        self.pipelines.clear();
    }

    fn ensure_geometry(&mut self, ctx: &RenderCtx<'_>) {
        if self.geometry.is_some() {
            return;
        }
        self.geometry = Some(GeometryBuffer::upload(ctx.device, &self.ring.build()));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.contains_key(&ctx.format) {
            return;
        }
        let Some(vs_module) = self.vs_module.as_ref() else { return };
        let Some(fs_module) = self.fs_module.as_ref() else { return };
        let Some(layout) = self.pipeline_layout.as_ref() else { return };

        let attributes = SpokeVertex::attributes(self.a_pos.0);

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ringshot spoke pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: vs_module,
                entry_point: Some(self.program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[SpokeVertex::layout(&attributes)],
            },
            fragment: Some(wgpu::FragmentState {
                module: fs_module,
                entry_point: Some(self.program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("created spoke pipeline for {:?}", ctx.format);
        self.pipelines.insert(ctx.format, pipeline);
    }
}

const MAT4_SIZE: u32 = 64;
const VEC4_SIZE: u32 = 16;
const VEC2_SIZE: u32 = 8;

/// A present uniform must have exactly the size of the value written to it.
fn check_size(
    name: &str,
    loc: Option<UniformLocation>,
    expected: u32,
) -> Result<(), ProgramError> {
    match loc {
        Some(loc) if loc.size != expected => Err(ProgramError::validate(format!(
            "uniform `{name}` is {} bytes; expected {expected}",
            loc.size
        ))),
        _ => Ok(()),
    }
}

/// `SrcAlpha, OneMinusSrcAlpha` on both color and alpha.
fn straight_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// Uniform buffers are padded to 16 bytes.
fn uniform_buffer_size(size: u32) -> u64 {
    (size.max(1) as u64).div_ceil(16) * 16
}
