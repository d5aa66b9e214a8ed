use std::path::PathBuf;

use anyhow::{Context, Result};

use ringshot_engine::coords::{ColorRgba, Vec2, Viewport};
use ringshot_engine::core::{App, AppControl, FrameCtx, RenderOutcome};
use ringshot_engine::export::{CanvasReadback, FrameExporter, PngCompression};
use ringshot_engine::geometry::SpokeRing;
use ringshot_engine::input::{InteractionConfig, InteractionState, KeyEvent, KeyOutcome};
use ringshot_engine::program::Program;
use ringshot_engine::render::{Canvas, RenderTarget, SpokeRenderer, SpokeUniforms};
use ringshot_engine::transform::Transform;
use ringshot_engine::window::{LogicalSize, RuntimeConfig};

/// Everything the viewer needs to know before the window opens.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Overwritten after every rendered frame.
    pub artifact: PathBuf,
    pub ring: SpokeRing,
    pub clear: ColorRgba,
    pub interaction: InteractionConfig,
    pub compression: PngCompression,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "ringshot".to_string(),
            width: 640,
            height: 480,
            artifact: PathBuf::from("out.png"),
            ring: SpokeRing::default(),
            clear: ColorRgba::from_u8(220, 220, 220, 255),
            interaction: InteractionConfig::default(),
            compression: PngCompression::default(),
        }
    }
}

impl ViewerConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::from_pixels(self.width, self.height)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            size: LogicalSize::new(self.width as f64, self.height as f64),
        }
    }
}

/// Offscreen copy of the frame that gets exported.
struct ExportTarget {
    canvas: Canvas,
    readback: CanvasReadback,
}

/// Draws the spoke ring and exports each frame.
pub struct Viewer {
    config: ViewerConfig,
    interaction: InteractionState,
    transform: Transform,
    renderer: SpokeRenderer,
    exporter: FrameExporter,
    export_target: Option<ExportTarget>,
}

impl Viewer {
    /// Resolves the program interface; fails if a mandatory input is absent.
    pub fn new(config: ViewerConfig, program: Program) -> Result<Self> {
        let renderer = SpokeRenderer::new(program, config.ring)
            .context("spoke program is missing a required input")?;

        Ok(Self {
            interaction: InteractionState::new(config.interaction),
            transform: Transform::for_viewport(config.viewport()),
            renderer,
            exporter: FrameExporter::new(config.artifact.clone()).with_compression(config.compression),
            export_target: None,
            config,
        })
    }

    fn uniforms(&self) -> SpokeUniforms {
        let viewport = self.config.viewport();
        SpokeUniforms {
            matrix: self.transform.combined,
            offset: self.interaction.offset(),
            color: ColorRgba::white(),
            world: Vec2::new(viewport.width, viewport.height),
        }
    }

    fn ensure_export_target(&mut self, device: &wgpu::Device) {
        if self.export_target.is_some() {
            return;
        }

        let (width, height) = (self.config.width, self.config.height);
        self.export_target = Some(ExportTarget {
            canvas: Canvas::new(device, width, height),
            readback: CanvasReadback::new(device, width, height),
        });
    }
}

impl App for Viewer {
    fn on_key(&mut self, event: &KeyEvent) -> AppControl {
        match self.interaction.handle_key(event) {
            KeyOutcome::Close => AppControl::Exit,
            KeyOutcome::Moved | KeyOutcome::Ignored => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        self.ensure_export_target(ctx.gpu.device());

        let uniforms = self.uniforms();
        let clear = self.config.clear;
        let renderer = &mut self.renderer;
        let Some(target_res) = self.export_target.as_ref() else {
            return Ok(AppControl::Continue);
        };

        let outcome = ctx.render(|rctx, target| {
            renderer.write_uniforms(rctx, &uniforms);

            let canvas_ctx = rctx.retarget(Canvas::FORMAT, target_res.canvas.viewport());
            {
                let mut canvas_target =
                    RenderTarget::new(&mut *target.encoder, target_res.canvas.view());
                renderer.draw(&canvas_ctx, &mut canvas_target, clear);
            }
            renderer.draw(rctx, target, clear);

            target_res
                .readback
                .record_copy(target.encoder, target_res.canvas.texture());
            Ok(())
        })?;

        if outcome == RenderOutcome::Skipped {
            log::debug!("frame {} skipped; artifact unchanged", ctx.frame_index);
            return Ok(AppControl::Continue);
        }

        let frame = target_res
            .readback
            .read(ctx.gpu.device())
            .context("failed to read back rendered frame")?;

        self.exporter
            .export(frame)
            .with_context(|| format!("failed to export frame to {}", self.exporter.path().display()))?;

        Ok(AppControl::Continue)
    }
}
