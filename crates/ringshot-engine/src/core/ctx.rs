use anyhow::{bail, Result};
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};

/// What happened to a frame passed to [`FrameCtx::render`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderOutcome {
    /// Commands were submitted and the surface presented.
    Presented,
    /// The surface was unavailable; nothing was recorded.
    Skipped,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    /// Number of frames rendered before this one.
    pub frame_index: u64,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Physical surface size as a viewport.
    pub fn viewport(&self) -> Viewport {
        let size = self.gpu.size();
        Viewport::from_pixels(size.width, size.height)
    }

    /// Acquires the surface frame, calls `draw` with a [`RenderCtx`] targeting
    /// the surface format and a [`RenderTarget`] over its view, then submits
    /// and presents.
    ///
    /// `draw` may record additional passes and copies into the same encoder.
    /// Everything it records has executed on the queue once this returns
    /// `Presented`.
    pub fn render<F>(&mut self, draw: F) -> Result<RenderOutcome>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>) -> Result<()>,
    {
        let viewport = self.viewport();

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface unavailable: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => bail!("surface error is unrecoverable"),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(RenderOutcome::Skipped)
                    }
                };
            }
        };

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            viewport,
        );

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target)?;
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(RenderOutcome::Presented)
    }
}
