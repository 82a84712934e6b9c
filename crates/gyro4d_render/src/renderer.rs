//! GPU implementation of [`SegmentRenderer`]

use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::pipeline::{build_line_vertices, clear_color, LinePipeline};
use crate::wireframe::{LineSegment, LineStyle, SegmentRenderer};

/// Draws segments into a window surface
pub struct WgpuLineRenderer {
    context: RenderContext,
    pipeline: LinePipeline,
    clear_color: wgpu::Color,
}

impl WgpuLineRenderer {
    /// Create the renderer for a window
    pub fn new(window: Arc<Window>, vsync: bool, background: [f32; 4]) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;
        let pipeline = LinePipeline::new(&context.device, context.format());
        Ok(Self {
            context,
            pipeline,
            clear_color: clear_color(background),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(PhysicalSize::new(width, height));
    }
}

impl SegmentRenderer for WgpuLineRenderer {
    fn draw(&mut self, segments: &[LineSegment], style: &LineStyle) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one draws into the fresh surface
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(wgpu::SurfaceError::OutOfMemory.into());
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
                return Ok(());
            }
        };

        let vertices = build_line_vertices(segments, style, self.context.viewport());
        self.pipeline.upload(&self.context.queue, &vertices);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Line Encoder"),
            });

        self.pipeline.render(&mut encoder, &view, self.clear_color);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
