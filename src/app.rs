//! Application state for the GPU presentation path
//!
//! Owns the decoded frame, the overlay UI, and the wgpu resources for the
//! lifetime of the window. Rendering re-uploads the frame, draws the
//! letterboxed quad, composites the overlay, and presents.

use std::path::Path;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::gpu_context::GpuContext;
use crate::ui::{OverlayContent, OverlayUi};
use crate::video::{DecodedFrame, Letterbox, QuadRenderer, SourceInfo, VideoTexture};

/// Everything the window needs to present the decoded frame on the GPU
///
/// Field order is teardown order: the decoded frame is released first, then
/// the overlay (which is bound to the device), then the GPU resources.
pub struct App {
    /// The decoded frame, owned until teardown
    frame: DecodedFrame,
    /// Overlay UI; initialized after the GPU context, shut down before it
    overlay: OverlayUi,
    /// Bind group tying the video texture into the quad pipeline
    video_bind_group: wgpu::BindGroup,
    /// GPU copy of the frame
    video_texture: VideoTexture,
    /// Quad renderer
    renderer: QuadRenderer,
    /// Device, queue, surface
    gpu: GpuContext,
    /// Reference to the window
    window: Arc<Window>,
    /// Source metadata shown by the overlay
    info: SourceInfo,
    /// File name shown by the overlay
    source_name: String,
}

impl App {
    /// Build the presentation state on top of an initialized GPU context
    pub fn new(
        gpu: GpuContext,
        window: Arc<Window>,
        frame: DecodedFrame,
        info: SourceInfo,
        source: &Path,
    ) -> Self {
        let renderer = QuadRenderer::new(&gpu.device, gpu.config.format);
        let video_texture = VideoTexture::new(&gpu.device, frame.width, frame.height);
        let video_bind_group = renderer.create_bind_group(&gpu.device, &video_texture);

        // The overlay must come up after the GPU context it draws with
        let overlay = OverlayUi::new(&window, &gpu.device, gpu.config.format);

        let source_name = source
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());

        log::info!(
            "Presenting {}x{} frame from {}",
            frame.width,
            frame.height,
            source_name
        );

        Self {
            frame,
            overlay,
            video_bind_group,
            video_texture,
            renderer,
            gpu,
            window,
            info,
            source_name,
        }
    }

    /// Handle window resize events
    ///
    /// Only the surface is reconfigured; the video texture keeps its
    /// dimensions since the source frame never changes size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        log::debug!("Resized to {}x{}", new_size.width, new_size.height);
    }

    /// Forward a window event to the overlay toolkit
    ///
    /// Returns true if the toolkit consumed the event, in which case the
    /// caller must not process it further.
    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        let response = self.overlay.on_window_event(&self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }
        response.consumed
    }

    /// Render one frame: upload, quad pass, overlay pass, present
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Re-upload each paint, expanding 3-byte pixels to opaque 4-byte
        self.video_texture.upload(&self.gpu.queue, &self.frame);

        let (surface_width, surface_height) = self.gpu.size();
        let letterbox = Letterbox::compute(
            self.frame.width,
            self.frame.height,
            surface_width,
            surface_height,
        );

        let output = self.gpu.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .draw(&mut encoder, &surface_view, &self.video_bind_group, letterbox);

        let content = OverlayContent {
            file_name: &self.source_name,
            codec_name: &self.info.codec_name,
            frame_width: self.frame.width,
            frame_height: self.frame.height,
            duration_secs: self.info.duration_secs,
            letterbox,
        };
        self.overlay.render(
            &self.window,
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &surface_view,
            [surface_width, surface_height],
            &content,
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get the current surface size
    pub fn size(&self) -> (u32, u32) {
        self.gpu.size()
    }
}
