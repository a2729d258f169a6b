//! egui overlay composited over the video quad
//!
//! Wraps the egui context, winit input state, and the egui-wgpu renderer
//! bound to the same device the quad renderer uses. The overlay pass is
//! recorded into the frame's command encoder after the video draw, so it
//! lands on screen before the buffer swap.

use winit::window::Window;

use crate::video::Letterbox;

/// Data the overlay displays each frame
pub struct OverlayContent<'a> {
    /// Name of the opened file
    pub file_name: &'a str,
    /// Codec short name
    pub codec_name: &'a str,
    /// Frame width in pixels
    pub frame_width: u32,
    /// Frame height in pixels
    pub frame_height: u32,
    /// Container duration in seconds, 0.0 if unknown
    pub duration_secs: f64,
    /// Rectangle the frame is currently drawn into
    pub letterbox: Letterbox,
}

/// Immediate-mode UI layered over the rendered frame
///
/// Must be created after the GPU context and dropped before it.
pub struct OverlayUi {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl OverlayUi {
    /// Create the overlay bound to the given window and device
    pub fn new(window: &Window, device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let mut style = (*ctx.style()).clone();
        style.visuals.window_shadow = egui::epaint::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Offer a raw window event to the toolkit
    ///
    /// The toolkit sees every event before the window's own handling; the
    /// returned response says whether it consumed the event and whether a
    /// repaint is wanted.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Build the widget tree and record the overlay pass into `encoder`
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        screen_size: [u32; 2],
        content: &OverlayContent<'_>,
    ) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);

        self.draw_widgets(content);

        let full_output = self.ctx.end_pass();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: screen_size,
            pixels_per_point: window.scale_factor() as f32,
        };

        self.renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);

        record_overlay_pass(
            &self.renderer,
            encoder,
            target,
            &paint_jobs,
            &screen_descriptor,
        );

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn draw_widgets(&self, content: &OverlayContent<'_>) {
        egui::Window::new("Frame Info")
            .default_pos([16.0, 16.0])
            .resizable(false)
            .show(&self.ctx, |ui| {
                egui::Grid::new("frame_info_grid")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("File");
                        ui.label(content.file_name);
                        ui.end_row();

                        ui.label("Codec");
                        ui.label(content.codec_name);
                        ui.end_row();

                        ui.label("Size");
                        ui.label(format!(
                            "{}\u{00d7}{}",
                            content.frame_width, content.frame_height
                        ));
                        ui.end_row();

                        ui.label("Duration");
                        ui.label(format_duration(content.duration_secs));
                        ui.end_row();

                        ui.label("Viewport");
                        ui.label(format!(
                            "{:.0}\u{00d7}{:.0} at ({:.0}, {:.0})",
                            content.letterbox.width,
                            content.letterbox.height,
                            content.letterbox.x,
                            content.letterbox.y
                        ));
                        ui.end_row();
                    });
            });
    }
}

/// Record the egui draw data into its own render pass
fn record_overlay_pass(
    renderer: &egui_wgpu::Renderer,
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    paint_jobs: &[egui::ClippedPrimitive],
    screen_descriptor: &egui_wgpu::ScreenDescriptor,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Overlay Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    // SAFETY: The render_pass is used only within this function and dropped
    // before the encoder is finished.
    let render_pass_static: &mut wgpu::RenderPass<'static> =
        unsafe { std::mem::transmute(&mut render_pass) };

    renderer.render(render_pass_static, paint_jobs, screen_descriptor);
}

/// Format seconds as m:ss for display
fn format_duration(secs: f64) -> String {
    if secs <= 0.0 {
        return "unknown".to_string();
    }
    let total = secs.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "unknown");
        assert_eq!(format_duration(59.4), "0:59");
        assert_eq!(format_duration(61.0), "1:01");
        assert_eq!(format_duration(3600.0), "60:00");
    }
}
