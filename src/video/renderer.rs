//! Quad renderer for displaying the video texture
//!
//! Draws the frame as a textured quad through a pass-through shader pair,
//! letterboxed into the largest centered rectangle that preserves the
//! frame's aspect ratio.

use wgpu::util::DeviceExt;

use super::VideoTexture;

/// A quad vertex: clip-space position plus texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    position: [f32; 3],
    tex_coords: [f32; 2],
}

/// Unit quad covering the viewport, wound as two triangles
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-1.0, 1.0, 0.0],
        tex_coords: [0.0, 0.0],
    },
    QuadVertex {
        position: [1.0, 1.0, 0.0],
        tex_coords: [1.0, 0.0],
    },
    QuadVertex {
        position: [1.0, -1.0, 0.0],
        tex_coords: [1.0, 1.0],
    },
    QuadVertex {
        position: [-1.0, -1.0, 0.0],
        tex_coords: [0.0, 1.0],
    },
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// The centered, aspect-preserving rectangle the frame is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Letterbox {
    /// Compute the largest centered rectangle inside `surface` that matches
    /// the frame's aspect ratio
    ///
    /// A surface wider than the frame pins the rectangle to full height and
    /// centers it horizontally (pillarbox); otherwise the rectangle spans
    /// the full width and centers vertically (letterbox).
    pub fn compute(
        frame_width: u32,
        frame_height: u32,
        surface_width: u32,
        surface_height: u32,
    ) -> Self {
        let surface_width = surface_width.max(1) as f32;
        let surface_height = surface_height.max(1) as f32;

        let frame_aspect = frame_width.max(1) as f32 / frame_height.max(1) as f32;
        let surface_aspect = surface_width / surface_height;

        if surface_aspect > frame_aspect {
            let height = surface_height;
            let width = (height * frame_aspect).min(surface_width);
            Self {
                x: (surface_width - width) / 2.0,
                y: 0.0,
                width,
                height,
            }
        } else {
            let width = surface_width;
            let height = (width / frame_aspect).min(surface_height);
            Self {
                x: 0.0,
                y: (surface_height - height) / 2.0,
                width,
                height,
            }
        }
    }
}

/// Renderer that draws the video texture as a letterboxed quad
pub struct QuadRenderer {
    /// Render pipeline for the textured quad
    pipeline: wgpu::RenderPipeline,
    /// Bind group layout for video texture + sampler
    bind_group_layout: wgpu::BindGroupLayout,
    /// Sampler for video texture filtering
    sampler: wgpu::Sampler,
    /// Immutable quad vertices
    vertex_buffer: wgpu::Buffer,
    /// Immutable quad indices
    index_buffer: wgpu::Buffer,
}

impl QuadRenderer {
    const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Create a new quad renderer targeting the given output format
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Video Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/textured_quad.wgsl").into()),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Video Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Video Bind Group Layout"),
            entries: &[
                // Texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Video Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Video Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &Self::VERTEX_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: output_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
        }
    }

    /// Create a bind group for a video texture
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        video_texture: &VideoTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Video Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(video_texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Clear the target to black and draw the quad into the given viewport
    ///
    /// Issues exactly one indexed draw of six indices. Presentation is the
    /// caller's responsibility so an overlay can draw after this pass.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        bind_group: &wgpu::BindGroup,
        viewport: Letterbox,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Video Quad Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_viewport(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            0.0,
            1.0,
        );
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_width_bound() {
        // 16:9 frame in a 4:3 window pins to the window width
        let vp = Letterbox::compute(1920, 1080, 800, 600);
        assert_eq!(vp.width, 800.0);
        assert_eq!(vp.height, 450.0);
        assert_eq!(vp.x, 0.0);
        assert_eq!(vp.y, 75.0);
    }

    #[test]
    fn test_letterbox_height_bound() {
        // 16:9 frame in an ultrawide window pins to the window height
        let vp = Letterbox::compute(1920, 1080, 2560, 1080);
        assert_eq!(vp.width, 1920.0);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.x, 320.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn test_letterbox_exact_fit() {
        let vp = Letterbox::compute(1280, 720, 1280, 720);
        assert_eq!(vp.width, 1280.0);
        assert_eq!(vp.height, 720.0);
        assert_eq!(vp.x, 0.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn test_letterbox_portrait_frame() {
        // 9:16 frame in a landscape window is pillarboxed
        let vp = Letterbox::compute(1080, 1920, 1920, 1080);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.width, 607.5);
        assert_eq!(vp.x, (1920.0 - 607.5) / 2.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn test_letterbox_never_exceeds_surface() {
        let vp = Letterbox::compute(1919, 1079, 777, 333);
        assert!(vp.width <= 777.0);
        assert!(vp.height <= 333.0);
        assert!(vp.x >= 0.0);
        assert!(vp.y >= 0.0);
    }

    #[test]
    fn test_letterbox_degenerate_surface() {
        // A zero-sized client area must not divide by zero
        let vp = Letterbox::compute(1920, 1080, 0, 0);
        assert!(vp.width > 0.0);
        assert!(vp.height > 0.0);
    }
}
