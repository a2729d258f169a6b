//! GPU texture for the decoded frame
//!
//! Manages the wgpu texture the quad renderer samples. Upload expands the
//! packed RGB frame to RGBA through a reusable staging buffer.

use super::{convert, DecodedFrame};

/// A GPU texture holding the decoded video frame
///
/// The texture is sized to the frame at creation and never resized; the
/// source frame's dimensions cannot change in this single-frame design.
pub struct VideoTexture {
    /// The GPU texture
    texture: wgpu::Texture,
    /// Texture view for binding
    view: wgpu::TextureView,
    /// Texture width in pixels
    width: u32,
    /// Texture height in pixels
    height: u32,
    /// Staging buffer for the RGB -> RGBA expansion
    staging: Vec<u8>,
}

impl VideoTexture {
    /// Create a new video texture with the specified dimensions
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Video Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Rgba8UnormSrgb for gamma-corrected display
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            // COPY_DST for uploading data, TEXTURE_BINDING for shader sampling
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
            staging: Vec::new(),
        }
    }

    /// Upload a decoded frame, expanding 3-byte pixels to 4-byte with
    /// opaque alpha
    ///
    /// The frame must have the same dimensions as the texture.
    pub fn upload(&mut self, queue: &wgpu::Queue, frame: &DecodedFrame) {
        assert_eq!(
            frame.width, self.width,
            "Frame width {} doesn't match texture width {}",
            frame.width, self.width
        );
        assert_eq!(
            frame.height, self.height,
            "Frame height {} doesn't match texture height {}",
            frame.height, self.height
        );

        convert::rgb_to_rgba(&frame.data, &mut self.staging);

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.staging,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Get the texture view
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Get the texture width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the texture height
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    // Note: GPU tests would require a wgpu device, which is typically done in integration tests
}
