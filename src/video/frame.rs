//! Decoded video frame representation
//!
//! Holds the raw pixel data and dimensions of the one frame the decoder
//! produces. Pixels are tightly packed RGB, 3 bytes per pixel.

/// A decoded video frame with pixel data
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Packed RGB pixel data (3 bytes per pixel, no row padding)
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl DecodedFrame {
    /// Create a new RGB frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Get the expected data size for the given dimensions (width * height * 3)
    pub fn expected_size(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 3
    }

    /// Get the stride (bytes per row)
    pub fn stride(&self) -> usize {
        (self.width as usize) * 3
    }

    /// Check if the frame data has the correct size
    pub fn is_valid(&self) -> bool {
        self.data.len() == Self::expected_size(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let width = 1920;
        let height = 1080;
        let data = vec![0u8; DecodedFrame::expected_size(width, height)];
        let frame = DecodedFrame::new(data, width, height);

        assert_eq!(frame.width, 1920);
        assert_eq!(frame.height, 1080);
        assert!(frame.is_valid());
        assert_eq!(frame.stride(), 1920 * 3);
    }

    #[test]
    fn test_expected_size() {
        assert_eq!(DecodedFrame::expected_size(1920, 1080), 1920 * 1080 * 3);
        assert_eq!(DecodedFrame::expected_size(1280, 720), 1280 * 720 * 3);
    }

    #[test]
    fn test_truncated_frame_is_invalid() {
        let frame = DecodedFrame::new(vec![0u8; 10], 4, 4);
        assert!(!frame.is_valid());
    }
}
