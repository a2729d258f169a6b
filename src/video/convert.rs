//! Pixel layout expansion from packed RGB to the 4-byte layouts the
//! presentation paths consume. Alpha is always forced opaque.

/// Expand packed RGB into RGBA, appending into `dst` (cleared first).
pub fn rgb_to_rgba(src: &[u8], dst: &mut Vec<u8>) {
    dst.clear();
    dst.reserve(src.len() / 3 * 4);
    for px in src.chunks_exact(3) {
        dst.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
}

/// Expand packed RGB into BGRA, appending into `dst` (cleared first).
///
/// GDI DIB sections expect blue-first channel order.
pub fn rgb_to_bgra(src: &[u8], dst: &mut Vec<u8>) {
    dst.clear();
    dst.reserve(src.len() / 3 * 4);
    for px in src.chunks_exact(3) {
        dst.extend_from_slice(&[px[2], px[1], px[0], 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_rgba_preserves_channel_order() {
        let src = [10u8, 20, 30, 40, 50, 60];
        let mut dst = Vec::new();
        rgb_to_rgba(&src, &mut dst);
        assert_eq!(dst, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_rgb_to_bgra_swaps_red_and_blue() {
        let src = [10u8, 20, 30];
        let mut dst = Vec::new();
        rgb_to_bgra(&src, &mut dst);
        assert_eq!(dst, [30, 20, 10, 255]);
    }

    #[test]
    fn test_conversion_reuses_destination() {
        let mut dst = vec![1u8; 64];
        rgb_to_rgba(&[0, 0, 0], &mut dst);
        assert_eq!(dst, [0, 0, 0, 255]);
    }
}
