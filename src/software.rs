//! Software presentation path — GDI stretch blit
//!
//! Fallback renderer used when the GPU stack is unavailable or when the
//! environment selects it explicitly. Converts the frame to a top-down
//! BGRA DIB and stretches it into the letterboxed client rectangle with
//! `StretchDIBits`, filling the rest with black.

/// Errors from the software blit path
#[derive(Debug, thiserror::Error)]
pub enum SoftwareBlitError {
    /// The platform has no software blit implementation
    #[error("software rendering is only supported on Windows")]
    Unsupported,
    /// The window did not expose a Win32 handle
    #[error("window has no Win32 handle")]
    NoWin32Handle,
    /// A GDI call failed
    #[error("GDI blit failed: {0}")]
    Gdi(String),
}

#[cfg(target_os = "windows")]
mod platform {
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use windows::Win32::Foundation::{HWND, RECT};
    use windows::Win32::Graphics::Gdi::{
        FillRect, GetDC, GetStockObject, ReleaseDC, SetStretchBltMode, StretchDIBits, BITMAPINFO,
        BITMAPINFOHEADER, BI_RGB, BLACK_BRUSH, DIB_RGB_COLORS, HALFTONE, HBRUSH, RGBQUAD, SRCCOPY,
    };

    use super::SoftwareBlitError;
    use crate::video::{convert, DecodedFrame, Letterbox};

    /// Blits the decoded frame into an HWND's client area using GDI
    pub struct SoftwareBlitter {
        hwnd: HWND,
        /// Scratch buffer for the per-paint RGB -> BGRA expansion
        bgra: Vec<u8>,
    }

    impl SoftwareBlitter {
        /// Create a blitter targeting the given window
        pub fn new(window: &winit::window::Window) -> Result<Self, SoftwareBlitError> {
            let handle = window
                .window_handle()
                .map_err(|_| SoftwareBlitError::NoWin32Handle)?;

            let hwnd = match handle.as_raw() {
                RawWindowHandle::Win32(h) => HWND(h.hwnd.get() as *mut core::ffi::c_void),
                _ => return Err(SoftwareBlitError::NoWin32Handle),
            };

            Ok(Self {
                hwnd,
                bgra: Vec::new(),
            })
        }

        /// Paint the frame letterboxed into the current client area
        ///
        /// Geometry and pixel expansion are redone from scratch on every
        /// call; nothing is cached between paints.
        pub fn paint(
            &mut self,
            frame: &DecodedFrame,
            client_width: u32,
            client_height: u32,
        ) -> Result<(), SoftwareBlitError> {
            if !frame.is_valid() {
                return Err(SoftwareBlitError::Gdi("frame buffer size mismatch".into()));
            }

            convert::rgb_to_bgra(&frame.data, &mut self.bgra);

            let dest = Letterbox::compute(frame.width, frame.height, client_width, client_height);

            unsafe {
                let hdc = GetDC(self.hwnd);
                if hdc.is_invalid() {
                    return Err(SoftwareBlitError::Gdi("GetDC failed".into()));
                }

                // Background fill around the letterboxed rectangle
                let client = RECT {
                    left: 0,
                    top: 0,
                    right: client_width as i32,
                    bottom: client_height as i32,
                };
                FillRect(hdc, &client, HBRUSH(GetStockObject(BLACK_BRUSH).0));

                SetStretchBltMode(hdc, HALFTONE);

                let bmi = BITMAPINFO {
                    bmiHeader: BITMAPINFOHEADER {
                        biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                        biWidth: frame.width as i32,
                        // Negative height = top-down DIB (origin at top-left).
                        biHeight: -(frame.height as i32),
                        biPlanes: 1,
                        biBitCount: 32,
                        biCompression: BI_RGB.0,
                        biSizeImage: 0,
                        biXPelsPerMeter: 0,
                        biYPelsPerMeter: 0,
                        biClrUsed: 0,
                        biClrImportant: 0,
                    },
                    bmiColors: [RGBQUAD::default(); 1],
                };

                StretchDIBits(
                    hdc,
                    dest.x as i32,
                    dest.y as i32,
                    dest.width as i32,
                    dest.height as i32,
                    0,
                    0,
                    frame.width as i32,
                    frame.height as i32,
                    Some(self.bgra.as_ptr() as *const _),
                    &bmi,
                    DIB_RGB_COLORS,
                    SRCCOPY,
                );

                ReleaseDC(self.hwnd, hdc);
            }

            Ok(())
        }
    }
}

#[cfg(target_os = "windows")]
pub use platform::SoftwareBlitter;

#[cfg(not(target_os = "windows"))]
mod platform {
    use super::SoftwareBlitError;
    use crate::video::DecodedFrame;

    /// Stub on platforms without a GDI blit path
    pub struct SoftwareBlitter;

    impl SoftwareBlitter {
        pub fn new(_window: &winit::window::Window) -> Result<Self, SoftwareBlitError> {
            Err(SoftwareBlitError::Unsupported)
        }

        pub fn paint(
            &mut self,
            _frame: &DecodedFrame,
            _client_width: u32,
            _client_height: u32,
        ) -> Result<(), SoftwareBlitError> {
            Err(SoftwareBlitError::Unsupported)
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub use platform::SoftwareBlitter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_error_display() {
        let err = SoftwareBlitError::Unsupported;
        assert_eq!(
            err.to_string(),
            "software rendering is only supported on Windows"
        );
    }
}
