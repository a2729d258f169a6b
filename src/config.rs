//! Environment-driven configuration
//!
//! The viewer has no configuration file and no command-line flags; the few
//! runtime knobs come from environment variables:
//!
//! - `FRAMEVIEW_RENDERER`: `gpu` (default) or `software`
//! - `FRAMEVIEW_LOG` / `FRAMEVIEW_LOG_FORMAT`: see the telemetry module

/// Which presentation path to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererBackend {
    /// wgpu textured quad with the overlay UI
    #[default]
    Gpu,
    /// GDI stretch blit (Windows only, no overlay)
    Software,
}

impl RendererBackend {
    /// Parse a backend name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gpu" => Some(Self::Gpu),
            "software" | "sw" => Some(Self::Software),
            _ => None,
        }
    }
}

/// Runtime configuration assembled from the environment
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Requested presentation path
    pub renderer: RendererBackend,
}

impl ViewerConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        let renderer = match std::env::var("FRAMEVIEW_RENDERER") {
            Ok(value) => match RendererBackend::parse(&value) {
                Some(backend) => backend,
                None => {
                    tracing::warn!("unrecognized FRAMEVIEW_RENDERER value: {}", value);
                    RendererBackend::default()
                }
            },
            Err(_) => RendererBackend::default(),
        };

        Self { renderer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(RendererBackend::parse("gpu"), Some(RendererBackend::Gpu));
        assert_eq!(
            RendererBackend::parse("Software"),
            Some(RendererBackend::Software)
        );
        assert_eq!(
            RendererBackend::parse(" sw "),
            Some(RendererBackend::Software)
        );
        assert_eq!(RendererBackend::parse("vulkan"), None);
        assert_eq!(RendererBackend::parse(""), None);
    }

    #[test]
    fn test_default_backend_is_gpu() {
        assert_eq!(RendererBackend::default(), RendererBackend::Gpu);
    }
}
