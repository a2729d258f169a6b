//! Frameview Library
//!
//! Decodes the first frame of a video file and presents it in a window:
//! a wgpu textured quad with an egui overlay on the GPU path, or a GDI
//! stretch blit on the software path.

pub mod app;
pub mod config;
pub mod gpu_context;
pub mod software;
pub mod telemetry;
pub mod ui;
pub mod video;

pub use app::App;
pub use config::{RendererBackend, ViewerConfig};
pub use gpu_context::{GpuContext, GpuInitError};
pub use software::{SoftwareBlitError, SoftwareBlitter};
pub use video::{
    decode_first_frame_from_path, DecodedFrame, FirstFrameDecoder, FirstFrameError, Letterbox,
    QuadRenderer, SourceInfo, VideoTexture,
};
