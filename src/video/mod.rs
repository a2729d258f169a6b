//! Video decoding, GPU texture, and rendering module
//!
//! Provides first-frame decoding using FFmpeg via the `ffmpeg-next` crate,
//! plus the GPU texture and quad renderer used to display the frame.

pub(crate) mod convert;
mod decoder;
mod frame;
mod renderer;
mod texture;

pub use decoder::{decode_first_frame_from_path, FirstFrameDecoder, FirstFrameError, SourceInfo};
pub use frame::DecodedFrame;
pub use renderer::{Letterbox, QuadRenderer};
pub use texture::VideoTexture;
