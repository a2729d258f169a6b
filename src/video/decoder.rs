//! First-frame video decoding using FFmpeg
//!
//! Opens a container via the ffmpeg-next crate, finds the video stream,
//! and feeds packets to the codec until one frame decodes. The frame is
//! converted to packed RGB before being handed to the presentation path.

use std::path::Path;

use super::DecodedFrame;

/// Errors that can occur while bootstrapping the decoder
#[derive(Debug, thiserror::Error)]
pub enum FirstFrameError {
    /// Failed to open or probe the video file
    #[error("failed to open video file: {0}")]
    Open(String),
    /// No video stream found in the container
    #[error("no video stream found in file")]
    NoVideoStream,
    /// Failed to create or open the decoder for the stream's codec
    #[error("failed to create decoder: {0}")]
    DecoderCreation(String),
    /// Failed to create the pixel format converter
    #[error("failed to create scaler: {0}")]
    ScalerCreation(String),
    /// The container ended before any frame decoded
    #[error("no frame decoded before end of stream")]
    NoFrameDecoded,
    /// FFmpeg error
    #[error("ffmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
}

/// Metadata about the opened video, probed alongside the frame
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Short codec name as reported by FFmpeg (e.g. "h264")
    pub codec_name: String,
    /// Container duration in seconds, 0.0 if unknown
    pub duration_secs: f64,
    /// Video width in pixels
    pub width: u32,
    /// Video height in pixels
    pub height: u32,
}

/// One-shot decoder that produces the first frame of a video file
///
/// All FFmpeg resources (input context, codec context, scaler) are owned
/// by this struct and released when it goes out of scope, on every exit
/// path including the failure branches of `open`.
pub struct FirstFrameDecoder {
    /// The input format context
    input: ffmpeg_next::format::context::Input,
    /// Index of the chosen video stream
    video_stream_index: usize,
    /// Video decoder
    decoder: ffmpeg_next::decoder::Video,
    /// Scaler converting the decoder's native format to packed RGB
    scaler: ffmpeg_next::software::scaling::Context,
    /// Video width
    width: u32,
    /// Video height
    height: u32,
    /// Codec name
    codec_name: String,
    /// Duration in seconds
    duration: f64,
}

impl FirstFrameDecoder {
    /// Open a video file and prepare the decode pipeline
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FirstFrameError> {
        // Initialize FFmpeg (safe to call multiple times)
        ffmpeg_next::init()?;

        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        let input = ffmpeg_next::format::input(&path)
            .map_err(|_| FirstFrameError::Open(path_str.clone()))?;

        // Take the first stream whose medium is video. Later video streams
        // in the same container are ignored.
        let video_stream = input
            .streams()
            .find(|s| s.parameters().medium() == ffmpeg_next::media::Type::Video)
            .ok_or(FirstFrameError::NoVideoStream)?;

        let video_stream_index = video_stream.index();

        let time_base = video_stream.time_base();
        let time_base_f64 = time_base.numerator() as f64 / time_base.denominator() as f64;

        let duration = if video_stream.duration() > 0 {
            video_stream.duration() as f64 * time_base_f64
        } else if input.duration() > 0 {
            input.duration() as f64 / ffmpeg_next::ffi::AV_TIME_BASE as f64
        } else {
            0.0
        };

        let parameters = video_stream.parameters();
        let codec_name = ffmpeg_next::decoder::find(parameters.id())
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let context = ffmpeg_next::codec::context::Context::from_parameters(parameters)?;
        let decoder = context.decoder().video().map_err(|e| {
            FirstFrameError::DecoderCreation(format!("{} ({})", e, codec_name))
        })?;

        let width = decoder.width();
        let height = decoder.height();

        tracing::info!(
            "Opened video: {}x{}, duration: {:.2}s, codec: {}",
            width,
            height,
            duration,
            codec_name
        );

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| FirstFrameError::ScalerCreation(e.to_string()))?;

        Ok(Self {
            input,
            video_stream_index,
            decoder,
            scaler,
            width,
            height,
            codec_name,
            duration,
        })
    }

    /// Decode packets until the first frame comes out
    ///
    /// Non-video packets are discarded; video packets the codec rejects are
    /// skipped silently. When the container is exhausted the decoder is
    /// drained, and if nothing decoded by then the call fails.
    pub fn decode_first_frame(&mut self) -> Result<DecodedFrame, FirstFrameError> {
        let mut decoded = ffmpeg_next::frame::Video::empty();
        let mut sent_eof = false;

        loop {
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => return self.convert_frame(&decoded),
                Err(ffmpeg_next::Error::Other {
                    errno: ffmpeg_next::error::EAGAIN,
                }) => {
                    // Need more input - read the next packet
                }
                Err(ffmpeg_next::Error::Eof) => return Err(FirstFrameError::NoFrameDecoded),
                Err(e) => return Err(FirstFrameError::Ffmpeg(e)),
            }

            if sent_eof {
                continue;
            }

            loop {
                match self.input.packets().next() {
                    Some((stream, packet)) => {
                        if stream.index() != self.video_stream_index {
                            continue;
                        }
                        match self.decoder.send_packet(&packet) {
                            Ok(()) => break,
                            Err(e) => {
                                // Corrupt packet; keep reading
                                tracing::debug!("skipping undecodable packet: {}", e);
                            }
                        }
                    }
                    None => {
                        self.decoder.send_eof()?;
                        sent_eof = true;
                        break;
                    }
                }
            }
        }
    }

    /// Run the decoded frame through the scaler and pack the rows tightly
    fn convert_frame(
        &mut self,
        decoded: &ffmpeg_next::frame::Video,
    ) -> Result<DecodedFrame, FirstFrameError> {
        // Some decoders only report the real pixel format once a frame is
        // out; rebuild the scaler if it no longer matches.
        if decoded.format() != self.scaler.input().format {
            self.scaler = ffmpeg_next::software::scaling::Context::get(
                decoded.format(),
                self.width,
                self.height,
                ffmpeg_next::format::Pixel::RGB24,
                self.width,
                self.height,
                ffmpeg_next::software::scaling::Flags::BILINEAR,
            )
            .map_err(|e| FirstFrameError::ScalerCreation(e.to_string()))?;
        }

        let mut rgb_frame = ffmpeg_next::frame::Video::empty();
        self.scaler.run(decoded, &mut rgb_frame)?;

        let data = rgb_frame.data(0);
        let stride = rgb_frame.stride(0);
        let packed_stride = (self.width as usize) * 3;

        let rgb_data = if stride == packed_stride {
            data[..DecodedFrame::expected_size(self.width, self.height)].to_vec()
        } else {
            // Scaler output rows are padded; copy them out tightly
            let mut output = Vec::with_capacity(DecodedFrame::expected_size(self.width, self.height));
            for y in 0..self.height as usize {
                let row_start = y * stride;
                output.extend_from_slice(&data[row_start..row_start + packed_stride]);
            }
            output
        };

        Ok(DecodedFrame::new(rgb_data, self.width, self.height))
    }

    /// Get the video width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the video height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the codec name
    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    /// Get the container duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Get the source metadata
    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            codec_name: self.codec_name.clone(),
            duration_secs: self.duration,
            width: self.width,
            height: self.height,
        }
    }
}

/// Open a file, decode its first frame, and release all decoder resources
pub fn decode_first_frame_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<(DecodedFrame, SourceInfo), FirstFrameError> {
    let mut decoder = FirstFrameDecoder::open(path)?;
    let frame = decoder.decode_first_frame()?;
    let info = decoder.info();
    Ok((frame, info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_error_display() {
        let err = FirstFrameError::NoVideoStream;
        assert_eq!(err.to_string(), "no video stream found in file");
    }

    #[test]
    fn test_exhausted_error_display() {
        let err = FirstFrameError::NoFrameDecoded;
        assert_eq!(err.to_string(), "no frame decoded before end of stream");
    }

    #[test]
    fn test_open_error_names_file() {
        let err = FirstFrameError::Open("missing.mp4".to_string());
        assert!(err.to_string().contains("missing.mp4"));
    }
}
