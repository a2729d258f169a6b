//! Frameview - Main Entry Point
//!
//! Opens a video file chosen through the native file dialog, decodes
//! exactly its first frame, and displays it letterboxed in a window.
//! File selection and decoding happen before the window exists; the
//! event loop only ever re-presents the one decoded frame.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use frameview::config::{RendererBackend, ViewerConfig};
use frameview::software::SoftwareBlitter;
use frameview::video::{decode_first_frame_from_path, DecodedFrame, SourceInfo};
use frameview::{App, GpuContext};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Window, WindowId};

const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Show a blocking error dialog and terminate with a non-zero exit code
fn fatal(title: &str, message: &str) -> ! {
    tracing::error!("{}: {}", title, message);
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(1);
}

/// Run the native file-open dialog, filtered to common video containers
fn pick_video_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Video File")
        .add_filter("Video files", &["mp4", "avi", "mkv", "flv", "mov", "webm"])
        .add_filter("All files", &["*"])
        .pick_file()
}

/// The active presentation path
enum Presenter {
    /// wgpu quad renderer with the egui overlay
    Gpu(App),
    /// GDI stretch blit; the frame stays on the CPU
    Software {
        frame: DecodedFrame,
        blitter: SoftwareBlitter,
    },
}

/// Application lifecycle
///
/// File selection and decoding run to completion in `main` before the
/// event loop starts, so the loop only ever sees the states below.
enum Lifecycle {
    /// First frame decoded, waiting for the event loop to create the window
    Decoded {
        frame: DecodedFrame,
        info: SourceInfo,
        source: PathBuf,
        config: ViewerConfig,
    },
    /// Window and presenter alive; paint and resize re-enter rendering
    Presenting {
        presenter: Presenter,
        window: Arc<Window>,
    },
    /// Resources released, quit posted
    ShuttingDown,
}

/// Main application handler implementing winit's ApplicationHandler trait
struct ViewerApp {
    lifecycle: Lifecycle,
}

impl ViewerApp {
    /// Pick the presentation path, falling back to the software blitter
    /// when GPU bring-up fails
    fn create_presenter(
        window: &Arc<Window>,
        frame: DecodedFrame,
        info: SourceInfo,
        source: &Path,
        config: &ViewerConfig,
    ) -> Presenter {
        match config.renderer {
            RendererBackend::Software => match SoftwareBlitter::new(window) {
                Ok(blitter) => {
                    tracing::info!("Using software blit renderer");
                    Presenter::Software { frame, blitter }
                }
                Err(e) => fatal("Renderer", &format!("Software rendering unavailable: {}", e)),
            },
            RendererBackend::Gpu => {
                match pollster::block_on(GpuContext::new(window.clone())) {
                    Ok(gpu) => Presenter::Gpu(App::new(gpu, window.clone(), frame, info, source)),
                    Err(e) => {
                        tracing::warn!(
                            "GPU initialization failed: {}. Falling back to software blit.",
                            e
                        );
                        match SoftwareBlitter::new(window) {
                            Ok(blitter) => Presenter::Software { frame, blitter },
                            Err(_) => fatal(
                                "Graphics",
                                &format!("Failed to initialize the renderer: {}", e),
                            ),
                        }
                    }
                }
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Single-window app: only the first resume creates the window
        if !matches!(self.lifecycle, Lifecycle::Decoded { .. }) {
            return;
        }
        let Lifecycle::Decoded {
            frame,
            info,
            source,
            config,
        } = std::mem::replace(&mut self.lifecycle, Lifecycle::ShuttingDown)
        else {
            return;
        };

        event_loop.set_control_flow(ControlFlow::Wait);

        let window_attrs = Window::default_attributes()
            .with_title(source.display().to_string())
            .with_inner_size(LogicalSize::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => fatal("Window", &format!("Failed to create window: {}", e)),
        };
        window.set_cursor(CursorIcon::Default);

        let presenter = Self::create_presenter(&window, frame, info, &source, &config);

        window.request_redraw();
        self.lifecycle = Lifecycle::Presenting { presenter, window };
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Lifecycle::Presenting { presenter, window } = &mut self.lifecycle else {
            return;
        };

        // The overlay toolkit sees every event first; consumed events are
        // not processed further
        if let Presenter::Gpu(app) = presenter {
            if app.handle_window_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Shutting down");
                // Drops the decoded frame, then the overlay, then the GPU
                // resources; a repeated close request finds nothing left
                self.lifecycle = Lifecycle::ShuttingDown;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Presenter::Gpu(app) = presenter {
                    app.resize(new_size);
                }
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => match presenter {
                Presenter::Gpu(app) => match app.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        // Surface went stale (e.g. mid-resize); reconfigure
                        // and paint again
                        let size = window.inner_size();
                        app.resize(size);
                        window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("Out of GPU memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => {
                        tracing::warn!("Surface error: {}", e);
                    }
                },
                Presenter::Software { frame, blitter } => {
                    let size = window.inner_size();
                    if let Err(e) = blitter.paint(frame, size.width, size.height) {
                        tracing::warn!("Software blit failed: {}", e);
                    }
                }
            },

            _ => {}
        }
    }
}

fn main() {
    let _log_guard = match frameview::telemetry::init_logging_default() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let config = ViewerConfig::from_env();

    // File selection blocks until the user chooses; cancellation terminates
    let Some(source) = pick_video_file() else {
        fatal("No file selected", "No video file was chosen.");
    };
    tracing::info!("Selected file: {}", source.display());

    // Decode the first frame synchronously, before any window exists
    let (frame, info) = match decode_first_frame_from_path(&source) {
        Ok(result) => result,
        Err(e) => fatal(
            "Decode failed",
            &format!("Could not decode the video file:\n{}", e),
        ),
    };
    tracing::info!(
        "First frame ready: {}x{}, codec: {}",
        frame.width,
        frame.height,
        info.codec_name
    );

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => fatal("Event loop", &format!("Failed to create event loop: {}", e)),
    };

    let mut viewer = ViewerApp {
        lifecycle: Lifecycle::Decoded {
            frame,
            info,
            source,
            config,
        },
    };

    if let Err(e) = event_loop.run_app(&mut viewer) {
        tracing::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
