//! Immediate-mode overlay drawn on top of the rendered frame

mod overlay;

pub use overlay::{OverlayContent, OverlayUi};
