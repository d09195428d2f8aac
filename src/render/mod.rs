//! Rendering
//!
//! The simulation hands a [`FrameSnapshot`] to a [`RenderAdapter`] once per
//! frame and ignores whatever happens next. Renderers must not block.

pub mod starfield;
pub mod text;

pub use text::TextRenderer;

use crate::sim::FrameSnapshot;

/// Something that can present a frame
pub trait RenderAdapter {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderAdapter for NullRenderer {
    fn draw(&mut self, _frame: &FrameSnapshot) {}
}

/// Keeps every frame it is given, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub frames: Vec<FrameSnapshot>,
}

impl RenderAdapter for FrameRecorder {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames.push(frame.clone());
    }
}
