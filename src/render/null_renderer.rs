use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op surface used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is involved, and keeps the last frame for
/// inspection.
#[derive(Debug)]
pub struct NullRenderer {
    pub viewport: Viewport,
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            frames_rendered: 0,
            last_frame: None,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl Renderer for NullRenderer {
    fn surface_size(&self) -> Viewport {
        self.viewport
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
