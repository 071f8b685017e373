use crate::core::{Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FadeEdgePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// One drawing-surface operation, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    /// Starts an offscreen layer, composited back on the matching restore.
    SaveLayer,
    /// Pops saves until `count` remain.
    RestoreToCount(usize),
    ClipRect(Rect),
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
    FadeEdge(FadeEdgePrimitive),
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands replay in order against a canvas-like surface; save/restore and
/// clip semantics follow the usual canvas stack model.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    save_depth: usize,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            save_depth: 0,
        }
    }

    /// Saves surface state and returns the count to restore to.
    pub fn save(&mut self) -> usize {
        let count = self.save_depth;
        self.save_depth += 1;
        self.commands.push(DrawCommand::Save);
        count
    }

    pub fn save_layer(&mut self) -> usize {
        let count = self.save_depth;
        self.save_depth += 1;
        self.commands.push(DrawCommand::SaveLayer);
        count
    }

    pub fn restore_to_count(&mut self, count: usize) {
        self.save_depth = self.save_depth.min(count);
        self.commands.push(DrawCommand::RestoreToCount(count));
    }

    pub fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.commands.push(DrawCommand::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    pub fn push_fade_edge(&mut self, fade: FadeEdgePrimitive) {
        self.commands.push(DrawCommand::FadeEdge(fade));
    }

    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::Save | DrawCommand::SaveLayer => depth += 1,
                DrawCommand::RestoreToCount(count) => {
                    if *count > depth {
                        return Err(ChartError::InvalidData(format!(
                            "restore to count {count} exceeds save depth {depth}"
                        )));
                    }
                    depth = *count;
                }
                DrawCommand::ClipRect(rect) => {
                    RectPrimitive::new(*rect, Color::TRANSPARENT).validate()?;
                }
                DrawCommand::Line(line) => line.validate()?,
                DrawCommand::Rect(rect) => rect.validate()?,
                DrawCommand::Text(text) => text.validate()?,
                DrawCommand::FadeEdge(fade) => fade.validate()?,
            }
        }
        if depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "frame leaves {depth} unbalanced save(s)"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line(_)))
            .count()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Rect(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Text(_)))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RenderFrame};
    use crate::core::{Rect, Viewport};

    #[test]
    fn save_returns_restorable_count() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        let outer = frame.save_layer();
        let inner = frame.save();
        frame.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!((outer, inner), (0, 1));
        frame.restore_to_count(outer);
        assert_eq!(frame.save_depth(), 0);
        frame.validate().expect("balanced frame");
        assert_eq!(frame.commands.last(), Some(&DrawCommand::RestoreToCount(0)));
    }

    #[test]
    fn unbalanced_saves_fail_validation() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        frame.save();
        let err = frame.validate().expect_err("unbalanced");
        assert!(format!("{err}").contains("unbalanced"));
    }
}
