use serde::{Deserialize, Serialize};

use crate::chart::DrawContext;
use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

/// Extra content drawn around the chart, clipped to the content bounds.
pub trait Decoration {
    fn validate(&self) -> ChartResult<()> {
        Ok(())
    }

    /// Runs before the chart draws itself.
    fn draw_behind_chart(&self, _ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        Ok(())
    }

    /// Runs right after the chart has drawn itself.
    fn draw_above_chart(&self, _ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        Ok(())
    }
}

/// Horizontal line (or band, for a range) at fixed y values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLine {
    pub min_y: f64,
    pub max_y: f64,
    pub color: Color,
    #[serde(default = "default_thickness_px")]
    pub thickness_px: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
}

impl ThresholdLine {
    #[must_use]
    pub fn at(value: f64, color: Color) -> Self {
        Self::range(value, value, color)
    }

    #[must_use]
    pub fn range(min_y: f64, max_y: f64, color: Color) -> Self {
        Self {
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
            color,
            thickness_px: default_thickness_px(),
            label: None,
            label_font_size_px: default_label_font_size_px(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Decoration for ThresholdLine {
    fn validate(&self) -> ChartResult<()> {
        if !self.min_y.is_finite() || !self.max_y.is_finite() {
            return Err(ChartError::InvalidConfig(
                "threshold values must be finite".to_owned(),
            ));
        }
        if !self.thickness_px.is_finite() || self.thickness_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "threshold thickness must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }

    fn draw_above_chart(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let bounds = ctx.content_bounds;
        let top = ctx.y_to_pixel(self.max_y);
        let bottom = ctx.y_to_pixel(self.min_y);
        if bottom < bounds.top || top > bounds.bottom {
            return Ok(());
        }

        if self.min_y == self.max_y {
            ctx.frame.push_line(LinePrimitive::new(
                bounds.left,
                top,
                bounds.right,
                top,
                self.thickness_px,
                self.color,
            ));
        } else {
            let band = Rect::new(
                bounds.left,
                top.max(bounds.top),
                bounds.right,
                bottom.min(bounds.bottom),
            );
            ctx.frame.push_rect(RectPrimitive::new(band, self.color));
        }

        if let Some(label) = self.label.as_deref().filter(|label| !label.is_empty()) {
            ctx.frame.push_text(TextPrimitive::new(
                label,
                bounds.left + 4.0,
                (top - self.label_font_size_px - 2.0).max(bounds.top),
                self.label_font_size_px,
                self.color.with_alpha(1.0),
                TextHAlign::Left,
            ));
        }
        Ok(())
    }
}

fn default_thickness_px() -> f64 {
    1.0
}

fn default_label_font_size_px() -> f64 {
    11.0
}

#[cfg(test)]
mod tests {
    use super::{Decoration, ThresholdLine};
    use crate::chart::DrawContext;
    use crate::core::{ChartValues, HorizontalDimensions, Rect, Viewport};
    use crate::render::{Color, DrawCommand, RenderFrame};

    fn draw(decoration: &ThresholdLine) -> RenderFrame {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        let values = ChartValues {
            min_x: 0.0,
            max_x: 1.0,
            x_step: 1.0,
            min_y: 0.0,
            max_y: 10.0,
            model_id: 1,
        };
        let dims = HorizontalDimensions {
            x_spacing: 50.0,
            scalable_start_padding: 25.0,
            scalable_end_padding: 25.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        };
        {
            let mut ctx = DrawContext::new(
                &mut frame,
                Rect::new(0.0, 0.0, 100.0, 100.0),
                values,
                dims,
                0.0,
                1.0,
            );
            decoration.draw_behind_chart(&mut ctx).expect("behind");
            decoration.draw_above_chart(&mut ctx).expect("above");
        }
        frame
    }

    #[test]
    fn single_value_draws_a_line_at_its_y() {
        let frame = draw(&ThresholdLine::at(5.0, Color::BLACK).with_label("target"));
        assert!(matches!(
            frame.commands.first(),
            Some(DrawCommand::Line(line)) if line.y1 == 50.0 && line.y2 == 50.0
        ));
        assert_eq!(frame.text_count(), 1);
    }

    #[test]
    fn range_draws_a_band_and_out_of_range_draws_nothing() {
        let frame = draw(&ThresholdLine::range(2.0, 4.0, Color::BLACK));
        assert_eq!(frame.rect_count(), 1);
        assert!(draw(&ThresholdLine::at(20.0, Color::BLACK)).is_empty());
    }
}
