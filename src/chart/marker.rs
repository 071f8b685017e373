use serde::{Deserialize, Serialize};

use crate::chart::estimate_label_width_px;
use crate::core::Rect;
use crate::error::ChartResult;
use crate::interaction::MarkerEntryModel;
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// Overlay drawn for the entries nearest the touch point.
pub trait Marker {
    fn draw(
        &self,
        frame: &mut RenderFrame,
        bounds: Rect,
        entries: &[MarkerEntryModel],
    ) -> ChartResult<()>;
}

/// Vertical guideline through the entries, a square indicator per entry and
/// a label listing their y values above the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineMarker {
    pub guideline_color: Color,
    #[serde(default = "default_guideline_width_px")]
    pub guideline_width_px: f64,
    #[serde(default = "default_indicator_size_px")]
    pub indicator_size_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_label_decimals")]
    pub label_decimals: usize,
    pub label_color: Color,
}

impl Default for GuidelineMarker {
    fn default() -> Self {
        Self {
            guideline_color: Color::rgba(0.0, 0.0, 0.0, 0.4),
            guideline_width_px: default_guideline_width_px(),
            indicator_size_px: default_indicator_size_px(),
            label_font_size_px: default_label_font_size_px(),
            label_decimals: default_label_decimals(),
            label_color: Color::BLACK,
        }
    }
}

impl GuidelineMarker {
    fn label(&self, entries: &[MarkerEntryModel]) -> String {
        entries
            .iter()
            .map(|model| format!("{:.prec$}", model.entry.y, prec = self.label_decimals))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Marker for GuidelineMarker {
    fn draw(
        &self,
        frame: &mut RenderFrame,
        bounds: Rect,
        entries: &[MarkerEntryModel],
    ) -> ChartResult<()> {
        let Some(first) = entries.first() else {
            return Ok(());
        };
        let x = first.location.x;
        frame.push_line(LinePrimitive::new(
            x,
            bounds.top,
            x,
            bounds.bottom,
            self.guideline_width_px,
            self.guideline_color,
        ));

        let half = self.indicator_size_px / 2.0;
        for model in entries {
            let point = model.location;
            frame.push_rect(
                RectPrimitive::new(
                    Rect::new(point.x - half, point.y - half, point.x + half, point.y + half),
                    model.color,
                )
                .with_corner_radius(half),
            );
        }

        let label = self.label(entries);
        let half_width = estimate_label_width_px(&label, self.label_font_size_px) / 2.0;
        let label_x = if bounds.width() > 2.0 * half_width {
            x.clamp(bounds.left + half_width, bounds.right - half_width)
        } else {
            bounds.center_x()
        };
        frame.push_text(TextPrimitive::new(
            label,
            label_x,
            bounds.top,
            self.label_font_size_px,
            self.label_color,
            TextHAlign::Center,
        ));
        Ok(())
    }
}

fn default_guideline_width_px() -> f64 {
    1.0
}

fn default_indicator_size_px() -> f64 {
    8.0
}

fn default_label_font_size_px() -> f64 {
    12.0
}

fn default_label_decimals() -> usize {
    1
}
