use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chart::estimate_label_width_px;
use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// A legend reserved below the chart.
pub trait Legend {
    fn validate(&self) -> ChartResult<()> {
        Ok(())
    }

    /// Height needed to fit the legend into `available_width`.
    fn height(&self, available_width: f64) -> f64;

    fn draw(&self, frame: &mut RenderFrame, bounds: Rect) -> ChartResult<()>;
}

/// One swatch and label per series, wrapped into rows.
///
/// `IndexMap` keeps insertion order so series appear in a stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLegend {
    pub items: IndexMap<String, Color>,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_swatch_size_px")]
    pub swatch_size_px: f64,
    #[serde(default = "default_spacing_px")]
    pub spacing_px: f64,
    #[serde(default = "default_padding_px")]
    pub padding_px: f64,
    pub label_color: Color,
}

impl Default for SeriesLegend {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
            font_size_px: default_font_size_px(),
            swatch_size_px: default_swatch_size_px(),
            spacing_px: default_spacing_px(),
            padding_px: default_padding_px(),
            label_color: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

impl SeriesLegend {
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, color: Color) -> Self {
        self.items.insert(name.into(), color);
        self
    }

    fn row_height(&self) -> f64 {
        self.font_size_px.max(self.swatch_size_px)
    }

    fn item_width(&self, name: &str) -> f64 {
        self.swatch_size_px + self.spacing_px + estimate_label_width_px(name, self.font_size_px)
    }

    /// Item origins relative to the legend's inner top-left corner.
    fn item_offsets(&self, available_width: f64) -> Vec<(f64, f64)> {
        let inner_width = (available_width - 2.0 * self.padding_px).max(0.0);
        let row_step = self.row_height() + self.spacing_px;
        let mut offsets = Vec::with_capacity(self.items.len());
        let (mut x, mut y) = (0.0, 0.0);
        for name in self.items.keys() {
            let width = self.item_width(name);
            if x > 0.0 && x + width > inner_width {
                x = 0.0;
                y += row_step;
            }
            offsets.push((x, y));
            x += width + 2.0 * self.spacing_px;
        }
        offsets
    }
}

impl Legend for SeriesLegend {
    fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("swatch_size_px", self.swatch_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "legend `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [("spacing_px", self.spacing_px), ("padding_px", self.padding_px)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "legend `{name}` must be finite and >= 0"
                )));
            }
        }
        self.label_color.validate()?;
        self.items.values().try_for_each(|color| color.validate())
    }

    fn height(&self, available_width: f64) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let rows = self
            .item_offsets(available_width)
            .last()
            .map_or(0.0, |&(_, y)| y);
        rows + self.row_height() + 2.0 * self.padding_px
    }

    fn draw(&self, frame: &mut RenderFrame, bounds: Rect) -> ChartResult<()> {
        let origin_x = bounds.left + self.padding_px;
        let origin_y = bounds.top + self.padding_px;
        let row_height = self.row_height();
        for ((name, color), (dx, dy)) in self.items.iter().zip(self.item_offsets(bounds.width())) {
            let left = origin_x + dx;
            let top = origin_y + dy + (row_height - self.swatch_size_px) / 2.0;
            frame.push_rect(RectPrimitive::new(
                Rect::new(left, top, left + self.swatch_size_px, top + self.swatch_size_px),
                *color,
            ));
            if !name.is_empty() {
                frame.push_text(TextPrimitive::new(
                    name.as_str(),
                    left + self.swatch_size_px + self.spacing_px,
                    origin_y + dy + (row_height - self.font_size_px) / 2.0,
                    self.font_size_px,
                    self.label_color,
                    TextHAlign::Left,
                ));
            }
        }
        Ok(())
    }
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_swatch_size_px() -> f64 {
    10.0
}

fn default_spacing_px() -> f64 {
    4.0
}

fn default_padding_px() -> f64 {
    4.0
}
