use serde::{Deserialize, Serialize};

use crate::chart::DrawContext;
use crate::core::{AxisMeasurement, AxisPosition, ChartValues, HorizontalLayout, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, TextHAlign, TextPrimitive};

/// An axis attached to one surface edge.
///
/// The layout composer measures every axis before content bounds exist, so
/// measurement only sees the resolved values.
pub trait AxisRenderer {
    /// Checks the axis style before it is attached to an engine.
    fn validate(&self) -> ChartResult<()> {
        Ok(())
    }

    fn position(&self) -> AxisPosition;

    /// Width (vertical axes) or height (horizontal axes) the axis needs.
    fn thickness(&self, values: &ChartValues) -> f64;

    /// Label overflow past the content start/end edges, as unscalable padding.
    fn horizontal_insets(&self, _values: &ChartValues, _layout: HorizontalLayout) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn draw_behind_chart(&self, _ctx: &mut DrawContext<'_>, _axis_bounds: Rect) -> ChartResult<()> {
        Ok(())
    }

    fn draw_above_chart(&self, _ctx: &mut DrawContext<'_>, _axis_bounds: Rect) -> ChartResult<()> {
        Ok(())
    }

    fn measure(&self, values: &ChartValues, layout: HorizontalLayout) -> AxisMeasurement {
        let (start_overflow, end_overflow) = self.horizontal_insets(values, layout);
        AxisMeasurement {
            position: self.position(),
            thickness: self.thickness(values),
            start_overflow,
            end_overflow,
        }
    }
}

/// Backend-independent estimate of a label's rendered width.
#[must_use]
pub fn estimate_label_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Built-in axis: a line, ticks, labels and optional guidelines.
///
/// Vertical axes label `label_count` evenly spaced y values. Horizontal axes
/// label x grid positions, skipping positions so labels never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub position: AxisPosition,
    #[serde(default = "default_label_count")]
    pub label_count: usize,
    #[serde(default)]
    pub label_decimals: usize,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_tick_length_px")]
    pub tick_length_px: f64,
    #[serde(default = "default_line_width_px")]
    pub line_width_px: f64,
    pub line_color: Color,
    pub label_color: Color,
    /// Guidelines across the content, drawn behind the chart.
    #[serde(default)]
    pub guideline_color: Option<Color>,
}

impl Axis {
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        Self {
            position,
            label_count: default_label_count(),
            label_decimals: 0,
            font_size_px: default_font_size_px(),
            label_padding_px: default_label_padding_px(),
            tick_length_px: default_tick_length_px(),
            line_width_px: default_line_width_px(),
            line_color: Color::rgb(0.6, 0.6, 0.6),
            label_color: Color::rgb(0.3, 0.3, 0.3),
            guideline_color: Some(Color::rgba(0.6, 0.6, 0.6, 0.3)),
        }
    }

    #[must_use]
    pub fn start() -> Self {
        Self::new(AxisPosition::Start)
    }

    #[must_use]
    pub fn bottom() -> Self {
        Self::new(AxisPosition::Bottom)
    }

    #[must_use]
    pub fn with_label_decimals(mut self, label_decimals: usize) -> Self {
        self.label_decimals = label_decimals;
        self
    }

    #[must_use]
    pub fn without_guidelines(mut self) -> Self {
        self.guideline_color = None;
        self
    }

    fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.label_decimals)
    }

    fn label_width(&self, value: f64) -> f64 {
        estimate_label_width_px(&self.format(value), self.font_size_px)
    }

    fn y_label_values(&self, values: &ChartValues) -> Vec<f64> {
        let count = self.label_count.max(2);
        let step = values.length_y() / (count - 1) as f64;
        (0..count)
            .map(|i| values.min_y + step * i as f64)
            .collect()
    }

    /// Grid positions to label, every `stride`-th so labels fit in `x_spacing`.
    fn x_label_stride(&self, values: &ChartValues, x_spacing: f64) -> usize {
        let widest = self
            .label_width(values.min_x)
            .max(self.label_width(values.max_x))
            + self.label_padding_px;
        if x_spacing <= 0.0 {
            return 1;
        }
        (widest / x_spacing).ceil().max(1.0) as usize
    }

    fn draw_vertical_labels(&self, ctx: &mut DrawContext<'_>, axis_bounds: Rect) {
        let (line_x, tick_to, text_x, align) = match self.position {
            AxisPosition::Start => (
                axis_bounds.right,
                axis_bounds.right - self.tick_length_px,
                axis_bounds.right - self.tick_length_px - self.label_padding_px,
                TextHAlign::Right,
            ),
            _ => (
                axis_bounds.left,
                axis_bounds.left + self.tick_length_px,
                axis_bounds.left + self.tick_length_px + self.label_padding_px,
                TextHAlign::Left,
            ),
        };
        ctx.frame.push_line(LinePrimitive::new(
            line_x,
            axis_bounds.top,
            line_x,
            axis_bounds.bottom,
            self.line_width_px,
            self.line_color,
        ));
        for value in self.y_label_values(&ctx.values) {
            let y = ctx.y_to_pixel(value);
            if self.tick_length_px > 0.0 {
                ctx.frame.push_line(LinePrimitive::new(
                    line_x,
                    y,
                    tick_to,
                    y,
                    self.line_width_px,
                    self.line_color,
                ));
            }
            ctx.frame.push_text(TextPrimitive::new(
                self.format(value),
                text_x,
                y - self.font_size_px / 2.0,
                self.font_size_px,
                self.label_color,
                align,
            ));
        }
    }

    fn draw_horizontal_labels(&self, ctx: &mut DrawContext<'_>, axis_bounds: Rect) {
        let (line_y, tick_to, text_y) = match self.position {
            AxisPosition::Top => (
                axis_bounds.bottom,
                axis_bounds.bottom - self.tick_length_px,
                axis_bounds.bottom
                    - self.tick_length_px
                    - self.label_padding_px
                    - self.font_size_px,
            ),
            _ => (
                axis_bounds.top,
                axis_bounds.top + self.tick_length_px,
                axis_bounds.top + self.tick_length_px + self.label_padding_px,
            ),
        };
        ctx.frame.push_line(LinePrimitive::new(
            axis_bounds.left,
            line_y,
            axis_bounds.right,
            line_y,
            self.line_width_px,
            self.line_color,
        ));

        let values = ctx.values;
        let stride = self.x_label_stride(&values, ctx.dimensions.x_spacing);
        let positions = values.max_major_entry_count();
        for k in (0..positions).step_by(stride) {
            let value = values.min_x + k as f64 * values.x_step;
            let x = ctx.x_to_pixel(value);
            if !axis_bounds.contains_x(x) {
                continue;
            }
            if self.tick_length_px > 0.0 {
                ctx.frame.push_line(LinePrimitive::new(
                    x,
                    line_y,
                    x,
                    tick_to,
                    self.line_width_px,
                    self.line_color,
                ));
            }
            ctx.frame.push_text(TextPrimitive::new(
                self.format(value),
                x,
                text_y,
                self.font_size_px,
                self.label_color,
                TextHAlign::Center,
            ));
        }
    }
}

impl AxisRenderer for Axis {
    fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("line_width_px", self.line_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("label_padding_px", self.label_padding_px),
            ("tick_length_px", self.tick_length_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{name}` must be finite and >= 0"
                )));
            }
        }
        self.line_color.validate()?;
        self.label_color.validate()?;
        if let Some(color) = self.guideline_color {
            color.validate()?;
        }
        Ok(())
    }

    fn position(&self) -> AxisPosition {
        self.position
    }

    fn thickness(&self, values: &ChartValues) -> f64 {
        let label_space = self.tick_length_px + self.label_padding_px;
        if self.position.is_horizontal() {
            return label_space + self.font_size_px + self.line_width_px;
        }
        let widest = self
            .y_label_values(values)
            .into_iter()
            .map(|value| self.label_width(value))
            .fold(0.0, f64::max);
        label_space + widest + self.line_width_px
    }

    fn horizontal_insets(&self, values: &ChartValues, layout: HorizontalLayout) -> (f64, f64) {
        match (self.position.is_horizontal(), layout) {
            (true, HorizontalLayout::FullWidth { .. }) => (
                self.label_width(values.min_x) / 2.0,
                self.label_width(values.max_x) / 2.0,
            ),
            _ => (0.0, 0.0),
        }
    }

    fn draw_behind_chart(&self, ctx: &mut DrawContext<'_>, _axis_bounds: Rect) -> ChartResult<()> {
        let Some(color) = self.guideline_color else {
            return Ok(());
        };
        let bounds = ctx.content_bounds;
        if self.position.is_horizontal() {
            let values = ctx.values;
            let stride = self.x_label_stride(&values, ctx.dimensions.x_spacing);
            for k in (0..values.max_major_entry_count()).step_by(stride) {
                let x = ctx.x_to_pixel(values.min_x + k as f64 * values.x_step);
                if bounds.contains_x(x) {
                    ctx.frame.push_line(LinePrimitive::new(
                        x,
                        bounds.top,
                        x,
                        bounds.bottom,
                        self.line_width_px,
                        color,
                    ));
                }
            }
        } else {
            for value in self.y_label_values(&ctx.values) {
                let y = ctx.y_to_pixel(value);
                ctx.frame.push_line(LinePrimitive::new(
                    bounds.left,
                    y,
                    bounds.right,
                    y,
                    self.line_width_px,
                    color,
                ));
            }
        }
        Ok(())
    }

    fn draw_above_chart(&self, ctx: &mut DrawContext<'_>, axis_bounds: Rect) -> ChartResult<()> {
        if self.position.is_horizontal() {
            self.draw_horizontal_labels(ctx, axis_bounds);
        } else {
            self.draw_vertical_labels(ctx, axis_bounds);
        }
        Ok(())
    }
}

fn default_label_count() -> usize {
    5
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_label_padding_px() -> f64 {
    4.0
}

fn default_tick_length_px() -> f64 {
    4.0
}

fn default_line_width_px() -> f64 {
    1.0
}
