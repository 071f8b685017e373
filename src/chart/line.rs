use serde::{Deserialize, Serialize};

use crate::chart::{ChartLayer, DrawContext, series_color, validate_colors};
use crate::core::{
    ChartValues, DimensionContribution, EntryModel, HorizontalDimensionsAccumulator, Point, Rect,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{EntryLocationMap, MarkerEntryModel};
use crate::render::{Color, LinePrimitive, RectPrimitive};

/// Polyline per series, with optional square point markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub colors: Vec<Color>,
    #[serde(default = "default_stroke_width_px")]
    pub stroke_width_px: f64,
    /// Side of the square drawn on every entry. Also the minimum x spacing.
    #[serde(default)]
    pub point_size_px: Option<f64>,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(vec![Color::rgb(0.9, 0.3, 0.2)])
    }
}

impl LineChart {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            stroke_width_px: default_stroke_width_px(),
            point_size_px: None,
        }
    }

    #[must_use]
    pub fn with_point_size(mut self, point_size_px: f64) -> Self {
        self.point_size_px = Some(point_size_px);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "line chart stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(size) = self.point_size_px {
            if !size.is_finite() || size < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "line chart point size must be finite and >= 0".to_owned(),
                ));
            }
        }
        validate_colors(&self.colors)
    }
}

impl ChartLayer for LineChart {
    fn update_dimensions(
        &self,
        _model: &EntryModel,
        _values: &ChartValues,
        accumulator: &mut HorizontalDimensionsAccumulator,
    ) {
        if let Some(size) = self.point_size_px {
            accumulator.add(DimensionContribution::x_spacing(size));
        }
    }

    fn draw_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
        mut locations: Option<&mut EntryLocationMap>,
        _selected_index: Option<usize>,
    ) -> ChartResult<()> {
        let bounds = ctx.content_bounds;
        for (series_index, series) in model.series().iter().enumerate() {
            let color = series_color(&self.colors, series_index);
            let points: Vec<Point> = series
                .iter()
                .map(|entry| Point::new(ctx.x_to_pixel(entry.x), ctx.y_to_pixel(entry.y)))
                .collect();

            for pair in points.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                if from.x.max(to.x) < bounds.left || from.x.min(to.x) > bounds.right {
                    continue;
                }
                ctx.frame.push_line(LinePrimitive::new(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    self.stroke_width_px,
                    color,
                ));
            }

            for (index, (entry, point)) in series.iter().zip(&points).enumerate() {
                if !bounds.contains_x(point.x) {
                    continue;
                }
                if let Some(size) = self.point_size_px.filter(|size| *size > 0.0) {
                    let half = size / 2.0;
                    ctx.frame.push_rect(RectPrimitive::new(
                        Rect::new(point.x - half, point.y - half, point.x + half, point.y + half),
                        color,
                    ));
                }
                if let Some(map) = locations.as_deref_mut() {
                    map.insert(MarkerEntryModel {
                        location: Point::new(point.x, point.y.clamp(bounds.top, bounds.bottom)),
                        entry: *entry,
                        series_index,
                        index,
                        color,
                    });
                }
            }
        }
        Ok(())
    }
}

fn default_stroke_width_px() -> f64 {
    2.0
}
