use serde::{Deserialize, Serialize};

use crate::chart::{ChartLayer, DrawContext, series_color, validate_colors};
use crate::core::{
    ChartValues, DimensionContribution, EntryModel, HorizontalDimensionsAccumulator, Point, Rect,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{EntryLocationMap, MarkerEntryModel};
use crate::render::{Color, RectPrimitive};

/// Grouped columns: one column per series at every x, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChart {
    /// Per-series fill, cycled when there are more series than colours.
    pub colors: Vec<Color>,
    #[serde(default = "default_column_width_px")]
    pub column_width_px: f64,
    /// Gap between columns of one group.
    #[serde(default = "default_inner_spacing_px")]
    pub inner_spacing_px: f64,
    /// Gap between neighbouring groups.
    #[serde(default = "default_group_spacing_px")]
    pub group_spacing_px: f64,
    #[serde(default)]
    pub corner_radius_px: f64,
    /// Fill used for the columns of the last clicked entry index.
    #[serde(default)]
    pub selected_color: Option<Color>,
}

impl Default for ColumnChart {
    fn default() -> Self {
        Self::new(vec![Color::rgb(0.2, 0.4, 0.9)])
    }
}

impl ColumnChart {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            column_width_px: default_column_width_px(),
            inner_spacing_px: default_inner_spacing_px(),
            group_spacing_px: default_group_spacing_px(),
            corner_radius_px: 0.0,
            selected_color: None,
        }
    }

    #[must_use]
    pub fn with_column_width(mut self, column_width_px: f64) -> Self {
        self.column_width_px = column_width_px;
        self
    }

    #[must_use]
    pub fn with_selected_color(mut self, color: Color) -> Self {
        self.selected_color = Some(color);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("column_width_px", self.column_width_px),
            ("inner_spacing_px", self.inner_spacing_px),
            ("group_spacing_px", self.group_spacing_px),
            ("corner_radius_px", self.corner_radius_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "column chart `{name}` must be finite and >= 0"
                )));
            }
        }
        validate_colors(&self.colors)?;
        if let Some(color) = self.selected_color {
            color.validate()?;
        }
        Ok(())
    }

    fn group_width(&self, series_count: usize, zoom: f64) -> f64 {
        let count = series_count.max(1) as f64;
        (count * self.column_width_px + (count - 1.0) * self.inner_spacing_px) * zoom
    }
}

impl ChartLayer for ColumnChart {
    fn update_dimensions(
        &self,
        model: &EntryModel,
        _values: &ChartValues,
        accumulator: &mut HorizontalDimensionsAccumulator,
    ) {
        let group_width = self.group_width(model.series().len(), 1.0);
        accumulator.add(DimensionContribution::x_spacing(
            group_width + self.group_spacing_px,
        ));
    }

    fn draw_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
        mut locations: Option<&mut EntryLocationMap>,
        selected_index: Option<usize>,
    ) -> ChartResult<()> {
        let bounds = ctx.content_bounds;
        let column_width = self.column_width_px * ctx.zoom;
        let inner_spacing = self.inner_spacing_px * ctx.zoom;
        let group_width = self.group_width(model.series().len(), ctx.zoom);
        let baseline = ctx.y_to_pixel(0.0_f64.clamp(ctx.values.min_y, ctx.values.max_y));

        for (series_index, series) in model.series().iter().enumerate() {
            let color = series_color(&self.colors, series_index);
            let offset = series_index as f64 * (column_width + inner_spacing);
            for (index, entry) in series.iter().enumerate() {
                let center_x = ctx.x_to_pixel(entry.x);
                let left = center_x - group_width / 2.0 + offset;
                let right = left + column_width;
                if right < bounds.left || left > bounds.right {
                    continue;
                }

                let top_y = ctx.y_to_pixel(entry.y);
                let fill = match (selected_index, self.selected_color) {
                    (Some(selected), Some(selected_color)) if selected == index => selected_color,
                    _ => color,
                };
                ctx.frame.push_rect(
                    RectPrimitive::new(
                        Rect::new(left, top_y.min(baseline), right, top_y.max(baseline)),
                        fill,
                    )
                    .with_corner_radius(self.corner_radius_px * ctx.zoom),
                );

                if let Some(map) = locations.as_deref_mut() {
                    if bounds.contains_x(center_x) {
                        map.insert(MarkerEntryModel {
                            location: Point::new(center_x, top_y.clamp(bounds.top, bounds.bottom)),
                            entry: *entry,
                            series_index,
                            index,
                            color,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn default_column_width_px() -> f64 {
    8.0
}

fn default_inner_spacing_px() -> f64 {
    2.0
}

fn default_group_spacing_px() -> f64 {
    8.0
}

#[cfg(test)]
mod tests {
    use super::ColumnChart;
    use crate::chart::{ChartLayer, DrawContext};
    use crate::core::{
        ChartValues, Entry, EntryModel, HorizontalDimensions, HorizontalDimensionsAccumulator,
        Rect, Viewport,
    };
    use crate::interaction::EntryLocationMap;
    use crate::render::{Color, DrawCommand, RenderFrame};

    fn two_series() -> EntryModel {
        EntryModel::new(
            1,
            vec![
                vec![Entry::new(0.0, 1.0), Entry::new(1.0, 2.0)],
                vec![Entry::new(0.0, 3.0), Entry::new(1.0, 4.0)],
            ],
        )
        .expect("model")
    }

    #[test]
    fn requests_room_for_each_group() {
        let chart = ColumnChart::new(vec![Color::BLACK]);
        let model = two_series();
        let values = ChartValues::resolve(&model, None, None).expect("values");
        let mut accumulator = HorizontalDimensionsAccumulator::default();
        chart.update_dimensions(&model, &values, &mut accumulator);
        // 2 * 8 + 2 inner + 8 between groups
        assert_eq!(accumulator.requested().x_spacing, 26.0);
    }

    #[test]
    fn draws_one_rect_per_entry_and_records_group_centres() {
        let chart = ColumnChart::new(vec![Color::BLACK]).with_selected_color(Color::TRANSPARENT);
        let model = two_series();
        let values = ChartValues::resolve(&model, None, None).expect("values");
        let dims = HorizontalDimensions {
            x_spacing: 100.0,
            scalable_start_padding: 50.0,
            scalable_end_padding: 50.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        };
        let mut frame = RenderFrame::new(Viewport::new(200, 100));
        let mut map = EntryLocationMap::default();
        {
            let mut ctx = DrawContext::new(
                &mut frame,
                Rect::new(0.0, 0.0, 200.0, 100.0),
                values,
                dims,
                0.0,
                1.0,
            );
            chart
                .draw_scrollable(&mut ctx, &model, Some(&mut map), Some(1))
                .expect("draw");
        }
        assert_eq!(frame.rect_count(), 4);
        assert_eq!(map.len(), 2);
        assert_eq!(map.closest(150.0).expect("hit").len(), 2);

        let selected = frame
            .commands
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Rect(rect) if rect.fill == Color::TRANSPARENT)
            })
            .count();
        assert_eq!(selected, 2);
    }
}
