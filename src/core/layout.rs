use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{
    ChartValues, DimensionContribution, HorizontalDimensions, HorizontalDimensionsAccumulator,
    HorizontalLayout, Rect,
};

/// Edge of the surface an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Start,
    Top,
    End,
    Bottom,
}

impl AxisPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Space one axis asks for, measured against the current values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMeasurement {
    pub position: AxisPosition,
    /// Width for vertical axes, height for horizontal ones.
    pub thickness: f64,
    /// Label overflow past the content start/end edges.
    pub start_overflow: f64,
    pub end_overflow: f64,
}

impl AxisMeasurement {
    #[must_use]
    pub fn new(position: AxisPosition, thickness: f64) -> Self {
        Self {
            position,
            thickness,
            start_overflow: 0.0,
            end_overflow: 0.0,
        }
    }
}

/// Why a layout pass produced nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyLayout {
    /// Axes and legend leave no content area.
    EmptyBounds,
    /// No entries or no usable x extent.
    EmptyContent,
}

/// Where everything goes for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub surface: Rect,
    pub content_bounds: Rect,
    pub axis_bounds: SmallVec<[(AxisPosition, Rect); 4]>,
    pub legend_bounds: Option<Rect>,
    /// Frozen against `content_bounds`, at zoom 1.
    pub dimensions: HorizontalDimensions,
}

impl ChartLayout {
    #[must_use]
    pub fn axis_bounds(&self, position: AxisPosition) -> Option<Rect> {
        self.axis_bounds
            .iter()
            .find(|(candidate, _)| *candidate == position)
            .map(|(_, rect)| *rect)
    }
}

/// Splits the surface between axes, legend and chart content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualLayout {
    pub horizontal_layout: HorizontalLayout,
}

impl VirtualLayout {
    #[must_use]
    pub fn new(horizontal_layout: HorizontalLayout) -> Self {
        Self { horizontal_layout }
    }

    /// Lays out one pass.
    ///
    /// `accumulator` already holds the chart's own contributions; axis label
    /// overflow is folded in as unscalable padding before `x_spacing` is fixed
    /// for the final content width.
    pub fn set_bounds(
        &self,
        surface: Rect,
        axes: &[AxisMeasurement],
        legend_height: f64,
        mut accumulator: HorizontalDimensionsAccumulator,
        values: &ChartValues,
        entry_count: usize,
    ) -> Result<ChartLayout, EmptyLayout> {
        let thickness_at = |position: AxisPosition| {
            axes.iter()
                .filter(|axis| axis.position == position)
                .map(|axis| sanitize(axis.thickness))
                .fold(0.0, f64::max)
        };
        let start = thickness_at(AxisPosition::Start);
        let top = thickness_at(AxisPosition::Top);
        let end = thickness_at(AxisPosition::End);
        let bottom = thickness_at(AxisPosition::Bottom);
        let legend_height = sanitize(legend_height);

        let content_bounds = surface.inset(start, top, end, bottom + legend_height);
        if content_bounds.is_empty() {
            trace!(?surface, start, top, end, bottom, legend_height, "empty content bounds");
            return Err(EmptyLayout::EmptyBounds);
        }

        let (start_overflow, end_overflow) = axes
            .iter()
            .filter(|axis| axis.position.is_horizontal())
            .fold((0.0_f64, 0.0_f64), |(s, e), axis| {
                (s.max(sanitize(axis.start_overflow)), e.max(sanitize(axis.end_overflow)))
            });
        accumulator.add(DimensionContribution::unscalable_padding(start_overflow, end_overflow));

        let dimensions = accumulator
            .freeze(values, self.horizontal_layout, content_bounds.width(), entry_count)
            .ok_or(EmptyLayout::EmptyContent)?;

        let mut axis_bounds = SmallVec::new();
        for axis in axes {
            let rect = match axis.position {
                AxisPosition::Start => Rect::new(
                    content_bounds.left - start,
                    content_bounds.top,
                    content_bounds.left,
                    content_bounds.bottom,
                ),
                AxisPosition::End => Rect::new(
                    content_bounds.right,
                    content_bounds.top,
                    content_bounds.right + end,
                    content_bounds.bottom,
                ),
                AxisPosition::Top => Rect::new(
                    content_bounds.left,
                    content_bounds.top - top,
                    content_bounds.right,
                    content_bounds.top,
                ),
                AxisPosition::Bottom => Rect::new(
                    content_bounds.left,
                    content_bounds.bottom,
                    content_bounds.right,
                    content_bounds.bottom + bottom,
                ),
            };
            if !axis_bounds.iter().any(|(p, _)| *p == axis.position) {
                axis_bounds.push((axis.position, rect));
            }
        }

        let legend_bounds = (legend_height > 0.0).then(|| {
            Rect::new(
                surface.left,
                surface.bottom - legend_height,
                surface.right,
                surface.bottom,
            )
        });

        Ok(ChartLayout {
            surface,
            content_bounds,
            axis_bounds,
            legend_bounds,
            dimensions,
        })
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
