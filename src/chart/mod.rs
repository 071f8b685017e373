//! Chart variants and the pluggable pieces drawn around them.
//!
//! `Chart` is a closed set of variants dispatched by `match`; axes, legend,
//! decorations and markers are open traits hosts can implement.

mod axis;
mod column;
mod composed;
mod context;
mod decoration;
mod fading;
mod legend;
mod line;
mod marker;

pub use axis::{Axis, AxisRenderer, estimate_label_width_px};
pub use column::ColumnChart;
pub use composed::ComposedChart;
pub use context::DrawContext;
pub use decoration::{Decoration, ThresholdLine};
pub use fading::FadingEdges;
pub use legend::{Legend, SeriesLegend};
pub use line::LineChart;
pub use marker::{GuidelineMarker, Marker};

use crate::core::{
    AxisValuesOverrider, ChartValues, EntryModel, HorizontalDimensionsAccumulator,
};
use crate::error::ChartResult;
use crate::interaction::EntryLocationMap;
use crate::render::Color;

/// Capability shared by every chart variant.
pub trait ChartLayer {
    /// Adds this chart's spacing and padding needs for `model`.
    fn update_dimensions(
        &self,
        model: &EntryModel,
        values: &ChartValues,
        accumulator: &mut HorizontalDimensionsAccumulator,
    );

    /// Draws content that scrolls and zooms, clipped to the content bounds.
    ///
    /// When `locations` is given the chart records where each visible entry
    /// was drawn. `selected_index` is the entry index of the last click.
    fn draw_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
        locations: Option<&mut EntryLocationMap>,
        selected_index: Option<usize>,
    ) -> ChartResult<()>;

    /// Draws fixed content over the scrolled area.
    fn draw_non_scrollable(
        &self,
        _ctx: &mut DrawContext<'_>,
        _model: &EntryModel,
    ) -> ChartResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Column(ColumnChart),
    Line(LineChart),
    Composed(ComposedChart),
}

impl Chart {
    /// Resolves the value range `model` is drawn against.
    pub fn resolve_values(
        &self,
        model: &EntryModel,
        overrider: Option<&dyn AxisValuesOverrider>,
        x_step: Option<f64>,
    ) -> ChartResult<ChartValues> {
        match self {
            Self::Composed(composed) => composed.resolve_values(model, overrider, x_step),
            Self::Column(_) | Self::Line(_) => ChartValues::resolve(model, overrider, x_step),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Column(chart) => chart.validate(),
            Self::Line(chart) => chart.validate(),
            Self::Composed(chart) => chart.validate(),
        }
    }

    fn layer(&self) -> &dyn ChartLayer {
        match self {
            Self::Column(chart) => chart,
            Self::Line(chart) => chart,
            Self::Composed(chart) => chart,
        }
    }
}

impl ChartLayer for Chart {
    fn update_dimensions(
        &self,
        model: &EntryModel,
        values: &ChartValues,
        accumulator: &mut HorizontalDimensionsAccumulator,
    ) {
        self.layer().update_dimensions(model, values, accumulator);
    }

    fn draw_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
        locations: Option<&mut EntryLocationMap>,
        selected_index: Option<usize>,
    ) -> ChartResult<()> {
        self.layer()
            .draw_scrollable(ctx, model, locations, selected_index)
    }

    fn draw_non_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
    ) -> ChartResult<()> {
        self.layer().draw_non_scrollable(ctx, model)
    }
}

impl From<ColumnChart> for Chart {
    fn from(chart: ColumnChart) -> Self {
        Self::Column(chart)
    }
}

impl From<LineChart> for Chart {
    fn from(chart: LineChart) -> Self {
        Self::Line(chart)
    }
}

impl From<ComposedChart> for Chart {
    fn from(chart: ComposedChart) -> Self {
        Self::Composed(chart)
    }
}

/// Cycles through `colors`, falling back to black for an empty palette.
pub(crate) fn series_color(colors: &[Color], series_index: usize) -> Color {
    if colors.is_empty() {
        Color::BLACK
    } else {
        colors[series_index % colors.len()]
    }
}

pub(crate) fn validate_colors(colors: &[Color]) -> ChartResult<()> {
    colors.iter().try_for_each(|color| color.validate())
}
