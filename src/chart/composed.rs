use tracing::debug;

use crate::chart::{Chart, ChartLayer, DrawContext};
use crate::core::{
    AxisValuesOverrider, ChartValues, EntryModel, HorizontalDimensionsAccumulator, X_STEP_EPSILON,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::EntryLocationMap;

/// Children layered over one shared value range.
///
/// Child `i` draws child dataset `i`; earlier children sit behind later
/// ones and only the last child records entry locations for markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedChart {
    charts: Vec<Chart>,
}

impl ComposedChart {
    pub fn new(charts: Vec<Chart>) -> ChartResult<Self> {
        if charts.is_empty() {
            return Err(ChartError::InvalidConfig(
                "composed chart needs at least one child".to_owned(),
            ));
        }
        Ok(Self { charts })
    }

    #[must_use]
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// The child whose entries markers resolve against.
    #[must_use]
    pub fn tap_target(&self) -> Option<&Chart> {
        self.charts.last()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.charts.iter().try_for_each(Chart::validate)
    }

    fn check_model(&self, model: &EntryModel) -> ChartResult<()> {
        if model.children().len() != self.charts.len() {
            return Err(ChartError::InvalidData(format!(
                "composed chart has {} children but the dataset has {}",
                self.charts.len(),
                model.children().len()
            )));
        }
        Ok(())
    }

    /// Merges the children into one range: union of extrema and one shared
    /// x step, which every child must agree on.
    pub fn resolve_values(
        &self,
        model: &EntryModel,
        overrider: Option<&dyn AxisValuesOverrider>,
        x_step: Option<f64>,
    ) -> ChartResult<ChartValues> {
        self.check_model(model)?;

        let shared_step = match x_step {
            Some(step) => step,
            None => shared_child_step(model.children())?.unwrap_or(0.0),
        };
        ChartValues::from_extrema(model, shared_step).finish(model, overrider)
    }
}

fn shared_child_step(children: &[EntryModel]) -> ChartResult<Option<f64>> {
    let mut shared: Option<f64> = None;
    for (child, model) in children.iter().enumerate() {
        let Some(step) = model.x_gcd() else {
            continue;
        };
        match shared {
            None => shared = Some(step),
            Some(expected) => {
                let tolerance = X_STEP_EPSILON * expected.max(step);
                if (expected - step).abs() > tolerance {
                    debug!(child, expected, found = step, "composed x step mismatch");
                    return Err(ChartError::XStepMismatch {
                        child,
                        expected,
                        found: step,
                    });
                }
            }
        }
    }
    Ok(shared)
}

impl ChartLayer for ComposedChart {
    fn update_dimensions(
        &self,
        model: &EntryModel,
        values: &ChartValues,
        accumulator: &mut HorizontalDimensionsAccumulator,
    ) {
        for (chart, child) in self.charts.iter().zip(model.children()) {
            chart.update_dimensions(child, values, accumulator);
        }
    }

    fn draw_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
        mut locations: Option<&mut EntryLocationMap>,
        selected_index: Option<usize>,
    ) -> ChartResult<()> {
        self.check_model(model)?;
        let last = self.charts.len() - 1;
        for (position, (chart, child)) in self.charts.iter().zip(model.children()).enumerate() {
            let child_locations = if position == last {
                locations.as_deref_mut()
            } else {
                None
            };
            chart.draw_scrollable(ctx, child, child_locations, selected_index)?;
        }
        Ok(())
    }

    fn draw_non_scrollable(
        &self,
        ctx: &mut DrawContext<'_>,
        model: &EntryModel,
    ) -> ChartResult<()> {
        for (chart, child) in self.charts.iter().zip(model.children()) {
            chart.draw_non_scrollable(ctx, child)?;
        }
        Ok(())
    }
}
