use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::EntryModel;
use crate::error::{ChartError, ChartResult};

/// Relative tolerance for the "x is `min_x + k * x_step`" alignment check.
///
/// The distance of `(x - min_x) / x_step` from the nearest integer must not
/// exceed `ALIGNMENT_EPSILON * max(1, |k|)`.
pub const ALIGNMENT_EPSILON: f64 = 1e-6;

/// Resolved value range of one chart for one dataset version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartValues {
    pub min_x: f64,
    pub max_x: f64,
    pub x_step: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Id of the dataset that produced the default bounds.
    pub model_id: u64,
}

impl ChartValues {
    /// Resolves the value range of `model`.
    ///
    /// Bounds default to the dataset extrema; `overrider` may replace any of
    /// them. The x step comes from `x_step` when given, otherwise from the
    /// dataset's gap gcd. Every entry must then sit on the x grid.
    pub fn resolve(
        model: &EntryModel,
        overrider: Option<&dyn AxisValuesOverrider>,
        x_step: Option<f64>,
    ) -> ChartResult<Self> {
        let step = x_step.or_else(|| model.x_gcd()).unwrap_or(0.0);
        Self::from_extrema(model, step).finish(model, overrider)
    }

    /// Dataset extrema with the given step, before overrides and checks.
    pub(crate) fn from_extrema(model: &EntryModel, x_step: f64) -> Self {
        Self {
            min_x: model.min_x(),
            max_x: model.max_x(),
            x_step,
            min_y: model.min_y(),
            max_y: model.max_y(),
            model_id: model.id(),
        }
    }

    /// Applies `overrider`, then checks the range and the alignment of every
    /// entry of `model`.
    pub(crate) fn finish(
        mut self,
        model: &EntryModel,
        overrider: Option<&dyn AxisValuesOverrider>,
    ) -> ChartResult<Self> {
        if let Some(overrider) = overrider {
            self.min_x = overrider.min_x(model).unwrap_or(self.min_x);
            self.max_x = overrider.max_x(model).unwrap_or(self.max_x);
            self.min_y = overrider.min_y(model).unwrap_or(self.min_y);
            self.max_y = overrider.max_y(model).unwrap_or(self.max_y);
        }

        self.validate()?;
        for entry in model.series().iter().flatten() {
            self.x_spacing_multiplier(entry.x)?;
        }

        trace!(
            model_id = self.model_id,
            min_x = self.min_x,
            max_x = self.max_x,
            x_step = self.x_step,
            "resolved chart values"
        );
        Ok(self)
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.x_step.is_finite() || self.x_step <= 0.0 {
            return Err(ChartError::DegenerateXStep {
                x_step: self.x_step,
            });
        }
        for (name, value) in [
            ("min_x", self.min_x),
            ("max_x", self.max_x),
            ("min_y", self.min_y),
            ("max_y", self.max_y),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "chart value `{name}` must be finite"
                )));
            }
        }
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return Err(ChartError::InvalidData(
                "chart value bounds must not be inverted".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn length_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn length_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Number of x-grid positions between `min_x` and `max_x`, both included.
    #[must_use]
    pub fn max_major_entry_count(&self) -> usize {
        let steps = (self.length_x().abs() / self.x_step).round();
        steps as usize + 1
    }

    /// Returns `k` such that `x == min_x + k * x_step`.
    pub fn x_spacing_multiplier(&self, x: f64) -> ChartResult<f64> {
        let multiplier = (x - self.min_x) / self.x_step;
        let tolerance = ALIGNMENT_EPSILON * multiplier.abs().max(1.0);
        if (multiplier - multiplier.round()).abs() > tolerance {
            return Err(ChartError::MisalignedEntry {
                x,
                min_x: self.min_x,
                x_step: self.x_step,
            });
        }
        Ok(multiplier.round())
    }

    /// Whether `other` would lay content out differently.
    #[must_use]
    pub fn same_range(&self, other: &Self) -> bool {
        self.min_x == other.min_x
            && self.max_x == other.max_x
            && self.x_step == other.x_step
            && self.min_y == other.min_y
            && self.max_y == other.max_y
    }
}

/// Per-axis override policy applied on top of dataset extrema.
///
/// Every hook returns `None` to keep the dataset default.
pub trait AxisValuesOverrider {
    fn min_x(&self, _model: &EntryModel) -> Option<f64> {
        None
    }

    fn max_x(&self, _model: &EntryModel) -> Option<f64> {
        None
    }

    fn min_y(&self, _model: &EntryModel) -> Option<f64> {
        None
    }

    fn max_y(&self, _model: &EntryModel) -> Option<f64> {
        None
    }
}

/// Fixed overrides, serializable as part of host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValuesOverride {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    /// Widens the y range so it always includes zero.
    #[serde(default)]
    pub include_zero_y: bool,
}

impl AxisValuesOverride {
    #[must_use]
    pub fn fixed(
        min_x: Option<f64>,
        max_x: Option<f64>,
        min_y: Option<f64>,
        max_y: Option<f64>,
    ) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            include_zero_y: false,
        }
    }

    #[must_use]
    pub fn zero_based_y() -> Self {
        Self {
            include_zero_y: true,
            ..Self::default()
        }
    }
}

impl AxisValuesOverrider for AxisValuesOverride {
    fn min_x(&self, _model: &EntryModel) -> Option<f64> {
        self.min_x
    }

    fn max_x(&self, _model: &EntryModel) -> Option<f64> {
        self.max_x
    }

    fn min_y(&self, model: &EntryModel) -> Option<f64> {
        match (self.min_y, self.include_zero_y) {
            (Some(value), _) => Some(value),
            (None, true) => Some(model.min_y().min(0.0)),
            (None, false) => None,
        }
    }

    fn max_y(&self, model: &EntryModel) -> Option<f64> {
        match (self.max_y, self.include_zero_y) {
            (Some(value), _) => Some(value),
            (None, true) => Some(model.max_y().max(0.0)),
            (None, false) => None,
        }
    }
}

/// Memoizes resolved values so they are recomputed once per dataset version.
#[derive(Debug, Clone, Default)]
pub struct ChartValuesCache {
    cached: Option<ChartValues>,
}

impl ChartValuesCache {
    pub fn get_or_resolve(
        &mut self,
        model: &EntryModel,
        resolve: impl FnOnce(&EntryModel) -> ChartResult<ChartValues>,
    ) -> ChartResult<ChartValues> {
        if let Some(values) = self.cached {
            if values.model_id == model.id() {
                return Ok(values);
            }
        }
        let values = resolve(model)?;
        self.cached = Some(values);
        Ok(values)
    }

    /// Drops the cached range, e.g. after the override policy changed.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    #[must_use]
    pub fn cached(&self) -> Option<ChartValues> {
        self.cached
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisValuesOverride, ChartValues, ChartValuesCache};
    use crate::core::{Entry, EntryModel};
    use crate::error::ChartError;

    fn model(points: &[(f64, f64)]) -> EntryModel {
        let entries = points.iter().map(|&(x, y)| Entry::new(x, y)).collect();
        EntryModel::single(7, entries).expect("model")
    }

    #[test]
    fn defaults_follow_dataset_extrema() {
        let values = ChartValues::resolve(&model(&[(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]), None, None)
            .expect("values");
        assert_eq!((values.min_x, values.max_x), (0.0, 2.0));
        assert_eq!((values.min_y, values.max_y), (1.0, 3.0));
        assert_eq!(values.x_step, 1.0);
        assert_eq!(values.max_major_entry_count(), 3);
        assert_eq!(values.model_id, 7);
    }

    #[test]
    fn zero_based_override_keeps_y_at_zero() {
        let overrider = AxisValuesOverride::zero_based_y();
        let values = ChartValues::resolve(&model(&[(0.0, 4.0), (1.0, 6.0)]), Some(&overrider), None)
            .expect("values");
        assert_eq!(values.min_y, 0.0);
        assert_eq!(values.max_y, 6.0);
    }

    #[test]
    fn single_x_value_without_fallback_step_is_degenerate() {
        let err = ChartValues::resolve(&model(&[(3.0, 1.0)]), None, None).expect_err("degenerate");
        assert!(matches!(err, ChartError::DegenerateXStep { .. }));

        let values =
            ChartValues::resolve(&model(&[(3.0, 1.0)]), None, Some(1.0)).expect("fallback");
        assert_eq!(values.max_major_entry_count(), 1);
    }

    #[test]
    fn custom_step_that_misaligns_entries_is_rejected() {
        let err = ChartValues::resolve(&model(&[(0.0, 1.0), (3.0, 1.0)]), None, Some(2.0))
            .expect_err("misaligned");
        assert!(matches!(err, ChartError::MisalignedEntry { x, .. } if x == 3.0));
    }

    #[test]
    fn cache_recomputes_only_for_new_dataset_version() {
        let mut cache = ChartValuesCache::default();
        let data = model(&[(0.0, 1.0), (1.0, 2.0)]);
        let mut calls = 0;
        for _ in 0..3 {
            cache
                .get_or_resolve(&data, |m| {
                    calls += 1;
                    ChartValues::resolve(m, None, None)
                })
                .expect("values");
        }
        assert_eq!(calls, 1);
    }
}
