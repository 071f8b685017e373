use serde::{Deserialize, Serialize};

use crate::core::ChartValues;
use crate::error::{ChartError, ChartResult};

/// How chart content is positioned horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HorizontalLayout {
    /// One equal-width slot per x-grid position; entries sit at slot centres.
    #[default]
    Segmented,
    /// Entries spread linearly in x from the start edge to the end edge.
    FullWidth {
        #[serde(default)]
        scalable_start_padding: f64,
        #[serde(default)]
        scalable_end_padding: f64,
        #[serde(default)]
        unscalable_start_padding: f64,
        #[serde(default)]
        unscalable_end_padding: f64,
    },
}

impl HorizontalLayout {
    #[must_use]
    pub fn full_width() -> Self {
        Self::FullWidth {
            scalable_start_padding: 0.0,
            scalable_end_padding: 0.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        }
    }

    pub(crate) fn validate(self) -> ChartResult<Self> {
        if let Self::FullWidth {
            scalable_start_padding,
            scalable_end_padding,
            unscalable_start_padding,
            unscalable_end_padding,
        } = self
        {
            for value in [
                scalable_start_padding,
                scalable_end_padding,
                unscalable_start_padding,
                unscalable_end_padding,
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidConfig(
                        "full-width layout paddings must be finite and >= 0".to_owned(),
                    ));
                }
            }
        }
        Ok(self)
    }
}

/// Extra horizontal space requested by one contributor (a chart, an axis).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionContribution {
    /// Minimum pixels per x step the contributor needs (e.g. a column group).
    pub x_spacing: f64,
    pub scalable_start_padding: f64,
    pub scalable_end_padding: f64,
    pub unscalable_start_padding: f64,
    pub unscalable_end_padding: f64,
}

impl DimensionContribution {
    #[must_use]
    pub fn x_spacing(x_spacing: f64) -> Self {
        Self {
            x_spacing,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unscalable_padding(start: f64, end: f64) -> Self {
        Self {
            unscalable_start_padding: start,
            unscalable_end_padding: end,
            ..Self::default()
        }
    }
}

/// Accumulator for one layout pass.
///
/// Contributions add up in any order; nothing is reordered or deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizontalDimensionsAccumulator {
    requested: DimensionContribution,
}

impl HorizontalDimensionsAccumulator {
    pub fn add(&mut self, contribution: DimensionContribution) {
        let sanitize = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        let total = &mut self.requested;
        total.x_spacing += sanitize(contribution.x_spacing);
        total.scalable_start_padding += sanitize(contribution.scalable_start_padding);
        total.scalable_end_padding += sanitize(contribution.scalable_end_padding);
        total.unscalable_start_padding += sanitize(contribution.unscalable_start_padding);
        total.unscalable_end_padding += sanitize(contribution.unscalable_end_padding);
    }

    #[must_use]
    pub fn requested(&self) -> DimensionContribution {
        self.requested
    }

    /// Fixes `x_spacing` for `available_width` and returns the frozen
    /// dimensions. `None` means there is nothing to lay out: no entries, a
    /// zero-length full-width range or no usable width.
    #[must_use]
    pub fn freeze(
        &self,
        values: &ChartValues,
        layout: HorizontalLayout,
        available_width: f64,
        entry_count: usize,
    ) -> Option<HorizontalDimensions> {
        if entry_count == 0 || !available_width.is_finite() {
            return None;
        }

        let mut total = self.requested;
        if let HorizontalLayout::FullWidth {
            scalable_start_padding,
            scalable_end_padding,
            unscalable_start_padding,
            unscalable_end_padding,
        } = layout
        {
            total.scalable_start_padding += scalable_start_padding;
            total.scalable_end_padding += scalable_end_padding;
            total.unscalable_start_padding += unscalable_start_padding;
            total.unscalable_end_padding += unscalable_end_padding;
        }

        let total_padding = total.scalable_start_padding
            + total.scalable_end_padding
            + total.unscalable_start_padding
            + total.unscalable_end_padding;
        let usable_width = available_width - total_padding;

        let slots = match layout {
            HorizontalLayout::Segmented => values.max_major_entry_count() as f64,
            HorizontalLayout::FullWidth { .. } => values.length_x() / values.x_step,
        };
        if slots <= 0.0 {
            return None;
        }

        let x_spacing = (usable_width / slots).max(total.x_spacing);
        if !x_spacing.is_finite() || x_spacing <= 0.0 {
            return None;
        }

        let segment_padding = match layout {
            HorizontalLayout::Segmented => x_spacing / 2.0,
            HorizontalLayout::FullWidth { .. } => 0.0,
        };
        Some(HorizontalDimensions {
            x_spacing,
            scalable_start_padding: total.scalable_start_padding + segment_padding,
            scalable_end_padding: total.scalable_end_padding + segment_padding,
            unscalable_start_padding: total.unscalable_start_padding,
            unscalable_end_padding: total.unscalable_end_padding,
        })
    }
}

/// Frozen horizontal measurements of one draw pass, at zoom 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalDimensions {
    /// Pixels per x step.
    pub x_spacing: f64,
    pub scalable_start_padding: f64,
    pub scalable_end_padding: f64,
    pub unscalable_start_padding: f64,
    pub unscalable_end_padding: f64,
}

impl HorizontalDimensions {
    #[must_use]
    pub fn start_padding(&self) -> f64 {
        self.scalable_start_padding + self.unscalable_start_padding
    }

    #[must_use]
    pub fn end_padding(&self) -> f64 {
        self.scalable_end_padding + self.unscalable_end_padding
    }

    #[must_use]
    pub fn unscalable_padding(&self) -> f64 {
        self.unscalable_start_padding + self.unscalable_end_padding
    }

    /// Width of everything that zooms: entry spans plus scalable paddings.
    #[must_use]
    pub fn scalable_content_width(&self, values: &ChartValues) -> f64 {
        let spans = values.length_x() / values.x_step;
        self.x_spacing * spans + self.scalable_start_padding + self.scalable_end_padding
    }

    #[must_use]
    pub fn content_width(&self, values: &ChartValues, zoom: f64) -> f64 {
        self.scalable_content_width(values) * zoom + self.unscalable_padding()
    }

    /// Returns the dimensions as seen at `zoom`.
    #[must_use]
    pub fn scaled(&self, zoom: f64) -> Self {
        Self {
            x_spacing: self.x_spacing * zoom,
            scalable_start_padding: self.scalable_start_padding * zoom,
            scalable_end_padding: self.scalable_end_padding * zoom,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DimensionContribution, HorizontalDimensionsAccumulator, HorizontalLayout};
    use crate::core::ChartValues;

    fn values(min_x: f64, max_x: f64, x_step: f64) -> ChartValues {
        ChartValues {
            min_x,
            max_x,
            x_step,
            min_y: 0.0,
            max_y: 1.0,
            model_id: 0,
        }
    }

    #[test]
    fn segmented_layout_splits_width_into_equal_slots() {
        let dims = HorizontalDimensionsAccumulator::default()
            .freeze(&values(0.0, 2.0, 1.0), HorizontalLayout::Segmented, 300.0, 3)
            .expect("dimensions");
        assert!((dims.x_spacing - 100.0).abs() <= 1e-9);
        assert!((dims.scalable_start_padding - 50.0).abs() <= 1e-9);
        assert!((dims.content_width(&values(0.0, 2.0, 1.0), 1.0) - 300.0).abs() <= 1e-9);
    }

    #[test]
    fn full_width_layout_is_linear_in_x() {
        let values = values(0.0, 10.0, 2.0);
        let dims = HorizontalDimensionsAccumulator::default()
            .freeze(&values, HorizontalLayout::full_width(), 500.0, 6)
            .expect("dimensions");
        assert!((dims.x_spacing - 100.0).abs() <= 1e-9);
        assert_eq!(dims.scalable_start_padding, 0.0);
    }

    #[test]
    fn contributions_accumulate_in_any_order() {
        let a = DimensionContribution::unscalable_padding(10.0, 0.0);
        let b = DimensionContribution {
            scalable_end_padding: 4.0,
            ..DimensionContribution::x_spacing(12.0)
        };

        let mut forward = HorizontalDimensionsAccumulator::default();
        forward.add(a);
        forward.add(b);
        let mut backward = HorizontalDimensionsAccumulator::default();
        backward.add(b);
        backward.add(a);
        assert_eq!(forward.requested(), backward.requested());
    }

    #[test]
    fn requested_spacing_overflows_narrow_surfaces() {
        let mut accumulator = HorizontalDimensionsAccumulator::default();
        accumulator.add(DimensionContribution::x_spacing(40.0));
        let values = values(0.0, 9.0, 1.0);
        let dims = accumulator
            .freeze(&values, HorizontalLayout::Segmented, 100.0, 10)
            .expect("dimensions");
        assert_eq!(dims.x_spacing, 40.0);
        assert!(dims.content_width(&values, 1.0) > 100.0);
    }

    #[test]
    fn empty_or_zero_length_content_has_no_dimensions() {
        let accumulator = HorizontalDimensionsAccumulator::default();
        assert!(accumulator
            .freeze(&values(0.0, 2.0, 1.0), HorizontalLayout::Segmented, 300.0, 0)
            .is_none());
        assert!(accumulator
            .freeze(&values(4.0, 4.0, 1.0), HorizontalLayout::full_width(), 300.0, 1)
            .is_none());
        assert!(accumulator
            .freeze(&values(0.0, 2.0, 1.0), HorizontalLayout::Segmented, 0.0, 3)
            .is_none());
    }
}
