use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartValues, HorizontalDimensions, Rect};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Whether automatic zoom may scale content up to remove a trailing gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoScaleUp {
    #[default]
    Full,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_enabled")]
    pub is_zoom_enabled: bool,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            is_zoom_enabled: default_zoom_enabled(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl ZoomConfig {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() || self.min_zoom <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom bounds must be finite and > 0".to_owned(),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ChartError::InvalidConfig(format!(
                "min zoom {} exceeds max zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(self)
    }
}

fn default_zoom_enabled() -> bool {
    true
}

fn default_min_zoom() -> f64 {
    DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

/// Horizontal zoom factor of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    factor: f64,
    was_overridden: bool,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomState {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            factor: 1.0,
            was_overridden: false,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[must_use]
    pub fn was_overridden(&self) -> bool {
        self.was_overridden
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Applies a pinch step around `centroid_x`.
    ///
    /// Returns the compensating scroll delta that keeps the content under the
    /// centroid in place, or `None` when the new factor would leave
    /// `[min_zoom, max_zoom]` (the gesture is then ignored).
    pub fn on_zoom_gesture(
        &mut self,
        centroid_x: f64,
        zoom_change: f64,
        scroll_value: f64,
        content_left: f64,
    ) -> Option<f64> {
        if !zoom_change.is_finite() || zoom_change <= 0.0 {
            return None;
        }
        let new_factor = self.factor * zoom_change;
        if !(self.min_zoom..=self.max_zoom).contains(&new_factor) {
            trace!(
                factor = self.factor,
                zoom_change, "rejected zoom gesture outside bounds"
            );
            return None;
        }

        let transformation_axis_x = scroll_value + centroid_x - content_left;
        let zoomed_transformation_axis_x = transformation_axis_x * zoom_change;
        self.factor = new_factor;
        self.was_overridden = true;
        Some(zoomed_transformation_axis_x - transformation_axis_x)
    }

    /// Resolves the zoom used for this pass.
    ///
    /// While no gesture has set the zoom, or when scrolling is disabled, the
    /// factor is recomputed so the last entry meets the content end edge.
    pub fn resolve_for_pass(
        &mut self,
        dimensions: &HorizontalDimensions,
        values: &ChartValues,
        bounds: Rect,
        auto_scale_up: AutoScaleUp,
        is_scroll_enabled: bool,
    ) -> f64 {
        if self.was_overridden && is_scroll_enabled {
            return self.factor;
        }
        let zoom = self.auto_zoom(dimensions, values, bounds, auto_scale_up, is_scroll_enabled);
        if is_scroll_enabled {
            self.factor = zoom;
        }
        zoom
    }

    /// Fit factor for the current content, clamped to the zoom bounds.
    #[must_use]
    pub fn auto_zoom(
        &self,
        dimensions: &HorizontalDimensions,
        values: &ChartValues,
        bounds: Rect,
        auto_scale_up: AutoScaleUp,
        is_scroll_enabled: bool,
    ) -> f64 {
        let scalable_width = dimensions.scalable_content_width(values);
        let reduced_width = bounds.width() - dimensions.unscalable_padding();
        if scalable_width <= 0.0 || reduced_width <= 0.0 {
            return 1.0;
        }

        let fit = reduced_width / scalable_width;
        let zoom = match (fit > 1.0, auto_scale_up, is_scroll_enabled) {
            (true, AutoScaleUp::Full, _) => fit,
            (true, AutoScaleUp::None, _) => 1.0,
            (false, _, true) => 1.0,
            (false, _, false) => fit,
        };
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Forgets any gesture-set zoom.
    pub fn reset(&mut self) {
        self.factor = 1.0;
        self.was_overridden = false;
    }
}

/// Largest scroll offset for content of the given dimensions at `zoom`.
#[must_use]
pub fn max_scroll_distance(
    dimensions: &HorizontalDimensions,
    values: &ChartValues,
    bounds: Rect,
    zoom: f64,
) -> f64 {
    (dimensions.content_width(values, zoom) - bounds.width()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{AutoScaleUp, ZoomConfig, ZoomState, max_scroll_distance};
    use crate::core::{ChartValues, HorizontalDimensions, Rect};

    fn values() -> ChartValues {
        ChartValues {
            min_x: 0.0,
            max_x: 4.0,
            x_step: 1.0,
            min_y: 0.0,
            max_y: 1.0,
            model_id: 1,
        }
    }

    fn dims(x_spacing: f64) -> HorizontalDimensions {
        HorizontalDimensions {
            x_spacing,
            scalable_start_padding: x_spacing / 2.0,
            scalable_end_padding: x_spacing / 2.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        }
    }

    #[test]
    fn gesture_outside_bounds_is_a_no_op() {
        let mut zoom = ZoomState::new(ZoomConfig {
            is_zoom_enabled: true,
            min_zoom: 1.0,
            max_zoom: 5.0,
        });
        assert_eq!(zoom.on_zoom_gesture(50.0, 6.0, 0.0, 0.0), None);
        assert_eq!(zoom.factor(), 1.0);
        assert!(!zoom.was_overridden());
    }

    #[test]
    fn accepted_gesture_returns_compensating_scroll() {
        let mut zoom = ZoomState::default();
        let delta = zoom.on_zoom_gesture(60.0, 2.0, 40.0, 10.0).expect("accepted");
        assert_eq!(zoom.factor(), 2.0);
        assert!(zoom.was_overridden());
        assert_eq!(delta, 90.0);
    }

    #[test]
    fn auto_zoom_scales_up_to_remove_trailing_gap() {
        let zoom = ZoomState::default();
        let bounds = Rect::new(0.0, 0.0, 500.0, 100.0);
        let fitted = zoom.auto_zoom(&dims(50.0), &values(), bounds, AutoScaleUp::Full, true);
        assert!((fitted - 2.0).abs() <= 1e-9);

        let fixed = zoom.auto_zoom(&dims(50.0), &values(), bounds, AutoScaleUp::None, true);
        assert_eq!(fixed, 1.0);
    }

    #[test]
    fn auto_zoom_shrinks_only_without_scrolling() {
        let zoom = ZoomState::default();
        let bounds = Rect::new(0.0, 0.0, 250.0, 100.0);
        assert_eq!(
            zoom.auto_zoom(&dims(100.0), &values(), bounds, AutoScaleUp::Full, true),
            1.0
        );
        let shrunk = zoom.auto_zoom(&dims(100.0), &values(), bounds, AutoScaleUp::Full, false);
        assert!((shrunk - 0.5).abs() <= 1e-9);
    }

    #[test]
    fn overridden_zoom_survives_passes_only_while_scrolling() {
        let mut zoom = ZoomState::default();
        zoom.on_zoom_gesture(0.0, 3.0, 0.0, 0.0);
        let bounds = Rect::new(0.0, 0.0, 500.0, 100.0);
        let pass = zoom.resolve_for_pass(&dims(100.0), &values(), bounds, AutoScaleUp::Full, true);
        assert_eq!(pass, 3.0);
        let pass = zoom.resolve_for_pass(&dims(100.0), &values(), bounds, AutoScaleUp::Full, false);
        assert_eq!(pass, 1.0);
    }

    #[test]
    fn max_scroll_grows_with_zoom() {
        let bounds = Rect::new(0.0, 0.0, 500.0, 100.0);
        assert_eq!(max_scroll_distance(&dims(100.0), &values(), bounds, 1.0), 0.0);
        assert_eq!(max_scroll_distance(&dims(100.0), &values(), bounds, 2.0), 500.0);
    }
}
