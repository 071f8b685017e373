use serde::{Deserialize, Serialize};

use crate::chart::FadingEdges;
use crate::core::{AxisValuesOverride, HorizontalLayout};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AutoScaleUp, ChartScrollSpec, ZoomConfig};

/// Engine bootstrap configuration.
///
/// Every section has a serde default so partial JSON documents load.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub horizontal_layout: HorizontalLayout,
    #[serde(default)]
    pub scroll: ChartScrollSpec,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub auto_scale_up: AutoScaleUp,
    #[serde(default)]
    pub fading_edges: Option<FadingEdges>,
    /// Fixed value bounds applied on top of the dataset extrema.
    #[serde(default)]
    pub values_override: Option<AxisValuesOverride>,
    /// Explicit x step; `None` derives it from the dataset.
    #[serde(default)]
    pub x_step: Option<f64>,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn with_horizontal_layout(mut self, layout: HorizontalLayout) -> Self {
        self.horizontal_layout = layout;
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, scroll: ChartScrollSpec) -> Self {
        self.scroll = scroll;
        self
    }

    #[must_use]
    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll.is_scroll_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_auto_scale_up(mut self, auto_scale_up: AutoScaleUp) -> Self {
        self.auto_scale_up = auto_scale_up;
        self
    }

    #[must_use]
    pub fn with_fading_edges(mut self, fading_edges: FadingEdges) -> Self {
        self.fading_edges = Some(fading_edges);
        self
    }

    #[must_use]
    pub fn with_values_override(mut self, values_override: AxisValuesOverride) -> Self {
        self.values_override = Some(values_override);
        self
    }

    #[must_use]
    pub fn with_x_step(mut self, x_step: f64) -> Self {
        self.x_step = Some(x_step);
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.horizontal_layout.validate()?;
        self.scroll.validate()?;
        self.zoom.validate()?;
        if let Some(fading_edges) = self.fading_edges {
            fading_edges.validate()?;
        }
        if let Some(x_step) = self.x_step {
            if !x_step.is_finite() || x_step <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "x_step must be finite and > 0, got {x_step}"
                )));
            }
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}
