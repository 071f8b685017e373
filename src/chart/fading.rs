use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{FadeEdgePrimitive, FadeSide, RenderFrame};

/// Fades scrollable content out near an edge that has more content behind it.
///
/// An edge's fade grows linearly from nothing to full strength over the first
/// `visibility_threshold_px` of scroll distance available in its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadingEdges {
    #[serde(default = "default_edge_width_px")]
    pub start_edge_width_px: f64,
    #[serde(default = "default_edge_width_px")]
    pub end_edge_width_px: f64,
    #[serde(default = "default_visibility_threshold_px")]
    pub visibility_threshold_px: f64,
}

impl Default for FadingEdges {
    fn default() -> Self {
        Self {
            start_edge_width_px: default_edge_width_px(),
            end_edge_width_px: default_edge_width_px(),
            visibility_threshold_px: default_visibility_threshold_px(),
        }
    }
}

impl FadingEdges {
    #[must_use]
    pub fn symmetric(edge_width_px: f64) -> Self {
        Self {
            start_edge_width_px: edge_width_px,
            end_edge_width_px: edge_width_px,
            ..Self::default()
        }
    }

    pub(crate) fn validate(self) -> ChartResult<Self> {
        for value in [
            self.start_edge_width_px,
            self.end_edge_width_px,
            self.visibility_threshold_px,
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "fading edge sizes must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn edge_alpha(&self, remaining_scroll_px: f64) -> f64 {
        if remaining_scroll_px <= 0.0 {
            return 0.0;
        }
        if self.visibility_threshold_px <= 0.0 {
            return 1.0;
        }
        (remaining_scroll_px / self.visibility_threshold_px).clamp(0.0, 1.0)
    }

    /// Pushes the fade commands for `bounds`. Must run inside the layer the
    /// scrollable content was drawn into.
    pub fn apply(&self, frame: &mut RenderFrame, bounds: Rect, scroll: f64, max_scroll: f64) {
        let start_alpha = self.edge_alpha(scroll);
        if start_alpha > 0.0 && self.start_edge_width_px > 0.0 {
            let right = (bounds.left + self.start_edge_width_px).min(bounds.right);
            frame.push_fade_edge(FadeEdgePrimitive {
                rect: Rect::new(bounds.left, bounds.top, right, bounds.bottom),
                side: FadeSide::Start,
                alpha: start_alpha,
            });
        }

        let end_alpha = self.edge_alpha(max_scroll - scroll);
        if end_alpha > 0.0 && self.end_edge_width_px > 0.0 {
            let left = (bounds.right - self.end_edge_width_px).max(bounds.left);
            frame.push_fade_edge(FadeEdgePrimitive {
                rect: Rect::new(left, bounds.top, bounds.right, bounds.bottom),
                side: FadeSide::End,
                alpha: end_alpha,
            });
        }
    }
}

fn default_edge_width_px() -> f64 {
    32.0
}

fn default_visibility_threshold_px() -> f64 {
    16.0
}
