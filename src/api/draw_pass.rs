use serde::{Deserialize, Serialize};

use crate::core::EmptyLayout;

/// Where the engine is within a draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPassState {
    #[default]
    Idle,
    Measuring,
    /// The last pass found nothing to lay out and drew nothing.
    EmptyLayout,
    Drawing,
}

/// Why a pass drew nothing. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The surface reported a zero width or height.
    EmptySurface,
    NoModel,
    /// Axes and legend left no room for content.
    EmptyBounds,
    /// No entries, or nothing to spread across the width.
    EmptyContent,
}

impl From<EmptyLayout> for SkipReason {
    fn from(value: EmptyLayout) -> Self {
        match value {
            EmptyLayout::EmptyBounds => Self::EmptyBounds,
            EmptyLayout::EmptyContent => Self::EmptyContent,
        }
    }
}

/// Summary of a pass that reached the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStats {
    pub commands: usize,
    pub zoom: f64,
    pub scroll: f64,
    pub max_scroll: f64,
    pub marker_entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawOutcome {
    Drawn(DrawStats),
    Skipped(SkipReason),
}

impl DrawOutcome {
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn(_))
    }

    #[must_use]
    pub fn stats(&self) -> Option<DrawStats> {
        match self {
            Self::Drawn(stats) => Some(*stats),
            Self::Skipped(_) => None,
        }
    }
}
