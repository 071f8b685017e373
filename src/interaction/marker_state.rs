use tracing::debug;

use crate::core::Rect;
use crate::interaction::MarkerEntryModel;

/// Host callback for marker visibility changes.
pub trait MarkerVisibilityListener {
    fn on_visibility_changed(&mut self, visible: bool, entries: &[MarkerEntryModel], bounds: Rect);
}

/// Marker transition observed between two draw passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTransition {
    Shown,
    Hidden,
    /// Still visible, over a different entry set.
    Moved,
}

impl MarkerTransition {
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Remembers which entries were highlighted last pass so listeners fire on
/// transitions only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerVisibilityTracker {
    shown: Option<Vec<(usize, usize)>>,
}

impl MarkerVisibilityTracker {
    /// Compares this pass' entries with the previous pass.
    pub fn observe(&mut self, entries: Option<&[MarkerEntryModel]>) -> Option<MarkerTransition> {
        let current: Option<Vec<(usize, usize)>> = entries
            .filter(|entries| !entries.is_empty())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.series_index, entry.index))
                    .collect()
            });

        let transition = match (&self.shown, &current) {
            (None, None) => None,
            (None, Some(_)) => Some(MarkerTransition::Shown),
            (Some(_), None) => Some(MarkerTransition::Hidden),
            (Some(previous), Some(next)) if previous != next => Some(MarkerTransition::Moved),
            (Some(_), Some(_)) => None,
        };
        if let Some(transition) = transition {
            debug!(?transition, "marker visibility changed");
        }
        self.shown = current;
        transition
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerTransition, MarkerVisibilityTracker};
    use crate::core::{Entry, Point};
    use crate::interaction::MarkerEntryModel;
    use crate::render::Color;

    fn entry(index: usize) -> MarkerEntryModel {
        MarkerEntryModel {
            location: Point::new(index as f64 * 10.0, 0.0),
            entry: Entry::new(index as f64, 0.0),
            series_index: 0,
            index,
            color: Color::BLACK,
        }
    }

    #[test]
    fn fires_only_on_transitions() {
        let mut tracker = MarkerVisibilityTracker::default();
        assert_eq!(tracker.observe(None), None);
        assert_eq!(tracker.observe(Some(&[entry(1)])), Some(MarkerTransition::Shown));
        assert_eq!(tracker.observe(Some(&[entry(1)])), None);
        assert_eq!(tracker.observe(Some(&[entry(2)])), Some(MarkerTransition::Moved));
        assert_eq!(tracker.observe(Some(&[])), Some(MarkerTransition::Hidden));
        assert_eq!(tracker.observe(None), None);
        assert!(!tracker.is_visible());
    }
}
