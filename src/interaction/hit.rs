use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{Entry, Point, Rect};
use crate::render::Color;

/// One highlighted entry: where it was drawn and how to paint its indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerEntryModel {
    pub location: Point,
    pub entry: Entry,
    pub series_index: usize,
    /// Position of `entry` within its series.
    pub index: usize,
    pub color: Color,
}

/// Entries sharing one pixel x, ordered by series index.
pub type MarkerEntries = SmallVec<[MarkerEntryModel; 4]>;

/// Pixel x to drawn entries, filled by the tap-target chart during a draw pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryLocationMap {
    by_x: BTreeMap<OrderedFloat<f64>, MarkerEntries>,
}

impl EntryLocationMap {
    pub fn insert(&mut self, model: MarkerEntryModel) {
        if !model.location.x.is_finite() {
            return;
        }
        let slot = self.by_x.entry(OrderedFloat(model.location.x)).or_default();
        let at = slot
            .iter()
            .position(|existing| {
                (existing.series_index, existing.index) > (model.series_index, model.index)
            })
            .unwrap_or(slot.len());
        slot.insert(at, model);
    }

    pub fn clear(&mut self) {
        self.by_x.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_x.is_empty()
    }

    /// Entries whose pixel x is nearest to `touch_x`; equal distances go to
    /// the smaller x.
    #[must_use]
    pub fn closest(&self, touch_x: f64) -> Option<&MarkerEntries> {
        if !touch_x.is_finite() {
            return None;
        }
        let key = OrderedFloat(touch_x);
        let below = self.by_x.range(..=key).next_back();
        let above = self.by_x.range(key..).next();
        match (below, above) {
            (Some((low_x, low)), Some((high_x, high))) => {
                if touch_x - low_x.0 <= high_x.0 - touch_x {
                    Some(low)
                } else {
                    Some(high)
                }
            }
            (Some((_, entries)), None) | (None, Some((_, entries))) => Some(entries),
            (None, None) => None,
        }
    }

    /// Marker entries for a touch inside `bounds`.
    ///
    /// Only the x coordinate is constrained; markers span the full height.
    #[must_use]
    pub fn closest_marker_entries(&self, touch: Point, bounds: Rect) -> Option<MarkerEntries> {
        if !bounds.contains_x(touch.x) {
            return None;
        }
        self.closest(touch.x).cloned()
    }
}

/// Click toggling: a second click on the same entry index dismisses the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickSelection {
    previous_index: Option<usize>,
}

impl ClickSelection {
    /// Records a click on `index`. Returns `false` when the click dismisses.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.previous_index == Some(index) {
            self.previous_index = None;
            false
        } else {
            self.previous_index = Some(index);
            true
        }
    }

    pub fn clear(&mut self) {
        self.previous_index = None;
    }

    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }
}
