use std::sync::Arc;

use crate::chart::{AxisRenderer, Chart, Decoration, Legend, Marker};
use crate::core::{
    AxisValuesOverrider, ChartLayout, ChartValues, ChartValuesCache, EntryModel, Point,
};
use crate::error::ChartResult;
use crate::interaction::{
    ClickSelection, EntryLocationMap, InputQueue, MarkerEntries, MarkerVisibilityListener,
    MarkerVisibilityTracker, ScrollOutcome, ScrollState, ZoomState,
};

use super::{ChartEngineConfig, DrawPassState, XStepProvider};

/// Internal engine core state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) chart: Chart,
    pub(super) data: DataState,
    pub(super) parts: ChartParts,
    pub(super) session: InteractionSession,
    pub(super) runtime: PassRuntime,
}

/// Dataset, value policies and what the last handled dataset looked like.
pub(super) struct DataState {
    pub(super) model: Option<Arc<EntryModel>>,
    pub(super) overrider: Option<Box<dyn AxisValuesOverrider>>,
    pub(super) x_step_provider: Option<XStepProvider>,
    pub(super) values_cache: ChartValuesCache,
    pub(super) handled: Option<HandledModel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HandledModel {
    pub(super) model_id: u64,
    pub(super) values: ChartValues,
    pub(super) entry_count: usize,
}

/// Pluggable pieces drawn around the chart.
#[derive(Default)]
pub(super) struct ChartParts {
    pub(super) axes: Vec<Box<dyn AxisRenderer>>,
    pub(super) decorations: Vec<Box<dyn Decoration>>,
    pub(super) legend: Option<Box<dyn Legend>>,
    pub(super) marker: Option<Box<dyn Marker>>,
    pub(super) marker_listener: Option<Box<dyn MarkerVisibilityListener>>,
}

/// State mutated by gestures between passes.
#[derive(Default)]
pub(super) struct InteractionSession {
    pub(super) input: InputQueue,
    pub(super) scroll: ScrollState,
    pub(super) zoom: ZoomState,
    pub(super) touch_point: Option<Point>,
    pub(super) pending_click: bool,
    pub(super) click_selection: ClickSelection,
    pub(super) marker_tracker: MarkerVisibilityTracker,
    pub(super) marker_entries: MarkerEntries,
}

/// Results of the previous pass that the next one builds on.
#[derive(Default)]
pub(super) struct PassRuntime {
    pub(super) state: DrawPassState,
    pub(super) last_layout: Option<ChartLayout>,
    pub(super) last_locations: EntryLocationMap,
}

impl DataState {
    pub(super) fn new(config: &ChartEngineConfig) -> Self {
        Self {
            model: None,
            overrider: config
                .values_override
                .map(|values_override| Box::new(values_override) as Box<dyn AxisValuesOverrider>),
            x_step_provider: None,
            values_cache: ChartValuesCache::default(),
            handled: None,
        }
    }

    /// Values of `model`, resolved at most once per dataset id.
    pub(super) fn resolve_values(
        &mut self,
        chart: &Chart,
        model: &EntryModel,
        configured_x_step: Option<f64>,
    ) -> ChartResult<ChartValues> {
        let x_step = self
            .x_step_provider
            .as_ref()
            .map(|provider| provider(model))
            .or(configured_x_step);
        let overrider = self.overrider.as_deref();
        self.values_cache
            .get_or_resolve(model, |model| chart.resolve_values(model, overrider, x_step))
    }
}

impl InteractionSession {
    /// Scrolls by `delta` and moves the touch point along with the content,
    /// including the part swallowed by clamping.
    pub(super) fn scroll_by_with_touch(&mut self, delta: f64) -> ScrollOutcome {
        let outcome = self.scroll.scroll_by(delta);
        self.shift_touch_point(outcome.consumed + outcome.unconsumed);
        outcome
    }

    pub(super) fn shift_touch_point(&mut self, scrolled: f64) {
        if let Some(point) = self.touch_point.as_mut() {
            *point = point.translated_x(-scrolled);
        }
    }

    /// Resolves a pending click against last pass' entry locations and
    /// returns the selected entry index.
    pub(super) fn resolve_click(
        &mut self,
        locations: &EntryLocationMap,
        layout: &ChartLayout,
    ) -> Option<usize> {
        if std::mem::take(&mut self.pending_click) {
            let clicked_index = self
                .touch_point
                .and_then(|point| locations.closest_marker_entries(point, layout.content_bounds))
                .and_then(|entries| entries.first().map(|model| model.index));
            match clicked_index {
                Some(index) => {
                    if !self.click_selection.toggle(index) {
                        self.touch_point = None;
                    }
                }
                None => self.click_selection.clear(),
            }
        }
        self.click_selection.previous_index()
    }
}
