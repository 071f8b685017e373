use std::sync::Arc;

use tracing::{debug, warn};

use crate::chart::{AxisRenderer, Chart, Decoration, Legend, Marker};
use crate::core::{AxisValuesOverrider, ChartLayout, ChartValues, EntryModel, Point};
use crate::error::ChartResult;
use crate::interaction::{MarkerEntryModel, MarkerVisibilityListener, ScrollOutcome};
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, DrawPassState};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.core.chart
    }

    /// Replaces the dataset.
    ///
    /// Non-empty datasets are resolved right away so a degenerate or
    /// misaligned dataset is rejected here and the previous one stays active.
    pub fn set_model(&mut self, model: impl Into<Arc<EntryModel>>) -> ChartResult<()> {
        let model = model.into();
        if !model.is_empty() {
            if let Err(err) =
                self.core
                    .data
                    .resolve_values(&self.core.chart, &model, self.core.config.x_step)
            {
                warn!(model_id = model.id(), error = %err, "rejected dataset");
                return Err(err);
            }
        }
        debug!(
            model_id = model.id(),
            entry_count = model.entry_count(),
            "dataset replaced"
        );
        self.core.data.model = Some(model);
        Ok(())
    }

    pub fn clear_model(&mut self) {
        self.core.data.model = None;
    }

    #[must_use]
    pub fn model(&self) -> Option<&EntryModel> {
        self.core.data.model.as_deref()
    }

    /// Values resolved for the current dataset, if any.
    #[must_use]
    pub fn values(&self) -> Option<ChartValues> {
        let model_id = self.core.data.model.as_ref()?.id();
        self.core
            .data
            .values_cache
            .cached()
            .filter(|values| values.model_id == model_id)
    }

    pub fn set_values_overrider(&mut self, overrider: impl AxisValuesOverrider + 'static) {
        self.core.data.overrider = Some(Box::new(overrider));
        self.core.data.values_cache.invalidate();
    }

    pub fn clear_values_overrider(&mut self) {
        self.core.data.overrider = None;
        self.core.data.values_cache.invalidate();
    }

    /// Installs a per-dataset x step, taking precedence over the configured one.
    pub fn set_x_step_provider(&mut self, provider: impl Fn(&EntryModel) -> f64 + 'static) {
        self.core.data.x_step_provider = Some(Box::new(provider));
        self.core.data.values_cache.invalidate();
    }

    /// Attaches an axis after checking its style.
    pub fn add_axis(&mut self, axis: impl AxisRenderer + 'static) -> ChartResult<()> {
        axis.validate()?;
        self.core.parts.axes.push(Box::new(axis));
        Ok(())
    }

    pub fn clear_axes(&mut self) {
        self.core.parts.axes.clear();
    }

    pub fn add_decoration(&mut self, decoration: impl Decoration + 'static) -> ChartResult<()> {
        decoration.validate()?;
        self.core.parts.decorations.push(Box::new(decoration));
        Ok(())
    }

    /// Replaces the legend. A rejected legend leaves the current one in place.
    pub fn set_legend(&mut self, legend: impl Legend + 'static) -> ChartResult<()> {
        legend.validate()?;
        self.core.parts.legend = Some(Box::new(legend));
        Ok(())
    }

    pub fn set_marker(&mut self, marker: impl Marker + 'static) {
        self.core.parts.marker = Some(Box::new(marker));
    }

    /// Removes the marker; the touch point is dropped with it.
    pub fn clear_marker(&mut self) {
        self.core.parts.marker = None;
        self.core.session.touch_point = None;
    }

    pub fn set_marker_visibility_listener(
        &mut self,
        listener: impl MarkerVisibilityListener + 'static,
    ) {
        self.core.parts.marker_listener = Some(Box::new(listener));
    }

    /// Scrolls by `delta` pixels, cancelling a running auto-scroll.
    pub fn scroll_by(&mut self, delta: f64) -> ScrollOutcome {
        self.core.session.scroll_by_with_touch(delta)
    }

    /// Scrolls to an absolute offset, cancelling a running auto-scroll.
    pub fn scroll_to(&mut self, value: f64) -> ScrollOutcome {
        let session = &mut self.core.session;
        let outcome = session.scroll.scroll_to(value);
        session.shift_touch_point(outcome.consumed);
        outcome
    }

    #[must_use]
    pub fn scroll_value(&self) -> f64 {
        self.core.session.scroll.value()
    }

    #[must_use]
    pub fn max_scroll_value(&self) -> f64 {
        self.core.session.scroll.max_value()
    }

    #[must_use]
    pub fn is_auto_scroll_active(&self) -> bool {
        self.core.session.scroll.is_transition_active()
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.core.session.zoom.factor()
    }

    /// Drops any gesture-set zoom so the next pass fits the content again.
    pub fn reset_zoom(&mut self) {
        self.core.session.zoom.reset();
    }

    #[must_use]
    pub fn touch_point(&self) -> Option<Point> {
        self.core.session.touch_point
    }

    /// Entries highlighted by the marker during the last pass.
    #[must_use]
    pub fn marker_entries(&self) -> &[MarkerEntryModel] {
        &self.core.session.marker_entries
    }

    /// Entry index of the last click that was not dismissed.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.core.session.click_selection.previous_index()
    }

    #[must_use]
    pub fn pass_state(&self) -> DrawPassState {
        self.core.runtime.state
    }

    #[must_use]
    pub fn last_layout(&self) -> Option<&ChartLayout> {
        self.core.runtime.last_layout.as_ref()
    }
}
