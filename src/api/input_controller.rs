use tracing::trace;

use crate::interaction::{InputEvent, InputSender, max_scroll_distance};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Sending half of the input queue, for hosts that deliver gestures from
    /// other threads or callbacks.
    #[must_use]
    pub fn input_sender(&self) -> InputSender {
        self.core.session.input.sender()
    }

    /// Queues `event` for the next draw pass.
    pub fn push_event(&mut self, event: InputEvent) {
        self.core.session.input.push(event);
    }

    /// Applies every queued event, in arrival order.
    pub(super) fn drain_input(&mut self) {
        for event in self.core.session.input.drain() {
            self.apply_input_event(event);
        }
    }

    fn apply_input_event(&mut self, event: InputEvent) {
        let scroll_enabled = self.core.config.scroll.is_scroll_enabled;
        let marker_enabled = self.core.parts.marker.is_some();
        let session = &mut self.core.session;
        match event {
            InputEvent::TouchDown { point } | InputEvent::TouchMove { point } => {
                if marker_enabled {
                    session.touch_point = Some(point);
                }
            }
            InputEvent::TouchUp => session.touch_point = None,
            InputEvent::Click { point } => {
                if marker_enabled {
                    session.touch_point = Some(point);
                    session.pending_click = true;
                }
            }
            InputEvent::Pinch { centroid, scale } => {
                if !self.core.config.zoom.is_zoom_enabled || !scroll_enabled {
                    return;
                }
                let (Some(layout), Some(values)) = (
                    self.core.runtime.last_layout.as_ref(),
                    self.core.data.values_cache.cached(),
                ) else {
                    return;
                };
                let bounds = layout.content_bounds;
                if !bounds.contains(centroid) {
                    trace!(?centroid, "pinch centroid outside content bounds");
                    return;
                }
                let Some(delta) = session.zoom.on_zoom_gesture(
                    centroid.x,
                    scale,
                    session.scroll.value(),
                    bounds.left,
                ) else {
                    return;
                };
                session.scroll.set_max_value(max_scroll_distance(
                    &layout.dimensions,
                    &values,
                    bounds,
                    session.zoom.factor(),
                ));
                session.scroll_by_with_touch(delta);
            }
            InputEvent::ScrollBy { delta } => {
                if scroll_enabled {
                    session.scroll_by_with_touch(delta);
                }
            }
            InputEvent::ScrollTo { value } => {
                if scroll_enabled {
                    let outcome = session.scroll.scroll_to(value);
                    session.shift_touch_point(outcome.consumed);
                }
            }
            InputEvent::DismissMarker => {
                session.touch_point = None;
                session.click_selection.clear();
            }
        }
    }
}
