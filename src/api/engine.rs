use crate::core::EntryModel;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{DrawOutcome, engine_core::EngineCore, render_coordinator::RenderCoordinator};

/// Per-dataset x step, consulted before the configured step.
pub type XStepProvider = Box<dyn Fn(&EntryModel) -> f64>;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the chart variant, the current dataset, the
/// scroll/zoom/touch session and the pluggable axes, legend, decorations and
/// marker. Each `render` call runs one atomic draw pass against the
/// renderer's current surface size.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    /// Runs one draw pass.
    ///
    /// Queued input is applied first. Empty layouts are reported as
    /// `DrawOutcome::Skipped` and leave the renderer untouched.
    pub fn render(&mut self) -> ChartResult<DrawOutcome> {
        RenderCoordinator::render(self)
    }

    /// Advances the auto-scroll transition by the host frame clock.
    ///
    /// Returns whether a transition is still running afterwards.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let session = &mut self.core.session;
        if let Some(outcome) = session.scroll.step_transition(delta_seconds) {
            session.shift_touch_point(outcome.consumed);
        }
        session.scroll.is_transition_active()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
