use tracing::debug;

use crate::chart::Chart;
use crate::error::ChartResult;
use crate::interaction::ZoomState;
use crate::render::Renderer;

use super::{
    ChartEngine, ChartEngineConfig,
    engine_core::{ChartParts, DataState, EngineCore, InteractionSession, PassRuntime},
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine for `chart` with a validated `config`.
    ///
    /// The surface size is not checked here: it is read from the renderer at
    /// every pass and a zero-sized surface only skips that pass.
    pub fn new(
        renderer: R,
        chart: impl Into<Chart>,
        config: ChartEngineConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let chart = chart.into();
        chart.validate()?;

        let session = InteractionSession {
            zoom: ZoomState::new(config.zoom),
            ..InteractionSession::default()
        };
        debug!(
            horizontal_layout = ?config.horizontal_layout,
            scroll_enabled = config.scroll.is_scroll_enabled,
            zoom_enabled = config.zoom.is_zoom_enabled,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                data: DataState::new(&config),
                config,
                chart,
                parts: ChartParts::default(),
                session,
                runtime: PassRuntime::default(),
            },
        })
    }
}
