//! cartesian-chart: headless engine for scrollable, zoomable cartesian charts.
//!
//! The engine resolves value ranges, lays out axes and content, tracks
//! scroll/zoom/touch state and produces backend-agnostic draw commands.
//! Drawing itself is delegated to a `Renderer` supplied by the host.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, DrawOutcome};
pub use error::{ChartError, ChartResult};
