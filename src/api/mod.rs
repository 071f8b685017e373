//! Host-facing facade: the engine, its configuration and the draw pass.

mod draw_pass;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod input_controller;
mod render_coordinator;

pub use draw_pass::{DrawOutcome, DrawPassState, DrawStats, SkipReason};
pub use engine::{ChartEngine, XStepProvider};
pub use engine_config::ChartEngineConfig;
