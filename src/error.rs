use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("degenerate x step {x_step}: the dataset needs a positive, finite x step")]
    DegenerateXStep { x_step: f64 },

    #[error("entry x={x} is not aligned to min_x={min_x} + k * x_step={x_step}")]
    MisalignedEntry { x: f64, min_x: f64, x_step: f64 },

    #[error("composed child #{child} has x step {found}, expected {expected}")]
    XStepMismatch {
        child: usize,
        expected: f64,
        found: f64,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("input queue is closed: the chart engine was dropped")]
    InputQueueClosed,
}
