pub mod dimensions;
pub mod entry;
pub mod layout;
pub mod types;
pub mod values;

pub use dimensions::{
    DimensionContribution, HorizontalDimensions, HorizontalDimensionsAccumulator, HorizontalLayout,
};
pub use entry::{Entry, EntryModel, X_STEP_EPSILON};
pub use layout::{AxisMeasurement, AxisPosition, ChartLayout, EmptyLayout, VirtualLayout};
pub use types::{Point, Rect, Viewport};
pub use values::{
    ALIGNMENT_EPSILON, AxisValuesOverride, AxisValuesOverrider, ChartValues, ChartValuesCache,
};
