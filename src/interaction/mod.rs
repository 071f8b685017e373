mod hit;
mod input;
mod marker_state;
mod scroll;
mod zoom;

pub use hit::{ClickSelection, EntryLocationMap, MarkerEntries, MarkerEntryModel};
pub use input::{InputEvent, InputQueue, InputSender};
pub use marker_state::{MarkerTransition, MarkerVisibilityListener, MarkerVisibilityTracker};
pub use scroll::{
    AutoScrollCondition, ChartScrollSpec, InitialScroll, ScrollOutcome, ScrollState,
};
pub use zoom::{
    AutoScaleUp, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ZoomConfig, ZoomState, max_scroll_distance,
};
