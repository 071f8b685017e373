use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

/// Where the scroll position lands for a new dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InitialScroll {
    Start,
    End,
    /// Absolute scroll offset in pixels, clamped to the scroll extent.
    Value(f64),
}

impl InitialScroll {
    #[must_use]
    pub fn target(self, max_value: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::End => max_value,
            Self::Value(value) => value.clamp(0.0, max_value),
        }
    }
}

/// When a dataset change triggers an animated auto-scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoScrollCondition {
    Never,
    /// The resolved value range differs from the previous dataset's.
    OnModelChanged,
    /// The new dataset has more entries than the previous one.
    OnModelSizeIncreased,
}

/// Scrolling-related settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScrollSpec {
    #[serde(default = "default_true")]
    pub is_scroll_enabled: bool,
    #[serde(default = "default_initial_scroll")]
    pub initial_scroll: InitialScroll,
    #[serde(default = "default_auto_scroll")]
    pub auto_scroll: InitialScroll,
    #[serde(default = "default_auto_scroll_condition")]
    pub auto_scroll_condition: AutoScrollCondition,
    #[serde(default = "default_auto_scroll_duration_secs")]
    pub auto_scroll_duration_secs: f64,
}

impl Default for ChartScrollSpec {
    fn default() -> Self {
        Self {
            is_scroll_enabled: true,
            initial_scroll: default_initial_scroll(),
            auto_scroll: default_auto_scroll(),
            auto_scroll_condition: default_auto_scroll_condition(),
            auto_scroll_duration_secs: default_auto_scroll_duration_secs(),
        }
    }
}

impl ChartScrollSpec {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        if !self.auto_scroll_duration_secs.is_finite() || self.auto_scroll_duration_secs < 0.0 {
            return Err(ChartError::InvalidConfig(
                "auto-scroll duration must be finite and >= 0".to_owned(),
            ));
        }
        for policy in [self.initial_scroll, self.auto_scroll] {
            if let InitialScroll::Value(value) = policy {
                if !value.is_finite() {
                    return Err(ChartError::InvalidConfig(
                        "scroll value must be finite".to_owned(),
                    ));
                }
            }
        }
        Ok(self)
    }

    /// Whether a dataset change from `previous_entry_count` should auto-scroll.
    #[must_use]
    pub fn should_auto_scroll(
        &self,
        values_changed: bool,
        previous_entry_count: usize,
        entry_count: usize,
    ) -> bool {
        if !self.is_scroll_enabled || !values_changed {
            return false;
        }
        match self.auto_scroll_condition {
            AutoScrollCondition::Never => false,
            AutoScrollCondition::OnModelChanged => true,
            AutoScrollCondition::OnModelSizeIncreased => entry_count > previous_entry_count,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_initial_scroll() -> InitialScroll {
    InitialScroll::Start
}

fn default_auto_scroll() -> InitialScroll {
    InitialScroll::End
}

fn default_auto_scroll_condition() -> AutoScrollCondition {
    AutoScrollCondition::OnModelChanged
}

fn default_auto_scroll_duration_secs() -> f64 {
    0.3
}

/// Result of one scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOutcome {
    /// Change actually applied to the scroll value.
    pub consumed: f64,
    /// Part of the requested delta swallowed by clamping.
    pub unconsumed: f64,
}

/// Animated move of the scroll value towards a target policy.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollTransition {
    from: f64,
    target: InitialScroll,
    elapsed_secs: f64,
    duration_secs: f64,
}

/// Horizontal scroll position of one chart instance.
///
/// `value` stays within `[0, max_value]` at all times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollState {
    value: f64,
    max_value: f64,
    initial_scroll_version: Option<u64>,
    transition: Option<ScrollTransition>,
}

impl ScrollState {
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Adds `delta` with clamping and returns how much was consumed.
    ///
    /// Cancels an in-flight auto-scroll transition.
    pub fn scroll_by(&mut self, delta: f64) -> ScrollOutcome {
        self.cancel_transition();
        self.apply_delta(delta)
    }

    /// Moves to an absolute offset with clamping.
    ///
    /// Cancels an in-flight auto-scroll transition.
    pub fn scroll_to(&mut self, value: f64) -> ScrollOutcome {
        self.cancel_transition();
        self.apply_delta(value - self.value)
    }

    /// Updates the scroll extent, pulling the current value down if needed.
    pub fn set_max_value(&mut self, max_value: f64) {
        self.max_value = if max_value.is_finite() {
            max_value.max(0.0)
        } else {
            0.0
        };
        if self.value > self.max_value {
            self.value = self.max_value;
        }
    }

    /// Applies `policy` the first time it is called for dataset `version`.
    ///
    /// Returns whether the scroll value was set.
    pub fn handle_initial_scroll(&mut self, policy: InitialScroll, version: u64) -> bool {
        if self.initial_scroll_version == Some(version) {
            return false;
        }
        self.initial_scroll_version = Some(version);
        self.cancel_transition();
        self.value = policy.target(self.max_value);
        trace!(version, value = self.value, "applied initial scroll");
        true
    }

    /// Records `version` as handled without moving.
    pub fn mark_initial_scroll_handled(&mut self, version: u64) {
        self.initial_scroll_version = Some(version);
    }

    /// Schedules an animated scroll towards `target`, replacing any running one.
    ///
    /// A zero duration jumps immediately.
    pub fn start_transition(&mut self, target: InitialScroll, duration_secs: f64) {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            self.transition = None;
            let target_value = target.target(self.max_value);
            self.apply_delta(target_value - self.value);
            return;
        }
        debug!(from = self.value, ?target, duration_secs, "start auto-scroll transition");
        self.transition = Some(ScrollTransition {
            from: self.value,
            target,
            elapsed_secs: 0.0,
            duration_secs,
        });
    }

    /// Drops a running transition. Returns whether one was active.
    pub fn cancel_transition(&mut self) -> bool {
        let was_active = self.transition.take().is_some();
        if was_active {
            debug!(value = self.value, "cancelled auto-scroll transition");
        }
        was_active
    }

    #[must_use]
    pub fn is_transition_active(&self) -> bool {
        self.transition.is_some()
    }

    /// Advances the running transition by `delta_seconds`.
    ///
    /// Returns `None` when no transition is active.
    pub fn step_transition(&mut self, delta_seconds: f64) -> Option<ScrollOutcome> {
        let mut transition = self.transition?;
        transition.elapsed_secs += delta_seconds.max(0.0);
        let progress = (transition.elapsed_secs / transition.duration_secs).clamp(0.0, 1.0);
        let to = transition.target.target(self.max_value);
        let next = transition.from + (to - transition.from) * ease_in_out_cubic(progress);

        let outcome = self.apply_delta(next - self.value);
        self.transition = (progress < 1.0).then_some(transition);
        Some(outcome)
    }

    fn apply_delta(&mut self, delta: f64) -> ScrollOutcome {
        if !delta.is_finite() {
            return ScrollOutcome::default();
        }
        let target = self.value + delta;
        let clamped = target.clamp(0.0, self.max_value);
        let consumed = clamped - self.value;
        self.value = clamped;
        ScrollOutcome {
            consumed,
            unconsumed: delta - consumed,
        }
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartScrollSpec, InitialScroll, ScrollState};

    fn state(max: f64) -> ScrollState {
        let mut state = ScrollState::default();
        state.set_max_value(max);
        state
    }

    #[test]
    fn scroll_by_reports_unconsumed_remainder() {
        let mut scroll = state(100.0);
        let outcome = scroll.scroll_by(130.0);
        assert_eq!(scroll.value(), 100.0);
        assert_eq!(outcome.consumed, 100.0);
        assert_eq!(outcome.unconsumed, 30.0);

        let outcome = scroll.scroll_by(-250.0);
        assert_eq!(scroll.value(), 0.0);
        assert_eq!(outcome.unconsumed, -150.0);
    }

    #[test]
    fn shrinking_max_clamps_value() {
        let mut scroll = state(300.0);
        scroll.scroll_by(150.0);
        scroll.set_max_value(200.0);
        assert_eq!(scroll.value(), 150.0);
        scroll.set_max_value(120.0);
        assert_eq!(scroll.value(), 120.0);
    }

    #[test]
    fn initial_scroll_runs_once_per_version() {
        let mut scroll = state(80.0);
        assert!(scroll.handle_initial_scroll(InitialScroll::End, 1));
        assert_eq!(scroll.value(), 80.0);
        scroll.scroll_to(10.0);
        assert!(!scroll.handle_initial_scroll(InitialScroll::End, 1));
        assert_eq!(scroll.value(), 10.0);
        assert!(scroll.handle_initial_scroll(InitialScroll::Value(500.0), 2));
        assert_eq!(scroll.value(), 80.0);
    }

    #[test]
    fn transition_reaches_target_and_stops() {
        let mut scroll = state(200.0);
        scroll.start_transition(InitialScroll::End, 0.5);
        let mut steps = 0;
        while scroll.step_transition(0.125).is_some() {
            steps += 1;
            assert!(scroll.value() >= 0.0 && scroll.value() <= 200.0);
        }
        assert_eq!(steps, 4);
        assert!((scroll.value() - 200.0).abs() <= 1e-9);
        assert!(!scroll.is_transition_active());
    }

    #[test]
    fn gesture_scroll_cancels_transition() {
        let mut scroll = state(200.0);
        scroll.start_transition(InitialScroll::End, 1.0);
        scroll.step_transition(0.25);
        scroll.scroll_by(-5.0);
        assert!(!scroll.is_transition_active());
        assert_eq!(scroll.step_transition(0.25), None);
    }

    #[test]
    fn auto_scroll_condition_gates_on_change_and_growth() {
        let mut spec = ChartScrollSpec::default();
        assert!(spec.should_auto_scroll(true, 3, 3));
        assert!(!spec.should_auto_scroll(false, 3, 4));

        spec.auto_scroll_condition = super::AutoScrollCondition::OnModelSizeIncreased;
        assert!(!spec.should_auto_scroll(true, 3, 3));
        assert!(spec.should_auto_scroll(true, 3, 4));

        spec.is_scroll_enabled = false;
        assert!(!spec.should_auto_scroll(true, 3, 4));
    }
}
