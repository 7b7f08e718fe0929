//! Timers and timing modes for durational actions.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use vignette_core::ActionError;

/// How time flows across an action's duration.
///
/// Every mode increases monotonically from zero to the duration, so time never
/// flows backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    #[default]
    Linear,
    /// Slow start, quick end (sine easing)
    EaseIn,
    /// Quick start, slow end (sine easing)
    EaseOut,
    EaseInEaseOut,
}

impl TimingMode {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingMode::Linear => t,
            TimingMode::EaseIn => 1.0 - (t * FRAC_PI_2).cos(),
            TimingMode::EaseOut => (t * FRAC_PI_2).sin(),
            TimingMode::EaseInEaseOut => 0.5 - 0.5 * (t * PI).cos(),
        }
    }
}

/// Result of advancing an action by some incremental time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Progress {
    Running,
    /// Completed, with the part of the incremental time it did not use.
    /// Leftover is in the caller's time frame.
    Finished { leftover: f64 },
}

impl Progress {
    pub(crate) fn is_running(self) -> bool {
        matches!(self, Progress::Running)
    }
}

/// Elapsed time against a fixed duration.
///
/// Elapsed time never exceeds the duration; decoding a timer that claims
/// otherwise fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimerState")]
pub struct Timer {
    duration: f64,
    elapsed: f64,
    speed: f64,
    timing_mode: TimingMode,
}

impl Timer {
    /// A linear timer at normal speed. Negative or non-finite durations become zero.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: non_negative(duration),
            elapsed: 0.0,
            speed: 1.0,
            timing_mode: TimingMode::Linear,
        }
    }

    pub fn with_timing_mode(mut self, timing_mode: TimingMode) -> Self {
        self.timing_mode = timing_mode;
        self
    }

    /// Scale incremental time; negative speeds are treated as zero.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = non_negative(speed);
    }

    pub fn set_timing_mode(&mut self, timing_mode: TimingMode) {
        self.timing_mode = timing_mode;
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Linear elapsed time, in the action's own time frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed time after the timing mode is applied.
    pub fn eased_elapsed(&self) -> f64 {
        self.progress() * self.duration
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn timing_mode(&self) -> TimingMode {
        self.timing_mode
    }

    /// Eased fraction of the duration elapsed. A zero duration is always complete.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.timing_mode.apply(self.elapsed / self.duration)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub(crate) fn advance(&mut self, dt: f64) -> Progress {
        let dt = non_negative(dt);
        let remaining = self.duration - self.elapsed;
        let scaled = dt * self.speed;
        if scaled >= remaining {
            self.elapsed = self.duration;
            let leftover = if self.speed > 0.0 { (scaled - remaining) / self.speed } else { dt };
            Progress::Finished { leftover }
        } else {
            self.elapsed += scaled;
            Progress::Running
        }
    }
}

/// Negative, NaN and infinite inputs become zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
struct TimerState {
    duration: f64,
    #[serde(default)]
    elapsed: f64,
    #[serde(default = "default_speed")]
    speed: f64,
    #[serde(default)]
    timing_mode: TimingMode,
}

fn default_speed() -> f64 {
    1.0
}

impl TryFrom<TimerState> for Timer {
    type Error = ActionError;

    fn try_from(state: TimerState) -> Result<Self, Self::Error> {
        let invalid = |reason: String| Err(ActionError::InvalidState { reason });
        if !state.duration.is_finite() || state.duration < 0.0 {
            return invalid(format!("duration {} must be finite and non-negative", state.duration));
        }
        if !state.elapsed.is_finite() || state.elapsed < 0.0 {
            return invalid(format!("elapsed time {} must be finite and non-negative", state.elapsed));
        }
        if state.elapsed > state.duration {
            return invalid(format!("elapsed time {} exceeds duration {}", state.elapsed, state.duration));
        }
        if !state.speed.is_finite() || state.speed < 0.0 {
            return invalid(format!("speed {} must be finite and non-negative", state.speed));
        }
        Ok(Timer {
            duration: state.duration,
            elapsed: state.elapsed,
            speed: state.speed,
            timing_mode: state.timing_mode,
        })
    }
}
