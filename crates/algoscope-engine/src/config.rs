//! Pacing configuration for live runs and playback.

use std::time::Duration;

/// Default wait slice for the cooperative delay.
pub const DEFAULT_SLICE: Duration = Duration::from_millis(50);

/// Default delay between live frames.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(30);

/// Default time per playback tick.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);

/// Configuration for a live instrumented run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveConfig {
    /// Nominal pause after each rendered step.
    pub delay: Duration,
    /// Longest single sleep; bounds how late stop and pause are noticed.
    pub slice: Duration,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            slice: DEFAULT_SLICE,
        }
    }
}

impl LiveConfig {
    /// Config with the given per-step delay in milliseconds.
    pub fn from_millis(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the wait slice. A zero slice falls back to [`DEFAULT_SLICE`].
    #[must_use]
    pub fn with_slice(mut self, slice: Duration) -> Self {
        self.slice = if slice.is_zero() { DEFAULT_SLICE } else { slice };
        self
    }

    /// The delay scaled by `factor`, e.g. `0.5` for a half step.
    pub fn scaled_delay(&self, factor: f64) -> Duration {
        self.delay.mul_f64(factor.max(0.0))
    }
}

/// Configuration for step-log playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Time between ticks.
    pub speed: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }
}

impl PlaybackConfig {
    pub fn from_millis(speed_ms: u64) -> Self {
        Self {
            speed: Duration::from_millis(speed_ms),
        }
    }
}
