//! Playback cursor over a recorded step log.
//!
//! [`Playback`] is the clock-free core: it owns the log and a cursor and
//! applies run-state transitions. The timer that calls [`Playback::tick`]
//! lives in [`crate::controller`]. What gets rendered is always
//! `log[cursor]`, so seeking anywhere is safe.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlaybackConfig;
use crate::error::{Error, Result};
use crate::run_state::{RunEvent, RunState};
use crate::step_log::StepLog;

/// Outcome of one timer tick.
#[derive(Debug, PartialEq)]
pub enum Tick<'a, S> {
    /// The cursor moved; render this snapshot.
    Advanced { index: usize, snapshot: &'a S },
    /// The cursor was already on the last step; playback is now complete.
    Finished,
    /// Not running; nothing to do.
    Idle,
}

/// Playback controller for a step log.
///
/// Holds at most one log at a time. The cursor is `None` exactly when no log
/// is loaded; otherwise it always indexes a real step, so [`Playback::current`]
/// never fails while a log is present.
///
/// # Example
///
/// ```
/// use algoscope_engine::{Playback, PlaybackConfig, RunState, StepLog, Tick};
///
/// let log: StepLog<&str> = ["start", "end"].into_iter().collect();
/// let mut playback = Playback::new(PlaybackConfig::default());
/// assert_eq!(playback.start(log).unwrap(), &"start");
/// assert!(matches!(playback.tick(), Tick::Advanced { index: 1, .. }));
/// assert_eq!(playback.tick(), Tick::Finished);
/// assert_eq!(playback.state(), RunState::Completed);
/// assert_eq!(playback.progress(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Playback<S> {
    log: Option<StepLog<S>>,
    cursor: Option<usize>,
    state: RunState,
    speed: Duration,
}

impl<S> Playback<S> {
    /// Create an idle controller with no log.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            log: None,
            cursor: None,
            state: RunState::Idle,
            speed: config.speed,
        }
    }

    fn apply(&mut self, event: RunEvent) -> Result<()> {
        let next = self.state.transition(event)?;
        if next != self.state {
            debug!(from = %self.state, to = %next, "playback transition");
        }
        self.state = next;
        Ok(())
    }

    /// Load a log and start from its first step, discarding any prior run.
    ///
    /// Returns the first snapshot so it can be rendered immediately. Fails
    /// with [`Error::EmptyLog`] on a log without steps, leaving the current
    /// run untouched.
    pub fn start(&mut self, log: StepLog<S>) -> Result<&S> {
        if log.is_empty() {
            return Err(Error::EmptyLog);
        }
        self.reset();
        self.apply(RunEvent::Start)?;
        self.log = Some(log);
        self.cursor = Some(0);
        self.current().ok_or(Error::NoLog)
    }

    /// Advance one step if running.
    ///
    /// A tick made while the cursor is on the last step moves the run to
    /// [`RunState::Completed`] and returns [`Tick::Finished`]; later ticks
    /// return [`Tick::Idle`].
    pub fn tick(&mut self) -> Tick<'_, S> {
        if self.state != RunState::Running {
            return Tick::Idle;
        }
        let (Some(cursor), Some(len)) = (self.cursor, self.log.as_ref().map(StepLog::len)) else {
            return Tick::Idle;
        };

        if cursor + 1 < len {
            self.cursor = Some(cursor + 1);
            match self.current() {
                Some(snapshot) => Tick::Advanced {
                    index: cursor + 1,
                    snapshot,
                },
                None => Tick::Idle,
            }
        } else {
            // Running -> Completed is always legal
            self.state = RunState::Completed;
            debug!(steps = len, "playback completed");
            Tick::Finished
        }
    }

    /// Suspend ticking. Only legal while running; any other state yields
    /// [`Error::InvalidTransition`]. The cursor stays where it is.
    pub fn pause(&mut self) -> Result<()> {
        self.apply(RunEvent::Pause)
    }

    /// Continue ticking. Only legal while paused.
    pub fn resume(&mut self) -> Result<()> {
        self.apply(RunEvent::Resume)
    }

    /// Drop the log, clear the cursor, and return to idle.
    pub fn reset(&mut self) {
        self.log = None;
        self.cursor = None;
        if self.state != RunState::Idle {
            debug!(from = %self.state, "playback reset");
        }
        self.state = RunState::Idle;
    }

    /// Change the tick interval. Takes effect from the next tick.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    /// Move the cursor to `index`, clamped to the last step.
    ///
    /// The run state is unchanged, so a running playback keeps ticking from
    /// the new position. Fails with [`Error::NoLog`] when nothing is loaded.
    pub fn seek(&mut self, index: usize) -> Result<&S> {
        let len = self.log.as_ref().map(StepLog::len).ok_or(Error::NoLog)?;
        self.cursor = Some(index.min(len.saturating_sub(1)));
        self.current().ok_or(Error::NoLog)
    }

    /// Move one step forward without the timer. Stays put on the last step.
    pub fn step_forward(&mut self) -> Result<&S> {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.seek(next)
    }

    /// Move one step back. A running playback pauses so the timer does not
    /// immediately undo the move.
    pub fn step_backward(&mut self) -> Result<&S> {
        if self.state == RunState::Running {
            self.apply(RunEvent::Pause)?;
        }
        let prev = self.cursor.map_or(0, |c| c.saturating_sub(1));
        self.seek(prev)
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Interval between ticks.
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Cursor position, `None` when no log is loaded.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Length of the loaded log, 0 when none is loaded.
    pub fn total_steps(&self) -> usize {
        self.log.as_ref().map_or(0, StepLog::len)
    }

    /// The loaded log, if any.
    pub fn log(&self) -> Option<&StepLog<S>> {
        self.log.as_ref()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&S> {
        let cursor = self.cursor?;
        self.log.as_ref()?.get(cursor)
    }

    /// Fraction of the log shown so far (0.0 - 1.0).
    ///
    /// The first step reads as 0.0 and the last as 1.0; a one-step log is
    /// complete as soon as it starts.
    pub fn progress(&self) -> f64 {
        match (self.cursor, self.total_steps()) {
            (None, _) | (_, 0) => 0.0,
            (Some(_), 1) => 1.0,
            (Some(c), n) => c as f64 / (n - 1) as f64,
        }
    }

    /// Snapshot of the observable fields, as published to watchers.
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }
}

/// Playback status for observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: Option<usize>,
    pub total_steps: usize,
    pub state: RunState,
    pub speed_ms: u64,
    pub progress: f64,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::from(&Playback::<()>::new(PlaybackConfig::default()))
    }
}

impl<S> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            cursor: playback.cursor,
            total_steps: playback.total_steps(),
            state: playback.state,
            speed_ms: playback.speed.as_millis() as u64,
            progress: playback.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_log(count: usize) -> StepLog<usize> {
        (0..count).collect()
    }

    fn playing(count: usize) -> Playback<usize> {
        let mut playback = Playback::new(PlaybackConfig::default());
        playback.start(make_log(count)).unwrap();
        playback
    }

    #[test]
    fn starts_idle_without_log() {
        let playback: Playback<usize> = Playback::new(PlaybackConfig::default());
        assert_eq!(playback.state(), RunState::Idle);
        assert_eq!(playback.cursor(), None);
        assert_eq!(playback.current(), None);
    }

    #[test]
    fn start_renders_first_step() {
        let mut playback = Playback::new(PlaybackConfig::default());
        assert_eq!(playback.start(make_log(3)).unwrap(), &0);
        assert_eq!(playback.state(), RunState::Running);
        assert_eq!(playback.cursor(), Some(0));
    }

    #[test]
    fn start_rejects_empty_log() {
        let mut playback: Playback<usize> = Playback::new(PlaybackConfig::default());
        assert_eq!(playback.start(StepLog::new()).unwrap_err(), Error::EmptyLog);
        assert_eq!(playback.state(), RunState::Idle);
    }

    #[test]
    fn tick_advances_then_finishes() {
        let mut playback = playing(3);
        assert_eq!(playback.tick(), Tick::Advanced { index: 1, snapshot: &1 });
        assert_eq!(playback.tick(), Tick::Advanced { index: 2, snapshot: &2 });
        assert_eq!(playback.tick(), Tick::Finished);
        assert_eq!(playback.state(), RunState::Completed);
        assert_eq!(playback.cursor(), Some(2));
        assert_eq!(playback.tick(), Tick::Idle);
    }

    #[test]
    fn single_step_log_finishes_on_first_tick() {
        let mut playback = playing(1);
        assert_eq!(playback.tick(), Tick::Finished);
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn paused_playback_does_not_tick() {
        let mut playback = playing(5);
        playback.pause().unwrap();
        assert_eq!(playback.tick(), Tick::Idle);
        assert_eq!(playback.cursor(), Some(0));
        playback.resume().unwrap();
        assert!(matches!(playback.tick(), Tick::Advanced { index: 1, .. }));
    }

    #[test]
    fn pause_and_resume_guard_state() {
        let mut playback = playing(5);
        assert!(playback.resume().is_err());
        playback.pause().unwrap();
        assert!(playback.pause().is_err());

        let mut idle: Playback<usize> = Playback::new(PlaybackConfig::default());
        assert!(idle.pause().is_err());
    }

    #[test]
    fn reset_clears_everything() {
        let mut playback = playing(4);
        playback.tick();
        playback.reset();
        assert_eq!(playback.state(), RunState::Idle);
        assert_eq!(playback.cursor(), None);
        assert!(playback.log().is_none());
        playback.reset();
        assert_eq!(playback.state(), RunState::Idle);
    }

    #[test]
    fn restart_discards_prior_cursor() {
        let mut playback = playing(4);
        playback.tick();
        playback.tick();
        assert_eq!(playback.start(make_log(2)).unwrap(), &0);
        assert_eq!(playback.cursor(), Some(0));
        assert_eq!(playback.total_steps(), 2);
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let mut playback = playing(10);
        assert_eq!(playback.seek(5).unwrap(), &5);
        assert_eq!(playback.seek(100).unwrap(), &9);
        assert_eq!(playback.seek(0).unwrap(), &0);

        let mut idle: Playback<usize> = Playback::new(PlaybackConfig::default());
        assert_eq!(idle.seek(1).unwrap_err(), Error::NoLog);
    }

    #[test]
    fn step_backward_pauses() {
        let mut playback = playing(5);
        playback.tick();
        playback.tick();
        assert_eq!(playback.step_backward().unwrap(), &1);
        assert_eq!(playback.state(), RunState::Paused);
        assert_eq!(playback.step_forward().unwrap(), &2);
    }

    #[test]
    fn speed_change_keeps_cursor() {
        let mut playback = playing(5);
        playback.tick();
        playback.set_speed(Duration::from_millis(10));
        assert_eq!(playback.cursor(), Some(1));
        assert_eq!(playback.speed(), Duration::from_millis(10));
    }

    #[test]
    fn progress_calculation() {
        let mut playback = playing(5);
        assert_eq!(playback.progress(), 0.0);
        playback.seek(2).unwrap();
        assert_eq!(playback.progress(), 0.5);
        playback.seek(4).unwrap();
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn status_conversion() {
        let mut playback = playing(10);
        playback.seek(3).unwrap();
        playback.set_speed(Duration::from_millis(250));

        let status: PlaybackStatus = (&playback).into();
        assert_eq!(status.cursor, Some(3));
        assert_eq!(status.total_steps, 10);
        assert_eq!(status.state, RunState::Running);
        assert_eq!(status.speed_ms, 250);
    }
}
