//! Run-state machine shared by live runs and step-log playback.
//!
//! ```text
//! Idle --start--> Running --naturalEnd--> Completed --restart--> Idle
//!                 Running <--pause/resume--> Paused
//!                 Running | Paused --stop--> Idle
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle state of one visualizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Nothing running. Initial state and the state after an abort.
    #[default]
    Idle,
    /// Frames are being produced.
    Running,
    /// Suspended; resumable.
    Paused,
    /// Reached the natural end.
    Completed,
    /// The requested algorithm has no implementation.
    Unavailable,
}

/// Events that drive [`RunState`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunEvent {
    Start,
    Pause,
    Resume,
    NaturalEnd,
    Stop,
    Restart,
    Unavailable,
}

impl RunState {
    /// Apply an event, returning the next state or an error for illegal moves.
    ///
    /// `Stop` is accepted everywhere so that stopping twice is harmless.
    /// `Restart` from `Idle` is a no-op for the same reason.
    pub fn transition(self, event: RunEvent) -> Result<RunState> {
        use RunEvent as E;
        use RunState as S;

        let next = match (self, event) {
            (S::Idle, E::Start) => S::Running,
            (S::Running, E::Pause) => S::Paused,
            (S::Paused, E::Resume) => S::Running,
            (S::Running, E::NaturalEnd) => S::Completed,
            (_, E::Stop) => S::Idle,
            (S::Completed | S::Unavailable | S::Idle, E::Restart) => S::Idle,
            (S::Idle | S::Completed | S::Unavailable, E::Unavailable) => S::Unavailable,
            (from, event) => return Err(Error::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// Whether frames may still be produced in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }

    /// Whether this state ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Unavailable)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::NaturalEnd => "natural end",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}
