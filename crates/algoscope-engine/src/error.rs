//! Error types for algoscope-engine.
//!
//! Cancellation is not an error: it is reported through the `bool`
//! continue-flag of the delay primitive and the live runners.

use thiserror::Error;

use crate::run_state::{RunEvent, RunState};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by misuse of the run-state machine or playback controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The event is not legal in the current state.
    #[error("cannot {event} while {from}")]
    InvalidTransition { from: RunState, event: RunEvent },

    /// A playback action needs a loaded step log.
    #[error("no step log loaded")]
    NoLog,

    /// Playback cannot start on a log without steps.
    #[error("step log is empty")]
    EmptyLog,

    /// The playback task has shut down.
    #[error("playback controller has shut down")]
    ControllerClosed,
}
