//! Working-state recorder shared by the generators.

use algoscope_engine::{Snapshot, StepLog};
use tracing::trace;

/// A snapshot whose description can be replaced before it is recorded.
pub(crate) trait Annotate: Snapshot {
    fn annotate(&mut self, description: String);
}

/// Holds the mutable working state and appends a deep copy of it on every
/// [`record`](Recorder::record). Recorded steps are never revisited.
pub(crate) struct Recorder<S> {
    pub(crate) state: S,
    steps: StepLog<S>,
}

impl<S: Annotate> Recorder<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            steps: StepLog::new(),
        }
    }

    pub(crate) fn record(&mut self, description: impl Into<String>) {
        self.state.annotate(description.into());
        trace!(step = self.steps.len(), description = self.state.description(), "record");
        self.steps.push(self.state.clone());
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    pub(crate) fn finish(self) -> StepLog<S> {
        self.steps
    }
}
