//! Controllers for live instrumented runs.
//!
//! [`LiveController`] owns the run state and token pair of one visualizer
//! instance and serializes runs against each other. [`LiveRun`] is the
//! lighter building block: spawn one algorithm with a channel sink and read
//! its frames back in order.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::LiveConfig;
use crate::error::Result;
use crate::frame::{Instrument, LiveFrame};
use crate::run_state::{RunEvent, RunState};
use crate::tokens::CancellationTokens;

/// Applies `event` to the shared state, returning the new state.
fn apply(state: &watch::Sender<RunState>, event: RunEvent) -> Result<RunState> {
    let mut outcome = Ok(RunState::Idle);
    state.send_if_modified(|current| match current.transition(event) {
        Ok(next) => {
            let changed = next != *current;
            if changed {
                debug!(from = %current, to = %next, %event, "run transition");
            }
            *current = next;
            outcome = Ok(next);
            changed
        }
        Err(e) => {
            outcome = Err(e);
            false
        }
    });
    outcome
}

/// Run-state owner for one visualizer instance.
///
/// Starting a new run always stops the previous one, waits for it to
/// return, and hands the new run a fresh token pair. A stale stop flag can
/// therefore never leak into the next run.
pub struct LiveController {
    state: Arc<watch::Sender<RunState>>,
    tokens: CancellationTokens,
    task: Option<JoinHandle<bool>>,
}

impl Default for LiveController {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveController {
    /// Create an idle controller. Nothing runs until [`LiveController::start`].
    pub fn new() -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        Self {
            state: Arc::new(state),
            tokens: CancellationTokens::new(),
            task: None,
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Watch channel that sees every run-state change, including the
    /// natural end published from the run's task.
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Tokens of the current (or most recent) run.
    pub fn tokens(&self) -> &CancellationTokens {
        &self.tokens
    }

    /// Start a run. `run` receives the run's tokens and resolves to `true`
    /// on natural completion, `false` when it observed a stop.
    ///
    /// Any previous run is stopped and awaited first, and a finished or
    /// unavailable controller is restarted, so this never fails from a
    /// settled state. The future is spawned on the current tokio runtime.
    pub async fn start<F, Fut>(&mut self, run: F) -> Result<()>
    where
        F: FnOnce(CancellationTokens) -> Fut,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.stop().await;
        if self.state().is_terminal() {
            apply(&self.state, RunEvent::Restart)?;
        }

        self.tokens = CancellationTokens::new();
        apply(&self.state, RunEvent::Start)?;

        let tokens = self.tokens.clone();
        let state = Arc::clone(&self.state);
        let run = run(self.tokens.clone());
        self.task = Some(tokio::spawn(async move {
            let completed = run.await;
            if completed && !tokens.is_stop_requested() {
                // A pause that lands after the last checkpoint still ends the run
                if *state.borrow() == RunState::Paused {
                    let _ = apply(&state, RunEvent::Resume);
                }
                if let Err(e) = apply(&state, RunEvent::NaturalEnd) {
                    warn!(error = %e, "run finished in unexpected state");
                }
            }
            completed
        }));
        Ok(())
    }

    /// Suspend the current run at its next checkpoint.
    ///
    /// Only legal while running; otherwise
    /// [`crate::Error::InvalidTransition`] is returned and the tokens are left
    /// alone.
    pub fn pause(&self) -> Result<()> {
        apply(&self.state, RunEvent::Pause)?;
        self.tokens.request_pause();
        Ok(())
    }

    /// Let a paused run continue. Only legal while paused.
    pub fn resume(&self) -> Result<()> {
        apply(&self.state, RunEvent::Resume)?;
        self.tokens.clear_pause();
        Ok(())
    }

    /// Abort the current run and wait for it to return. Calling this with
    /// nothing running, or twice in a row, is a no-op.
    pub async fn stop(&mut self) {
        self.tokens.request_stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "live run ended abnormally");
            }
        }
        if self.state().is_active() {
            let _ = apply(&self.state, RunEvent::Stop);
        }
    }

    /// Wait for the current run to return on its own.
    ///
    /// Returns `None` if nothing was running, otherwise whether the run
    /// completed naturally.
    pub async fn wait(&mut self) -> Option<bool> {
        let task = self.task.take()?;
        match task.await {
            Ok(completed) => Some(completed),
            Err(e) => {
                warn!(error = %e, "live run ended abnormally");
                Some(false)
            }
        }
    }

    /// Record that the requested algorithm has no implementation.
    ///
    /// Stops anything still running, then moves to
    /// [`RunState::Unavailable`] until the next [`LiveController::start`].
    pub async fn mark_unavailable(&mut self) -> Result<()> {
        self.stop().await;
        apply(&self.state, RunEvent::Unavailable)?;
        Ok(())
    }
}

impl Drop for LiveController {
    fn drop(&mut self) {
        self.tokens.request_stop();
    }
}

/// A spawned live algorithm whose frames arrive over a channel.
pub struct LiveRun<T> {
    frames: mpsc::UnboundedReceiver<LiveFrame<T>>,
    tokens: CancellationTokens,
    task: JoinHandle<bool>,
}

impl<T> LiveRun<T>
where
    T: Send + 'static,
{
    /// Spawn `run` with an instrument that sends frames to this handle.
    pub fn spawn<F, Fut>(config: LiveConfig, tokens: CancellationTokens, run: F) -> Self
    where
        F: FnOnce(Instrument<mpsc::UnboundedSender<LiveFrame<T>>>) -> Fut,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let (tx, frames) = mpsc::unbounded_channel();
        let instrument = Instrument::new(tx, tokens.clone(), config);
        let task = tokio::spawn(run(instrument));
        Self {
            frames,
            tokens,
            task,
        }
    }

    pub fn tokens(&self) -> &CancellationTokens {
        &self.tokens
    }

    /// Next frame, or `None` once the run has returned and all frames are read.
    pub async fn next_frame(&mut self) -> Option<LiveFrame<T>> {
        self.frames.recv().await
    }

    /// Read every frame, then return the run's outcome with them.
    pub async fn collect(mut self) -> (bool, Vec<LiveFrame<T>>) {
        let mut frames = Vec::new();
        while let Some(frame) = self.frames.recv().await {
            frames.push(frame);
        }
        let completed = match self.task.await {
            Ok(completed) => completed,
            Err(e) => {
                warn!(error = %e, "live run ended abnormally");
                false
            }
        };
        (completed, frames)
    }
}
