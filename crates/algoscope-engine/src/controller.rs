//! Timer-driven playback controller.
//!
//! [`PlaybackController`] is a handle to a task that owns a [`Playback`] and
//! a frame sink. Commands arrive over a channel and are applied between
//! ticks, so a tick and a command never interleave. Status is published on
//! a watch channel after every change.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use crate::config::PlaybackConfig;
use crate::error::{Error, Result};
use crate::frame::FrameSink;
use crate::playback::{Playback, PlaybackStatus, Tick};
use crate::run_state::RunState;
use crate::step_log::StepLog;

const COMMAND_BUFFER: usize = 32;

/// One rendered playback step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackFrame<S> {
    /// Cursor position of `snapshot` in the log.
    pub index: usize,
    pub total: usize,
    pub snapshot: S,
}

enum Action<S> {
    Start(StepLog<S>, Duration),
    Pause,
    Resume,
    Reset,
    SetSpeed(Duration),
    Seek(usize),
    StepForward,
    StepBackward,
}

struct Command<S> {
    action: Action<S>,
    reply: oneshot::Sender<Result<()>>,
}

/// Handle to a running playback task.
///
/// Every command waits for the task to apply it and returns the task's
/// verdict: an illegal transition comes back as [`Error::InvalidTransition`],
/// a command sent after the task ended as [`Error::ControllerClosed`].
///
/// Dropping the handle closes the command channel, which ends the task.
pub struct PlaybackController<S> {
    commands: mpsc::Sender<Command<S>>,
    status: watch::Receiver<PlaybackStatus>,
    task: JoinHandle<()>,
}

impl<S> PlaybackController<S>
where
    S: Clone + Send + 'static,
{
    /// Spawn the playback task. Frames go to `sink` in cursor order.
    pub fn spawn<K>(config: PlaybackConfig, sink: K) -> Self
    where
        K: FrameSink<PlaybackFrame<S>> + Send + 'static,
    {
        let playback = Playback::new(config);
        let (status_tx, status_rx) = watch::channel(playback.status());
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);

        let actor = Actor {
            playback,
            sink,
            deadline: None,
            status: status_tx,
        };
        let task = tokio::spawn(actor.run(rx));

        Self {
            commands,
            status: status_rx,
            task,
        }
    }

    async fn send(&self, action: Action<S>) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .await
            .map_err(|_| Error::ControllerClosed)?;
        rx.await.map_err(|_| Error::ControllerClosed)?
    }

    /// Discard any prior log, render `log[0]`, and tick every `speed`.
    ///
    /// An empty log is refused with [`Error::EmptyLog`].
    pub async fn start(&self, log: StepLog<S>, speed: Duration) -> Result<()> {
        self.send(Action::Start(log, speed)).await
    }

    /// Disarm the timer, keeping the cursor. Only legal while running.
    pub async fn pause(&self) -> Result<()> {
        self.send(Action::Pause).await
    }

    /// Re-arm the timer one interval from now. Only legal while paused.
    pub async fn resume(&self) -> Result<()> {
        self.send(Action::Resume).await
    }

    /// Stop ticking, drop the log, return to idle.
    pub async fn reset(&self) -> Result<()> {
        self.send(Action::Reset).await
    }

    /// Change the tick interval. While running, the next tick is re-armed
    /// at `now + speed`.
    pub async fn set_speed(&self, speed: Duration) -> Result<()> {
        self.send(Action::SetSpeed(speed)).await
    }

    /// Jump to `index` (clamped) and render it.
    pub async fn seek(&self, index: usize) -> Result<()> {
        self.send(Action::Seek(index)).await
    }

    /// Render the next step, without touching the timer.
    pub async fn step_forward(&self) -> Result<()> {
        self.send(Action::StepForward).await
    }

    /// Render the previous step. A running playback is paused first.
    pub async fn step_backward(&self) -> Result<()> {
        self.send(Action::StepBackward).await
    }

    /// Latest published status.
    pub fn status(&self) -> PlaybackStatus {
        self.status.borrow().clone()
    }

    /// Watch channel that sees every status change.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.clone()
    }

    /// Wait until the playback reaches `state`.
    ///
    /// Returns at once if it is already there. Fails with
    /// [`Error::ControllerClosed`] if the task ends first.
    pub async fn wait_for(&self, state: RunState) -> Result<PlaybackStatus> {
        let mut rx = self.status.clone();
        let status = rx
            .wait_for(|s| s.state == state)
            .await
            .map_err(|_| Error::ControllerClosed)?;
        Ok(status.clone())
    }

    /// Close the command channel and wait for the task to finish.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            warn!(error = %e, "playback task ended abnormally");
        }
    }
}

struct Actor<S, K> {
    playback: Playback<S>,
    sink: K,
    deadline: Option<Instant>,
    status: watch::Sender<PlaybackStatus>,
}

impl<S, K> Actor<S, K>
where
    S: Clone,
    K: FrameSink<PlaybackFrame<S>>,
{
    async fn run(mut self, mut commands: mpsc::Receiver<Command<S>>) {
        debug!("playback task started");
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(Command { action, reply }) = command else {
                        break;
                    };
                    let result = self.apply(action);
                    if let Err(e) = &result {
                        warn!(error = %e, "playback command rejected");
                    }
                    self.publish();
                    let _ = reply.send(result);
                }
                _ = sleep_until(self.deadline.unwrap_or_else(Instant::now)), if self.deadline.is_some() => {
                    self.tick();
                    self.publish();
                }
            }
        }
        debug!("playback task stopped");
    }

    fn apply(&mut self, action: Action<S>) -> Result<()> {
        match action {
            Action::Start(log, speed) => {
                self.playback.set_speed(speed);
                self.playback.start(log)?;
                self.render_current();
                self.arm();
            }
            Action::Pause => {
                self.playback.pause()?;
                self.deadline = None;
            }
            Action::Resume => {
                self.playback.resume()?;
                self.arm();
            }
            Action::Reset => {
                self.playback.reset();
                self.deadline = None;
            }
            Action::SetSpeed(speed) => {
                self.playback.set_speed(speed);
                if self.playback.state() == RunState::Running {
                    self.arm();
                }
            }
            Action::Seek(index) => {
                self.playback.seek(index)?;
                self.render_current();
            }
            Action::StepForward => {
                self.playback.step_forward()?;
                self.render_current();
            }
            Action::StepBackward => {
                self.playback.step_backward()?;
                if self.playback.state() != RunState::Running {
                    self.deadline = None;
                }
                self.render_current();
            }
        }
        Ok(())
    }

    fn tick(&mut self) {
        match self.playback.tick() {
            Tick::Advanced { .. } => {
                self.render_current();
                self.arm();
            }
            Tick::Finished | Tick::Idle => self.deadline = None,
        }
    }

    fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.playback.speed());
    }

    fn render_current(&mut self) {
        let (Some(index), Some(snapshot)) = (self.playback.cursor(), self.playback.current()) else {
            return;
        };
        let frame = PlaybackFrame {
            index,
            total: self.playback.total_steps(),
            snapshot: snapshot.clone(),
        };
        trace!(index, "playback render");
        self.sink.render(frame);
    }

    fn publish(&self) {
        self.status.send_replace(self.playback.status());
    }
}
