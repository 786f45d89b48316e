//! Run drivers: pump frames from a live run or a playback task to stdout
//! until the run ends or the user presses Ctrl-C.

use std::future::Future;

use algoscope_engine::{
    Instrument, LiveConfig, LiveController, LiveFrame, PlaybackConfig, PlaybackController,
    PlaybackFrame, PlaybackStatus, RunState, Snapshot, StepLog,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::render::TextFrame;

/// Writes frames in the configured format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn live<T: TextFrame + Serialize>(&self, frame: &LiveFrame<T>) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                let percent = (frame.progress.fraction() * 100.0).round() as u32;
                println!(
                    "#{:<4} {:>3}%  {}  {}",
                    frame.seq,
                    percent,
                    frame.state.render(),
                    frame.description
                );
            }
            OutputFormat::Json => println!("{}", serde_json::to_string(frame)?),
        }
        Ok(())
    }

    pub fn playback<S: Snapshot + TextFrame + Serialize>(&self, frame: &PlaybackFrame<S>) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!(
                "[{}/{}] {}  {}",
                frame.index + 1,
                frame.total,
                frame.snapshot.render(),
                frame.snapshot.description()
            ),
            OutputFormat::Json => println!("{}", serde_json::to_string(frame)?),
        }
        Ok(())
    }

    /// Final result: `text` for humans, `value` as JSON.
    pub fn summary<V: Serialize>(&self, text: &str, value: &V) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{text}"),
            OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        }
        Ok(())
    }
}

/// Start `run` under `controller` and print its frames.
///
/// Returns whether the run completed naturally.
pub async fn drive_live<T, F, Fut>(
    controller: &mut LiveController,
    config: LiveConfig,
    printer: &Printer,
    run: F,
) -> Result<bool>
where
    T: TextFrame + Serialize + Send + 'static,
    F: FnOnce(Instrument<mpsc::UnboundedSender<LiveFrame<T>>>) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    controller
        .start(move |tokens| run(Instrument::new(tx, tokens, config)))
        .await?;

    let mut interrupted = false;
    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Some(frame) => printer.live(&frame)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                info!("interrupted, stopping run");
                interrupted = true;
                controller.stop().await;
            }
        }
    }

    let completed = controller.wait().await.unwrap_or(false);
    debug!(completed, state = %controller.state(), "live run drained");
    Ok(completed)
}

/// Play `log` back at `config.speed` and print every rendered step.
pub async fn drive_playback<S>(
    log: StepLog<S>,
    config: PlaybackConfig,
    printer: &Printer,
) -> Result<PlaybackStatus>
where
    S: Snapshot + TextFrame + Serialize + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<PlaybackFrame<S>>();
    let controller = PlaybackController::spawn(config, tx);
    controller.start(log, config.speed).await?;

    let status = loop {
        tokio::select! {
            biased;
            Some(frame) = rx.recv() => printer.playback(&frame)?,
            status = controller.wait_for(RunState::Completed) => {
                let status = status?;
                while let Ok(frame) = rx.try_recv() {
                    printer.playback(&frame)?;
                }
                break status;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, resetting playback");
                controller.reset().await?;
                break controller.status();
            }
        }
    };

    controller.shutdown().await;
    Ok(status)
}
