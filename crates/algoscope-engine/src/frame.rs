//! Frames, frame sinks, and the instrument that live algorithms report through.
//!
//! A live algorithm never talks to a renderer directly. It hands each visual
//! state to an [`Instrument`], which stamps it with a sequence number and the
//! algorithm's own progress, passes an owned copy to a [`FrameSink`], then
//! waits on the cooperative delay. Whatever consumes the sink (a channel, a
//! test vector, a terminal printer) stays decoupled from the algorithm.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::trace;

use crate::config::LiveConfig;
use crate::delay::cooperative_delay;
use crate::tokens::CancellationTokens;

/// Consumer of rendered frames.
pub trait FrameSink<F> {
    /// Accept one frame. Frames arrive strictly in production order.
    fn render(&mut self, frame: F);
}

impl<F> FrameSink<F> for Vec<F> {
    fn render(&mut self, frame: F) {
        self.push(frame);
    }
}

impl<F> FrameSink<F> for mpsc::UnboundedSender<F> {
    fn render(&mut self, frame: F) {
        if self.send(frame).is_err() {
            trace!("frame receiver dropped");
        }
    }
}

impl<F, S: FrameSink<F> + ?Sized> FrameSink<F> for &mut S {
    fn render(&mut self, frame: F) {
        (**self).render(frame);
    }
}

/// Adapts a closure into a [`FrameSink`].
pub struct FnSink<C>(pub C);

impl<F, C: FnMut(F)> FrameSink<F> for FnSink<C> {
    fn render(&mut self, frame: F) {
        (self.0)(frame);
    }
}

/// Progress as reported by the algorithm itself, in its own units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(done: usize, total: usize) -> Self {
        Self {
            done: done.min(total),
            total,
        }
    }

    /// Fraction complete in `0.0..=1.0`; an empty workload counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

/// One rendered instant of a live run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFrame<T> {
    /// Position in the run, starting at 0 with no gaps.
    pub seq: u64,
    /// Owned copy of the visual state.
    pub state: T,
    /// Human-readable explanation of the step.
    pub description: String,
    pub progress: Progress,
}

/// Checkpoint helper handed to live algorithms.
///
/// Every `step*` call checks the stop flag, renders, then waits. The moment a
/// stop is seen it returns `false`, and the algorithm must return without
/// touching its state again.
pub struct Instrument<K> {
    sink: K,
    tokens: CancellationTokens,
    config: LiveConfig,
    seq: u64,
    progress: Progress,
}

impl<K> Instrument<K> {
    pub fn new(sink: K, tokens: CancellationTokens, config: LiveConfig) -> Self {
        Self {
            sink,
            tokens,
            config,
            seq: 0,
            progress: Progress::default(),
        }
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    pub fn tokens(&self) -> &CancellationTokens {
        &self.tokens
    }

    pub fn is_stopped(&self) -> bool {
        self.tokens.is_stop_requested()
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.seq
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Declare the size of the workload in the algorithm's own units.
    pub fn set_total(&mut self, total: usize) {
        self.progress = Progress::new(self.progress.done, total);
    }

    pub fn set_done(&mut self, done: usize) {
        self.progress = Progress::new(done, self.progress.total);
    }

    pub fn advance(&mut self, units: usize) {
        self.set_done(self.progress.done + units);
    }

    /// Give the sink back, e.g. to inspect collected frames.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Checkpoint without rendering: waits out a pause, reports a stop.
    pub async fn checkpoint(&mut self) -> bool {
        cooperative_delay(Duration::ZERO, &self.tokens, self.config.slice).await
    }

    fn emit<T: Clone>(&mut self, state: &T, description: String) -> bool
    where
        K: FrameSink<LiveFrame<T>>,
    {
        if self.tokens.is_stop_requested() {
            return false;
        }
        let frame = LiveFrame {
            seq: self.seq,
            state: state.clone(),
            description,
            progress: self.progress,
        };
        trace!(seq = self.seq, "render");
        self.sink.render(frame);
        self.seq += 1;
        true
    }

    /// Render, then wait the configured delay.
    pub async fn step<T: Clone>(&mut self, state: &T, description: impl Into<String>) -> bool
    where
        K: FrameSink<LiveFrame<T>>,
    {
        let delay = self.config.delay;
        self.step_for(state, description, delay).await
    }

    /// Render, then wait a custom delay.
    pub async fn step_for<T: Clone>(
        &mut self,
        state: &T,
        description: impl Into<String>,
        delay: Duration,
    ) -> bool
    where
        K: FrameSink<LiveFrame<T>>,
    {
        if !self.emit(state, description.into()) {
            return false;
        }
        cooperative_delay(delay, &self.tokens, self.config.slice).await
    }

    /// Render without waiting.
    pub fn show<T: Clone>(&mut self, state: &T, description: impl Into<String>) -> bool
    where
        K: FrameSink<LiveFrame<T>>,
    {
        self.emit(state, description.into())
    }

    /// Mark the workload done and render the terminal frame.
    pub fn complete<T: Clone>(&mut self, state: &T, description: impl Into<String>) -> bool
    where
        K: FrameSink<LiveFrame<T>>,
    {
        self.progress = Progress::new(self.progress.total, self.progress.total);
        self.emit(state, description.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(frames: &mut Vec<LiveFrame<u32>>) -> Instrument<&mut Vec<LiveFrame<u32>>> {
        Instrument::new(frames, CancellationTokens::new(), LiveConfig::from_millis(0))
    }

    #[tokio::test]
    async fn frames_are_sequenced() {
        let mut frames = Vec::new();
        let mut inst = instrument(&mut frames);
        inst.set_total(3);
        assert!(inst.step(&1u32, "one").await);
        inst.advance(1);
        assert!(inst.step(&2u32, "two").await);
        assert!(inst.complete(&3u32, "done"));
        drop(inst);

        let seqs: Vec<u64> = frames.iter().map(|f| f.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(frames[1].progress, Progress::new(1, 3));
        assert!(frames[2].progress.is_complete());
        assert_eq!(frames[2].description, "done");
    }

    #[tokio::test]
    async fn stopped_instrument_renders_nothing() {
        let mut frames: Vec<LiveFrame<u32>> = Vec::new();
        let tokens = CancellationTokens::new();
        let mut inst = Instrument::new(&mut frames, tokens.clone(), LiveConfig::from_millis(0));
        tokens.request_stop();
        assert!(!inst.step(&1u32, "ignored").await);
        assert!(!inst.show(&1u32, "ignored"));
        assert!(!inst.complete(&1u32, "ignored"));
        assert_eq!(inst.frames_rendered(), 0);
        drop(inst);
        assert!(frames.is_empty());
    }

    #[test]
    fn progress_fraction() {
        assert_eq!(Progress::new(1, 4).fraction(), 0.25);
        assert_eq!(Progress::new(0, 0).fraction(), 1.0);
        assert_eq!(Progress::new(9, 4).done, 4);
    }

    #[test]
    fn fn_sink_forwards() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink(|v: u32| seen.push(v));
            sink.render(7);
            sink.render(8);
        }
        assert_eq!(seen, vec![7, 8]);
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (mut tx, rx) = mpsc::unbounded_channel::<u32>();
        drop(rx);
        tx.render(1);
    }

    #[test]
    fn frame_serializes() {
        let frame = LiveFrame {
            seq: 4,
            state: vec![1u32, 2],
            description: "swap".to_string(),
            progress: Progress::new(1, 2),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"seq\":4"));
        let back: LiveFrame<Vec<u32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
