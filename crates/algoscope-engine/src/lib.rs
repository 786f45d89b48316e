//! Algoscope Engine: cooperative execution and playback for algorithm animations.
//!
//! Two execution models share one [`RunState`] machine:
//!
//! - **Live instrumented**: the algorithm runs as an async task, renders each
//!   step through an [`Instrument`], and suspends in [`cooperative_delay`]
//!   where the [`CancellationTokens`] are honored. Stop latency is bounded by
//!   the delay slice no matter how deep the algorithm's recursion is.
//! - **Step-log**: a generator records a complete [`StepLog`] up front, and a
//!   [`PlaybackController`] walks it on its own clock. Rendering is always a
//!   pure function of `log[cursor]`, so seeking is safe.
//!
//! # Example
//!
//! ```no_run
//! use algoscope_engine::{CancellationTokens, LiveConfig, LiveRun};
//!
//! # async fn demo() {
//! let run = LiveRun::<u32>::spawn(LiveConfig::default(), CancellationTokens::new(), |mut inst| async move {
//!     inst.set_total(1);
//!     inst.step(&0u32, "start").await && inst.complete(&1u32, "done")
//! });
//! let (completed, frames) = run.collect().await;
//! assert!(completed);
//! assert_eq!(frames.len(), 2);
//! # }
//! ```

mod config;
mod controller;
mod delay;
mod error;
mod frame;
mod playback;
mod run_state;
mod session;
mod step_log;
mod tokens;

pub use config::{LiveConfig, PlaybackConfig, DEFAULT_DELAY, DEFAULT_SLICE, DEFAULT_SPEED};
pub use controller::{PlaybackController, PlaybackFrame};
pub use delay::cooperative_delay;
pub use error::{Error, Result};
pub use frame::{FnSink, FrameSink, Instrument, LiveFrame, Progress};
pub use playback::{Playback, PlaybackStatus, Tick};
pub use run_state::{RunEvent, RunState};
pub use session::{LiveController, LiveRun};
pub use step_log::{Generated, Snapshot, StepLog};
pub use tokens::CancellationTokens;
