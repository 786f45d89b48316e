//! Stop/pause flags shared between a controller and a running algorithm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

#[derive(Debug, Default)]
struct Flags {
    stop: AtomicBool,
    pause: AtomicBool,
}

/// Cancellation token pair for one live run.
///
/// Cloning shares the same flags: the controller keeps one handle and the
/// algorithm another. Create a fresh pair for every run; stop is permanent
/// for the run it was issued to, pause can be toggled any number of times.
#[derive(Debug, Clone, Default)]
pub struct CancellationTokens {
    inner: Arc<Flags>,
}

impl CancellationTokens {
    /// Create a pair with both flags cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop at its next checkpoint.
    pub fn request_stop(&self) {
        if !self.inner.stop.swap(true, Ordering::SeqCst) {
            debug!("stop requested");
        }
    }

    /// Ask the run to suspend at its next checkpoint.
    pub fn request_pause(&self) {
        if !self.inner.pause.swap(true, Ordering::SeqCst) {
            debug!("pause requested");
        }
    }

    /// Let a paused run continue.
    pub fn clear_pause(&self) {
        if self.inner.pause.swap(false, Ordering::SeqCst) {
            debug!("pause cleared");
        }
    }

    pub fn is_stop_requested(&self) -> bool {
        self.inner.stop.load(Ordering::SeqCst)
    }

    pub fn is_pause_requested(&self) -> bool {
        self.inner.pause.load(Ordering::SeqCst)
    }

    /// Whether two handles refer to the same flags.
    pub fn same_run(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
