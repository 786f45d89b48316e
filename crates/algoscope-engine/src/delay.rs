//! Cooperative delay: a sliced sleep that keeps checking the token pair.

use std::time::Duration;

use tokio::time::sleep;
use tracing::trace;

use crate::config::DEFAULT_SLICE;
use crate::tokens::CancellationTokens;

/// Sleep for `duration`, in slices of at most `slice`, while honoring the tokens.
///
/// Returns `false` as soon as a stop is observed, without waiting out the
/// rest of the duration. While paused the wait loops in slices without
/// consuming the duration, so time spent paused is not counted against it.
/// Returns `true` once the whole duration has elapsed with no stop.
///
/// A zero duration still yields once so a controller sharing the thread gets
/// a chance to set the flags.
pub async fn cooperative_delay(
    duration: Duration,
    tokens: &CancellationTokens,
    slice: Duration,
) -> bool {
    let slice = if slice.is_zero() { DEFAULT_SLICE } else { slice };
    let mut remaining = duration;

    if duration.is_zero() {
        tokio::task::yield_now().await;
    }

    loop {
        if tokens.is_stop_requested() {
            trace!("delay interrupted by stop");
            return false;
        }
        if tokens.is_pause_requested() {
            sleep(slice).await;
            continue;
        }
        if remaining.is_zero() {
            break;
        }
        let chunk = remaining.min(slice);
        sleep(chunk).await;
        remaining = remaining.saturating_sub(chunk);
    }

    !tokens.is_stop_requested()
}
