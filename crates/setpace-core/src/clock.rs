//! Cancellable, pausable sleep.
//!
//! Every phase waits through this module rather than sleeping directly, which
//! is what makes pause/abort uniform across the whole run: a wait is chopped
//! into poll slices, and the token is re-checked between slices. Cancellation
//! latency is therefore bounded by one poll slice, and time spent paused never
//! counts toward the requested duration.

use std::time::Duration;

use tokio::time::sleep;

use crate::token::RunToken;

/// Default slice for chopped waits.
pub const POLL_SLICE: Duration = Duration::from_millis(80);

/// Re-poll cadence while paused.
pub const PAUSE_POLL: Duration = Duration::from_millis(120);

/// Poll slice used by the per-second countdown loops.
pub(crate) const TICK_POLL: Duration = Duration::from_millis(60);

/// Short pause at the end of a timer phase so the full bar is visible.
pub(crate) const SETTLE: Duration = Duration::from_millis(120);

/// Slightly longer settle after a full set completes.
pub(crate) const SET_DONE_SETTLE: Duration = Duration::from_millis(250);

/// Settle after one side finishes but the set is still open.
pub(crate) const SIDE_DONE_SETTLE: Duration = Duration::from_millis(200);

/// Block while the token is paused, waking every [`PAUSE_POLL`] to re-check.
/// Returns as soon as the token is unpaused or aborted.
pub async fn pause_gate(token: &RunToken) {
    while !token.aborted() && token.paused() {
        sleep(PAUSE_POLL).await;
    }
}

/// Sleep for `duration` of un-paused wall-clock time, checking the token
/// every [`POLL_SLICE`].
pub async fn sleep_pausable(duration: Duration, token: &RunToken) {
    sleep_pausable_with_poll(duration, token, POLL_SLICE).await;
}

/// [`sleep_pausable`] with an explicit poll slice.
///
/// Returns early when the token aborts; callers treat any early return as
/// "stop now". Overshoot is bounded by one poll slice. `duration` of zero is
/// a no-op.
pub async fn sleep_pausable_with_poll(duration: Duration, token: &RunToken, poll: Duration) {
    let poll = poll.max(Duration::from_millis(1));
    let mut elapsed = Duration::ZERO;
    while !token.aborted() && elapsed < duration {
        pause_gate(token).await;
        if token.aborted() {
            return;
        }
        let slice = poll.min(duration - elapsed);
        sleep(slice).await;
        elapsed += slice;
    }
}
