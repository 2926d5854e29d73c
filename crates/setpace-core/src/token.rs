//! Run control token.
//!
//! A token carries the mutable control flags for exactly one run: `aborted`,
//! `paused`, and a latched `skip` request. The runner owns the current token
//! and hands clones to the host's controls and to every phase; starting a new
//! run aborts the previous token, so at most one run is ever live.
//!
//! Tokens are never reused across runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Flags {
    aborted: AtomicBool,
    paused: AtomicBool,
    skip: AtomicBool,
}

/// Clonable handle to one run's control flags.
///
/// All clones observe the same flags. The host flips `paused`/`skip` from its
/// input handler; `aborted` is set by `requestStop`-style controls or when a
/// newer run supersedes this one.
#[derive(Debug, Clone, Default)]
pub struct RunToken {
    flags: Arc<Flags>,
}

impl RunToken {
    /// Fresh token with all flags cleared.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aborted(&self) -> bool {
        self.flags.aborted.load(Ordering::Relaxed)
    }

    /// Abort the run. Latched: there is no un-abort.
    pub fn abort(&self) {
        self.flags.aborted.store(true, Ordering::Relaxed);
    }

    pub fn paused(&self) -> bool {
        self.flags.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.flags.paused.store(paused, Ordering::Relaxed);
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_paused(&self) -> bool {
        !self.flags.paused.fetch_xor(true, Ordering::Relaxed)
    }

    /// Request that the current phase be skipped, if it supports skipping.
    /// The request stays latched until a skippable phase consumes it.
    pub fn request_skip(&self) {
        self.flags.skip.store(true, Ordering::Relaxed);
    }

    pub fn skip_requested(&self) -> bool {
        self.flags.skip.load(Ordering::Relaxed)
    }

    /// Consume a pending skip request. Returns whether one was pending.
    pub fn take_skip(&self) -> bool {
        self.flags.skip.swap(false, Ordering::Relaxed)
    }

    /// Discard any stale skip request. Skippable phases call this on entry so
    /// a request issued during a non-skippable phase cannot leak forward.
    pub fn clear_skip(&self) {
        self.flags.skip.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_has_all_flags_clear() {
        let token = RunToken::new();
        assert!(!token.aborted());
        assert!(!token.paused());
        assert!(!token.skip_requested());
    }

    #[test]
    fn abort_is_latched() {
        let token = RunToken::new();
        token.abort();
        assert!(token.aborted());
    }

    #[test]
    fn clones_share_flags() {
        let token = RunToken::new();
        let other = token.clone();
        other.abort();
        assert!(token.aborted());
    }

    #[test]
    fn toggle_paused_returns_new_state() {
        let token = RunToken::new();
        assert!(token.toggle_paused());
        assert!(token.paused());
        assert!(!token.toggle_paused());
        assert!(!token.paused());
    }

    #[test]
    fn take_skip_consumes_the_request() {
        let token = RunToken::new();
        token.request_skip();
        assert!(token.take_skip());
        assert!(!token.take_skip());
        assert!(!token.skip_requested());
    }
}
