//! Host-facing feedback seams.
//!
//! The engine never draws or plays anything itself. It calls out through
//! these traits, and the host decides what a tick or a snapshot looks like.
//! Both traits are infallible: feedback is fire-and-forget, and a host that
//! cannot render must not be able to stall a run.

use serde::Serialize;

use crate::events::Event;
use crate::phase::{PhaseKind, Side};

/// Moment cues: short, immediate signals tied to a single instant.
pub trait CueEmitter: Send + Sync {
    /// Countdown second cue.
    fn tick(&self);
    /// A repetition is starting.
    fn rep_start(&self);
    /// The hold window opened.
    fn hold_start(&self);
    /// The hold window closed.
    fn hold_end(&self);
}

/// Continuous progress plus the event stream.
pub trait ProgressSink: Send + Sync {
    /// Current phase progress. Called frequently; keep it cheap.
    fn snapshot(&self, snapshot: &PhaseSnapshot);
    /// A state change occurred.
    fn event(&self, event: &Event);
}

/// Everything a host needs to render the current instant of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSnapshot {
    pub phase: PhaseKind,
    /// Display label for the run, e.g. the exercise name.
    pub label: String,
    pub side: Option<Side>,
    /// Seconds left for countdown phases; repetitions left during reps.
    pub remaining: u32,
    /// Progress through the current phase unit, `0.0..=100.0`.
    pub percentage: f64,
    /// Overall progress across sets, `0.0..=1.0`.
    pub sets_completed_ratio: f64,
    /// Human-readable status line, e.g. `"Rep 2 of 10"`.
    pub status: String,
    /// Inside a hold window right now.
    pub holding: bool,
}

/// Emitter that stays silent. Useful for tests and muted hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueEmitter for SilentCues {
    fn tick(&self) {}
    fn rep_start(&self) {}
    fn hold_start(&self) {}
    fn hold_end(&self) {}
}
