//! Phase executors.
//!
//! A run is a sequence of phases; each executor drives exactly one phase
//! kind from start to outcome, emitting cues, snapshots, and events along
//! the way. Executors never decide what comes next. Ordering lives in
//! [`crate::runner`].

use serde::{Deserialize, Serialize};

use crate::feedback::{CueEmitter, ProgressSink};
use crate::token::RunToken;

mod prepare;
mod reps;
mod rest;
mod switch;

pub(crate) use prepare::prepare_phase;
pub(crate) use reps::reps_phase;
pub(crate) use rest::rest_phase;
pub(crate) use switch::switch_sides_phase;

/// The four phase kinds of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Prepare,
    Repetitions,
    SwitchSides,
    Rest,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseKind::Prepare => "prepare",
            PhaseKind::Repetitions => "repetitions",
            PhaseKind::SwitchSides => "switch_sides",
            PhaseKind::Rest => "rest",
        };
        f.write_str(name)
    }
}

/// Which side of the body a two-sided set is working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Right,
    Left,
}

impl Side {
    /// Display label, as shown in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Right => "Right Side",
            Side::Left => "Left Side",
        }
    }
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Ran to its natural end.
    Finished,
    /// Ended early on a skip request.
    Skipped,
    /// The run's token was aborted; stop everything.
    Aborted,
}

impl PhaseOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, PhaseOutcome::Aborted)
    }
}

/// Where a repetitions phase sits within the overall run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressContext {
    /// One-based set currently running.
    pub set_index: u32,
    /// Sets fully finished before this phase began.
    pub completed_sets_before: u32,
    /// Whether finishing this phase completes the set. False for the first
    /// side of a two-sided set, so the sets bar only advances once per set.
    pub advance_set_progress_at_end: bool,
}

/// Shared handles every executor needs.
pub(crate) struct PhaseEnv<'a> {
    pub token: &'a RunToken,
    pub cues: &'a dyn CueEmitter,
    pub sink: &'a dyn ProgressSink,
    /// Run display label, e.g. the exercise name.
    pub label: &'a str,
    /// Side the phase works, if the run is two-sided.
    pub side: Option<Side>,
    /// Total sets in the run.
    pub set_total: u32,
    /// Sets finished so far, for the overall-progress ratio.
    pub completed_sets: u32,
}
