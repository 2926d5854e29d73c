//! Run lifecycle events.
//!
//! Every state change in the system produces an [`Event`]. Hosts subscribe
//! through [`crate::feedback::ProgressSink::event`] and can log, replay, or
//! serialize the stream; the core itself never interprets past events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::WorkoutConfig;
use crate::phase::{PhaseKind, Side};
use crate::runner::RunState;

/// A single state change, stamped with wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A run began with this resolved configuration.
    RunStarted {
        at: DateTime<Utc>,
        label: String,
        config: WorkoutConfig,
    },
    /// The orchestrator moved to a new state.
    StateChanged { at: DateTime<Utc>, state: RunState },
    /// A phase began counting.
    PhaseStarted {
        at: DateTime<Utc>,
        phase: PhaseKind,
        side: Option<Side>,
        duration_secs: u32,
    },
    /// A skippable phase ended early on request.
    PhaseSkipped { at: DateTime<Utc>, phase: PhaseKind },
    /// A repetition began.
    RepStarted { at: DateTime<Utc>, rep: u32, of: u32 },
    /// The hold window within a repetition opened.
    HoldStarted { at: DateTime<Utc>, rep: u32 },
    /// The hold window within a repetition closed.
    HoldEnded { at: DateTime<Utc>, rep: u32 },
    /// One side of a two-sided set finished; the set itself is still open.
    SideCompleted {
        at: DateTime<Utc>,
        side: Side,
        set: u32,
    },
    /// A full set finished.
    SetCompleted { at: DateTime<Utc>, set: u32, of: u32 },
    /// Every set finished.
    RunCompleted { at: DateTime<Utc> },
    /// The run was aborted before completing.
    RunStopped { at: DateTime<Utc> },
}

impl Event {
    /// Timestamp of the change, whichever variant carries it.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::RunStarted { at, .. }
            | Event::StateChanged { at, .. }
            | Event::PhaseStarted { at, .. }
            | Event::PhaseSkipped { at, .. }
            | Event::RepStarted { at, .. }
            | Event::HoldStarted { at, .. }
            | Event::HoldEnded { at, .. }
            | Event::SideCompleted { at, .. }
            | Event::SetCompleted { at, .. }
            | Event::RunCompleted { at }
            | Event::RunStopped { at } => *at,
        }
    }
}
