//! Run orchestration.
//!
//! [`WorkoutRunner`] owns the control token for the current run and enforces
//! that at most one run is live: beginning a new run aborts the previous
//! token. [`WorkoutRun`] drives the phase sequence for one run to its
//! outcome.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::WorkoutConfig;
use crate::events::Event;
use crate::feedback::{CueEmitter, ProgressSink};
use crate::phase::{
    prepare_phase, reps_phase, rest_phase, switch_sides_phase, PhaseEnv, PhaseOutcome,
    ProgressContext, Side,
};
use crate::token::RunToken;

/// Where the orchestrator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Preparing,
    RunningSet,
    SwitchingSides,
    Resting,
    Completed,
    Stopped,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Preparing => "preparing",
            RunState::RunningSet => "running_set",
            RunState::SwitchingSides => "switching_sides",
            RunState::Resting => "resting",
            RunState::Completed => "completed",
            RunState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every set finished.
    Completed,
    /// Aborted before the final set.
    Stopped,
}

/// Factory and control surface for runs.
///
/// Hosts keep one runner alive, hand out pause/skip through the current
/// token, and call [`WorkoutRunner::begin`] again to restart.
pub struct WorkoutRunner {
    cues: Arc<dyn CueEmitter>,
    sink: Arc<dyn ProgressSink>,
    current: Option<RunToken>,
}

impl WorkoutRunner {
    pub fn new(cues: Arc<dyn CueEmitter>, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            cues,
            sink,
            current: None,
        }
    }

    /// Start a new run, superseding any run still live on the old token.
    pub fn begin(&mut self, label: impl Into<String>, config: WorkoutConfig) -> WorkoutRun {
        if let Some(previous) = self.current.take() {
            previous.abort();
        }
        let token = RunToken::new();
        self.current = Some(token.clone());
        WorkoutRun {
            token,
            label: label.into(),
            config,
            cues: Arc::clone(&self.cues),
            sink: Arc::clone(&self.sink),
            state: RunState::Idle,
            completed_sets: 0,
        }
    }

    /// Abort the current run, if one is live.
    pub fn stop(&self) {
        if let Some(token) = &self.current {
            token.abort();
        }
    }

    /// Token of the most recently begun run.
    pub fn current_token(&self) -> Option<RunToken> {
        self.current.clone()
    }
}

/// One run, from prepare through the final set.
pub struct WorkoutRun {
    token: RunToken,
    label: String,
    config: WorkoutConfig,
    cues: Arc<dyn CueEmitter>,
    sink: Arc<dyn ProgressSink>,
    state: RunState,
    completed_sets: u32,
}

impl WorkoutRun {
    /// Clone of this run's control token.
    pub fn token(&self) -> RunToken {
        self.token.clone()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Drive the run to its outcome.
    pub async fn run(mut self) -> RunOutcome {
        self.sink.event(&Event::RunStarted {
            at: Utc::now(),
            label: self.label.clone(),
            config: self.config.clone(),
        });

        self.set_state(RunState::Preparing);
        let first_side = self.config.both_sides.then_some(Side::Right);
        let outcome = {
            let env = self.phase_env(first_side);
            prepare_phase(self.config.prepare_secs, &env).await
        };
        if outcome.is_aborted() {
            return self.stopped();
        }

        for set in 1..=self.config.sets {
            if self.config.both_sides {
                if self.run_side(set, Some(Side::Right), false).await.is_aborted() {
                    return self.stopped();
                }
                self.set_state(RunState::SwitchingSides);
                let outcome = {
                    let env = self.phase_env(Some(Side::Left));
                    switch_sides_phase(self.config.side_switch_secs, Side::Left, &env).await
                };
                if outcome.is_aborted() {
                    return self.stopped();
                }
                if self.run_side(set, Some(Side::Left), true).await.is_aborted() {
                    return self.stopped();
                }
            } else if self.run_side(set, None, true).await.is_aborted() {
                return self.stopped();
            }
            self.completed_sets = set;

            if set < self.config.sets {
                self.set_state(RunState::Resting);
                let outcome = {
                    let env = self.phase_env(None);
                    rest_phase(self.config.rest_secs, set + 1, &env).await
                };
                if outcome.is_aborted() {
                    return self.stopped();
                }
            }
        }

        self.set_state(RunState::Completed);
        self.sink.event(&Event::RunCompleted { at: Utc::now() });
        RunOutcome::Completed
    }

    async fn run_side(&mut self, set: u32, side: Option<Side>, advance: bool) -> PhaseOutcome {
        self.set_state(RunState::RunningSet);
        let ctx = ProgressContext {
            set_index: set,
            completed_sets_before: set - 1,
            advance_set_progress_at_end: advance,
        };
        let env = self.phase_env(side);
        reps_phase(&self.config, ctx, &env).await
    }

    fn stopped(&mut self) -> RunOutcome {
        self.set_state(RunState::Stopped);
        self.sink.event(&Event::RunStopped { at: Utc::now() });
        RunOutcome::Stopped
    }

    fn set_state(&mut self, state: RunState) {
        self.state = state;
        self.sink.event(&Event::StateChanged {
            at: Utc::now(),
            state,
        });
    }

    fn phase_env(&self, side: Option<Side>) -> PhaseEnv<'_> {
        PhaseEnv {
            token: &self.token,
            cues: &*self.cues,
            sink: &*self.sink,
            label: &self.label,
            side,
            set_total: self.config.sets,
            completed_sets: self.completed_sets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SilentCues;
    use crate::phase::testing::RecordingSink;

    fn quick_config() -> WorkoutConfig {
        WorkoutConfig {
            sets: 1,
            reps: 1,
            rep_duration_secs: 1,
            hold_secs: 0,
            rest_secs: 0,
            both_sides: false,
            prepare_secs: 0,
            side_switch_secs: 0,
        }
    }

    #[test]
    fn beginning_a_new_run_aborts_the_previous_token() {
        let sink = Arc::new(RecordingSink::default());
        let mut runner = WorkoutRunner::new(Arc::new(SilentCues), sink);
        let first = runner.begin("A", quick_config());
        let first_token = first.token();
        let _second = runner.begin("B", quick_config());
        assert!(first_token.aborted());
    }

    #[test]
    fn stop_aborts_the_current_token() {
        let sink = Arc::new(RecordingSink::default());
        let mut runner = WorkoutRunner::new(Arc::new(SilentCues), sink);
        let run = runner.begin("A", quick_config());
        runner.stop();
        assert!(run.token().aborted());
    }

    #[test]
    fn current_token_matches_the_live_run() {
        let sink = Arc::new(RecordingSink::default());
        let mut runner = WorkoutRunner::new(Arc::new(SilentCues), sink);
        assert!(runner.current_token().is_none());
        let run = runner.begin("A", quick_config());
        let current = runner.current_token().unwrap();
        run.token().abort();
        assert!(current.aborted());
    }

    #[tokio::test(start_paused = true)]
    async fn single_set_run_walks_the_expected_states() {
        let sink = Arc::new(RecordingSink::default());
        let mut runner = WorkoutRunner::new(Arc::new(SilentCues), Arc::clone(&sink) as _);
        let run = runner.begin("Test", quick_config());
        let outcome = run.run().await;
        assert_eq!(outcome, RunOutcome::Completed);
        let states: Vec<RunState> = sink
            .events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::StateChanged { state, .. } => Some(*state),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![RunState::Preparing, RunState::RunningSet, RunState::Completed]
        );
        let kinds = sink.event_kinds();
        assert_eq!(kinds.first().map(String::as_str), Some("RunStarted"));
        assert_eq!(kinds.last().map(String::as_str), Some("RunCompleted"));
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_run_ends_stopped_without_completion_events() {
        let sink = Arc::new(RecordingSink::default());
        let mut runner = WorkoutRunner::new(Arc::new(SilentCues), Arc::clone(&sink) as _);
        let run = runner.begin("Test", quick_config());
        run.token().abort();
        let outcome = run.run().await;
        assert_eq!(outcome, RunOutcome::Stopped);
        let kinds = sink.event_kinds();
        assert!(kinds.iter().any(|k| k == "RunStopped"));
        assert!(!kinds.iter().any(|k| k == "RunCompleted"));
    }
}
