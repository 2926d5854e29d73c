//! Timed repetitions, the working phase of a set.
//!
//! Each repetition is movement, an optional hold, then movement again. The
//! per-rep bar sweeps continuously in small slices; the sets bar advances
//! only when the phase actually completes its set.

use std::time::Duration;

use chrono::Utc;

use crate::clock::{
    pause_gate, sleep_pausable, sleep_pausable_with_poll, POLL_SLICE, SETTLE, SET_DONE_SETTLE,
    SIDE_DONE_SETTLE, TICK_POLL,
};
use crate::config::WorkoutConfig;
use crate::events::Event;
use crate::feedback::PhaseSnapshot;
use crate::progress::{percentage, sets_ratio};

use super::{PhaseEnv, PhaseKind, PhaseOutcome, ProgressContext, Side};

/// Sweeps the per-rep bar through one window of a repetition.
struct RepSweep<'a> {
    env: &'a PhaseEnv<'a>,
    total_ms: u64,
    elapsed_ms: u64,
    remaining: u32,
    status: String,
    ratio: f64,
}

impl RepSweep<'_> {
    /// Advance `window_ms` of un-paused time, snapshotting after every
    /// slice. Returns false when the token aborts mid-window.
    async fn advance(&mut self, window_ms: u64, holding: bool) -> bool {
        let slice_ms = POLL_SLICE.as_millis() as u64;
        let mut left = window_ms;
        while left > 0 {
            if self.env.token.aborted() {
                return false;
            }
            pause_gate(self.env.token).await;
            if self.env.token.aborted() {
                return false;
            }
            let slice = left.min(slice_ms);
            sleep_pausable_with_poll(Duration::from_millis(slice), self.env.token, TICK_POLL)
                .await;
            if self.env.token.aborted() {
                return false;
            }
            self.elapsed_ms += slice;
            left -= slice;
            self.env.sink.snapshot(&PhaseSnapshot {
                phase: PhaseKind::Repetitions,
                label: self.env.label.to_string(),
                side: self.env.side,
                remaining: self.remaining,
                percentage: percentage(self.elapsed_ms, self.total_ms),
                sets_completed_ratio: self.ratio,
                status: self.status.clone(),
                holding,
            });
        }
        true
    }
}

pub(crate) async fn reps_phase(
    config: &WorkoutConfig,
    ctx: ProgressContext,
    env: &PhaseEnv<'_>,
) -> PhaseOutcome {
    env.sink.event(&Event::PhaseStarted {
        at: Utc::now(),
        phase: PhaseKind::Repetitions,
        side: env.side,
        duration_secs: config.reps * config.total_rep_secs(),
    });

    let ratio = sets_ratio(ctx.completed_sets_before, env.set_total);
    let rep_total_ms = config.total_rep_secs() as u64 * 1000;
    let move_ms = config.rep_duration_secs as u64 * 1000;
    let hold_ms = config.hold_secs as u64 * 1000;

    for rep in 1..=config.reps {
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }
        pause_gate(env.token).await;
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }

        env.cues.rep_start();
        env.sink.event(&Event::RepStarted {
            at: Utc::now(),
            rep,
            of: config.reps,
        });

        let mut sweep = RepSweep {
            env,
            total_ms: rep_total_ms,
            elapsed_ms: 0,
            remaining: config.reps - rep + 1,
            status: format!("Rep {rep} of {}", config.reps),
            ratio,
        };

        if hold_ms > 0 {
            let first_half = move_ms / 2;
            let second_half = move_ms - first_half;
            if !sweep.advance(first_half, false).await {
                return PhaseOutcome::Aborted;
            }
            env.cues.hold_start();
            env.sink.event(&Event::HoldStarted {
                at: Utc::now(),
                rep,
            });
            if !sweep.advance(hold_ms, true).await {
                return PhaseOutcome::Aborted;
            }
            env.cues.hold_end();
            env.sink.event(&Event::HoldEnded {
                at: Utc::now(),
                rep,
            });
            if !sweep.advance(second_half, false).await {
                return PhaseOutcome::Aborted;
            }
        } else if !sweep.advance(move_ms, false).await {
            return PhaseOutcome::Aborted;
        }

        if rep < config.reps {
            env.sink.snapshot(&PhaseSnapshot {
                phase: PhaseKind::Repetitions,
                label: env.label.to_string(),
                side: env.side,
                remaining: config.reps - rep,
                percentage: 0.0,
                sets_completed_ratio: ratio,
                status: sweep.status,
                holding: false,
            });
            sleep_pausable(SETTLE, env.token).await;
        }
    }

    if env.token.aborted() {
        return PhaseOutcome::Aborted;
    }

    let (final_ratio, status, settle) = if ctx.advance_set_progress_at_end {
        env.sink.event(&Event::SetCompleted {
            at: Utc::now(),
            set: ctx.set_index,
            of: env.set_total,
        });
        (
            sets_ratio(ctx.completed_sets_before + 1, env.set_total),
            format!("Set {} complete.", ctx.set_index),
            SET_DONE_SETTLE,
        )
    } else {
        let side = env.side.unwrap_or(Side::Right);
        env.sink.event(&Event::SideCompleted {
            at: Utc::now(),
            side,
            set: ctx.set_index,
        });
        let side_name = match side {
            Side::Right => "Right",
            Side::Left => "Left",
        };
        (ratio, format!("{side_name} side complete."), SIDE_DONE_SETTLE)
    };

    env.sink.snapshot(&PhaseSnapshot {
        phase: PhaseKind::Repetitions,
        label: env.label.to_string(),
        side: env.side,
        remaining: 0,
        percentage: 100.0,
        sets_completed_ratio: final_ratio,
        status,
        holding: false,
    });
    sleep_pausable(settle, env.token).await;

    PhaseOutcome::Finished
}
