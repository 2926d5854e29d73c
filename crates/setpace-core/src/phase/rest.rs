//! Rest countdown between sets.
//!
//! Skippable. A zero-length rest still shows its full bar for a beat so the
//! transition reads on screen.

use std::time::Duration;

use chrono::Utc;

use crate::clock::{pause_gate, sleep_pausable, sleep_pausable_with_poll, SETTLE, TICK_POLL};
use crate::events::Event;
use crate::feedback::PhaseSnapshot;
use crate::progress::{countdown_percentage, sets_ratio, should_tick};

use super::{PhaseEnv, PhaseKind, PhaseOutcome};

/// `next_set` is the one-based set the rest leads into.
pub(crate) async fn rest_phase(seconds: u32, next_set: u32, env: &PhaseEnv<'_>) -> PhaseOutcome {
    env.token.clear_skip();

    env.sink.event(&Event::PhaseStarted {
        at: Utc::now(),
        phase: PhaseKind::Rest,
        side: None,
        duration_secs: seconds,
    });

    let status = format!("Next: Set {next_set} of {}", env.set_total);
    let mut skipped = false;
    for t in (1..=seconds).rev() {
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }
        pause_gate(env.token).await;
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }
        if env.token.take_skip() {
            skipped = true;
            break;
        }
        if should_tick(seconds, t) {
            env.cues.tick();
        }
        env.sink.snapshot(&PhaseSnapshot {
            phase: PhaseKind::Rest,
            label: env.label.to_string(),
            side: None,
            remaining: t,
            percentage: countdown_percentage(seconds, t),
            sets_completed_ratio: sets_ratio(env.completed_sets, env.set_total),
            status: status.clone(),
            holding: false,
        });
        sleep_pausable_with_poll(Duration::from_secs(1), env.token, TICK_POLL).await;
    }

    if env.token.aborted() {
        return PhaseOutcome::Aborted;
    }

    env.sink.snapshot(&PhaseSnapshot {
        phase: PhaseKind::Rest,
        label: env.label.to_string(),
        side: None,
        remaining: 0,
        percentage: 100.0,
        sets_completed_ratio: sets_ratio(env.completed_sets, env.set_total),
        status,
        holding: false,
    });
    sleep_pausable(SETTLE, env.token).await;

    if skipped {
        env.sink.event(&Event::PhaseSkipped {
            at: Utc::now(),
            phase: PhaseKind::Rest,
        });
        PhaseOutcome::Skipped
    } else {
        PhaseOutcome::Finished
    }
}
