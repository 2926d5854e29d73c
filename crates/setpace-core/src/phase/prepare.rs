//! Countdown before the first repetition.
//!
//! Skippable. Cues on every second so the user can pace getting into
//! position.

use std::time::Duration;

use chrono::Utc;

use crate::clock::{pause_gate, sleep_pausable, sleep_pausable_with_poll, SETTLE, TICK_POLL};
use crate::feedback::PhaseSnapshot;
use crate::progress::{countdown_percentage, sets_ratio};

use super::{PhaseEnv, PhaseKind, PhaseOutcome};

pub(crate) async fn prepare_phase(seconds: u32, env: &PhaseEnv<'_>) -> PhaseOutcome {
    // A skip requested during an earlier, non-skippable stretch must not
    // leak into this countdown.
    env.token.clear_skip();

    env.sink.event(&crate::events::Event::PhaseStarted {
        at: Utc::now(),
        phase: PhaseKind::Prepare,
        side: env.side,
        duration_secs: seconds,
    });

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
        env.cues.tick();
        env.sink.snapshot(&PhaseSnapshot {
            phase: PhaseKind::Prepare,
            label: env.label.to_string(),
            side: env.side,
            remaining: t,
            percentage: countdown_percentage(seconds, t),
            sets_completed_ratio: sets_ratio(env.completed_sets, env.set_total),
            status: "Get into position...".to_string(),
            holding: false,
        });
        sleep_pausable_with_poll(Duration::from_secs(1), env.token, TICK_POLL).await;
    }

    if env.token.aborted() {
        return PhaseOutcome::Aborted;
    }

    env.sink.snapshot(&PhaseSnapshot {
        phase: PhaseKind::Prepare,
        label: env.label.to_string(),
        side: env.side,
        remaining: 0,
        percentage: 100.0,
        sets_completed_ratio: sets_ratio(env.completed_sets, env.set_total),
        status: "Get into position...".to_string(),
        holding: false,
    });
    sleep_pausable(SETTLE, env.token).await;

    if skipped {
        env.sink.event(&crate::events::Event::PhaseSkipped {
            at: Utc::now(),
            phase: PhaseKind::Prepare,
        });
        PhaseOutcome::Skipped
    } else {
        PhaseOutcome::Finished
    }
}
