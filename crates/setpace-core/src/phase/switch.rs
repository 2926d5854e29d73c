//! Countdown between the two sides of a set.
//!
//! Not skippable: the switch is part of the exercise. Long countdowns stay
//! quiet until the final five seconds.

use std::time::Duration;

use chrono::Utc;

use crate::clock::{pause_gate, sleep_pausable, sleep_pausable_with_poll, SETTLE, TICK_POLL};
use crate::feedback::PhaseSnapshot;
use crate::progress::{countdown_percentage, sets_ratio, should_tick};

use super::{PhaseEnv, PhaseKind, PhaseOutcome, Side};

/// `next_side` is the side the user is switching to.
pub(crate) async fn switch_sides_phase(
    seconds: u32,
    next_side: Side,
    env: &PhaseEnv<'_>,
) -> PhaseOutcome {
    env.sink.event(&crate::events::Event::PhaseStarted {
        at: Utc::now(),
        phase: PhaseKind::SwitchSides,
        side: Some(next_side),
        duration_secs: seconds,
    });

    let status = format!("Next: {}", next_side.label());
    for t in (1..=seconds).rev() {
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }
        pause_gate(env.token).await;
        if env.token.aborted() {
            return PhaseOutcome::Aborted;
        }
        if should_tick(seconds, t) {
            env.cues.tick();
        }
        env.sink.snapshot(&PhaseSnapshot {
            phase: PhaseKind::SwitchSides,
            label: env.label.to_string(),
            side: Some(next_side),
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
        phase: PhaseKind::SwitchSides,
        label: env.label.to_string(),
        side: Some(next_side),
        remaining: 0,
        percentage: 100.0,
        sets_completed_ratio: sets_ratio(env.completed_sets, env.set_total),
        status,
        holding: false,
    });
    sleep_pausable(SETTLE, env.token).await;

    PhaseOutcome::Finished
}
