//! Pure progress derivations.
//!
//! Everything here is a function of plain numbers, so hosts can render any
//! way they like and tests need no clock.

/// Fraction of `total_ms` covered by `elapsed_ms`, as a percentage in
/// `[0.0, 100.0]`. A zero total reads as 0%.
pub fn percentage(elapsed_ms: u64, total_ms: u64) -> f64 {
    if total_ms == 0 {
        return 0.0;
    }
    (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
}

/// Percentage for a countdown: how much of `total_secs` has already passed
/// when `remaining_secs` are left.
pub fn countdown_percentage(total_secs: u32, remaining_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    let done = total_secs.saturating_sub(remaining_secs);
    (done as f64 / total_secs as f64 * 100.0).min(100.0)
}

/// Ratio of completed sets in `[0.0, 1.0]`.
pub fn sets_ratio(completed: u32, sets: u32) -> f64 {
    if sets == 0 {
        return 0.0;
    }
    completed.min(sets) as f64 / sets as f64
}

/// Whether the countdown should cue on this second.
///
/// Short timers (five seconds or less) cue on every second; longer timers
/// stay quiet until the final five. `current_sec` counts down toward 1.
pub fn should_tick(total_secs: u32, current_sec: u32) -> bool {
    if total_secs <= 5 {
        true
    } else {
        current_sec <= 5
    }
}
