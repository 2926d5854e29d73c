//! Resolved workout parameters.
//!
//! A run never reads raw catalog or command-line values directly. Everything
//! funnels through [`WorkoutConfig::resolve`], which applies per-field
//! minimums and fallbacks, so a phase can trust its numbers without
//! re-validating.

use serde::{Deserialize, Serialize};

use crate::catalog::{AppDefaults, ExerciseDef};

/// Fully-resolved parameters for one workout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub sets: u32,
    pub reps: u32,
    pub rep_duration_secs: u32,
    pub hold_secs: u32,
    pub rest_secs: u32,
    pub both_sides: bool,
    pub prepare_secs: u32,
    pub side_switch_secs: u32,
}

/// Host-supplied overrides layered on top of an exercise definition.
///
/// `None` means "use the exercise's value"; present values are still clamped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub rep_duration_secs: Option<u32>,
    pub hold_secs: Option<u32>,
    pub rest_secs: Option<u32>,
    pub both_sides: Option<bool>,
    pub prepare_secs: Option<u32>,
    pub side_switch_secs: Option<u32>,
}

/// Missing values fall back; present values are floored at `min`.
pub fn clamp_or(value: Option<u32>, min: u32, fallback: u32) -> u32 {
    match value {
        Some(v) => v.max(min),
        None => fallback.max(min),
    }
}

impl WorkoutConfig {
    /// Layer `overrides` over `exercise`, with app-level defaults filling the
    /// prepare countdown, and clamp every field to its minimum.
    pub fn resolve(
        exercise: &ExerciseDef,
        app: &AppDefaults,
        overrides: &ConfigOverrides,
    ) -> Self {
        Self {
            sets: clamp_or(overrides.sets, 1, exercise.sets),
            reps: clamp_or(overrides.reps, 1, exercise.reps),
            rep_duration_secs: clamp_or(overrides.rep_duration_secs, 1, exercise.rep_duration_secs),
            hold_secs: clamp_or(overrides.hold_secs, 0, exercise.hold_secs),
            rest_secs: clamp_or(overrides.rest_secs, 0, exercise.rest_secs),
            both_sides: overrides.both_sides.unwrap_or(exercise.perform_both_sides),
            prepare_secs: clamp_or(overrides.prepare_secs, 0, app.prepare_secs),
            side_switch_secs: clamp_or(overrides.side_switch_secs, 0, exercise.side_switch_secs),
        }
    }

    /// Seconds one repetition occupies, movement plus hold.
    pub fn total_rep_secs(&self) -> u32 {
        self.rep_duration_secs + self.hold_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise() -> ExerciseDef {
        ExerciseDef {
            name: "Side Plank".into(),
            description: String::new(),
            sets: 3,
            reps: 10,
            rep_duration_secs: 3,
            hold_secs: 2,
            rest_secs: 30,
            perform_both_sides: true,
            side_switch_secs: 5,
        }
    }

    #[test]
    fn no_overrides_takes_exercise_values() {
        let cfg = WorkoutConfig::resolve(&exercise(), &AppDefaults::default(), &Default::default());
        assert_eq!(cfg.sets, 3);
        assert_eq!(cfg.reps, 10);
        assert_eq!(cfg.rep_duration_secs, 3);
        assert_eq!(cfg.hold_secs, 2);
        assert_eq!(cfg.rest_secs, 30);
        assert!(cfg.both_sides);
        assert_eq!(cfg.side_switch_secs, 5);
    }

    #[test]
    fn present_overrides_are_floored_not_replaced() {
        let overrides = ConfigOverrides {
            sets: Some(0),
            reps: Some(0),
            rep_duration_secs: Some(0),
            rest_secs: Some(0),
            ..Default::default()
        };
        let cfg = WorkoutConfig::resolve(&exercise(), &AppDefaults::default(), &overrides);
        assert_eq!(cfg.sets, 1);
        assert_eq!(cfg.reps, 1);
        assert_eq!(cfg.rep_duration_secs, 1);
        assert_eq!(cfg.rest_secs, 0);
    }

    #[test]
    fn both_sides_override_wins() {
        let overrides = ConfigOverrides {
            both_sides: Some(false),
            ..Default::default()
        };
        let cfg = WorkoutConfig::resolve(&exercise(), &AppDefaults::default(), &overrides);
        assert!(!cfg.both_sides);
    }

    #[test]
    fn clamp_or_covers_both_arms() {
        assert_eq!(clamp_or(Some(7), 1, 3), 7);
        assert_eq!(clamp_or(Some(0), 1, 3), 1);
        assert_eq!(clamp_or(None, 1, 3), 3);
        assert_eq!(clamp_or(None, 2, 0), 2);
    }

    #[test]
    fn total_rep_secs_adds_hold() {
        let cfg = WorkoutConfig::resolve(&exercise(), &AppDefaults::default(), &Default::default());
        assert_eq!(cfg.total_rep_secs(), 5);
    }
}
