//! # Setpace Core Library
//!
//! This library provides the core logic for the Setpace guided-workout
//! timer. It implements a CLI-first philosophy where every operation is
//! available to a standalone terminal binary, with any richer front end
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Runner**: An async phase-sequencing state machine that drives one
//!   run (prepare, repetitions, side switches, rests) to its outcome
//! - **Clock**: Cancellable, pausable sleeps; all timing funnels through it
//! - **Feedback**: Host-implemented traits for cues and progress rendering
//! - **Catalog**: TOML-based exercise definitions and app defaults
//!
//! ## Key Components
//!
//! - [`WorkoutRunner`]: Run factory enforcing a single live run
//! - [`WorkoutRun`]: One run, from prepare through the final set
//! - [`RunToken`]: Pause/skip/abort control shared with the host
//! - [`Catalog`]: Exercise definition storage

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod phase;
pub mod progress;
pub mod runner;
pub mod token;

pub use catalog::{AppDefaults, Catalog, ExerciseDef};
pub use config::{ConfigOverrides, WorkoutConfig};
pub use error::{CatalogError, CoreError, Result};
pub use events::Event;
pub use feedback::{CueEmitter, PhaseSnapshot, ProgressSink, SilentCues};
pub use phase::{PhaseKind, PhaseOutcome, ProgressContext, Side};
pub use runner::{RunOutcome, RunState, WorkoutRun, WorkoutRunner};
pub use token::RunToken;
