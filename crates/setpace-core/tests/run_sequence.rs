//! Integration tests for full run sequencing.
//!
//! Tests the complete workflow from begin to outcome under virtual time:
//! single-side runs, two-sided runs with side switching, and abort/restart
//! behavior.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use setpace_core::{
    CueEmitter, Event, PhaseKind, PhaseSnapshot, ProgressSink, RunOutcome, RunState, Side,
    WorkoutConfig, WorkoutRunner,
};

#[derive(Default)]
struct RecordingSink {
    snapshots: Mutex<Vec<PhaseSnapshot>>,
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    fn states(&self) -> Vec<RunState> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::StateChanged { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    fn phase_starts(&self) -> Vec<(PhaseKind, Option<Side>)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::PhaseStarted { phase, side, .. } => Some((*phase, *side)),
                _ => None,
            })
            .collect()
    }

    fn reached_state(&self, wanted: RunState) -> bool {
        self.states().contains(&wanted)
    }
}

impl ProgressSink for RecordingSink {
    fn snapshot(&self, snapshot: &PhaseSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    fn event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[derive(Default)]
struct RecordingCues {
    calls: Mutex<Vec<&'static str>>,
}

impl CueEmitter for RecordingCues {
    fn tick(&self) {
        self.calls.lock().unwrap().push("tick");
    }

    fn rep_start(&self) {
        self.calls.lock().unwrap().push("rep_start");
    }

    fn hold_start(&self) {
        self.calls.lock().unwrap().push("hold_start");
    }

    fn hold_end(&self) {
        self.calls.lock().unwrap().push("hold_end");
    }
}

fn single_side_config() -> WorkoutConfig {
    WorkoutConfig {
        sets: 2,
        reps: 3,
        rep_duration_secs: 2,
        hold_secs: 0,
        rest_secs: 5,
        both_sides: false,
        prepare_secs: 3,
        side_switch_secs: 5,
    }
}

fn two_sided_config() -> WorkoutConfig {
    WorkoutConfig {
        sets: 2,
        reps: 2,
        rep_duration_secs: 1,
        hold_secs: 1,
        rest_secs: 4,
        both_sides: true,
        prepare_secs: 2,
        side_switch_secs: 5,
    }
}

fn harness() -> (WorkoutRunner, Arc<RecordingSink>, Arc<RecordingCues>) {
    let sink = Arc::new(RecordingSink::default());
    let cues = Arc::new(RecordingCues::default());
    let runner = WorkoutRunner::new(
        Arc::clone(&cues) as Arc<dyn CueEmitter>,
        Arc::clone(&sink) as Arc<dyn ProgressSink>,
    );
    (runner, sink, cues)
}

#[tokio::test(start_paused = true)]
async fn single_side_run_completes_with_monotone_set_progress() {
    let (mut runner, sink, cues) = harness();
    let run = runner.begin("Squat", single_side_config());
    let outcome = run.run().await;
    assert_eq!(outcome, RunOutcome::Completed);

    let states = sink.states();
    assert_eq!(
        states,
        vec![
            RunState::Preparing,
            RunState::RunningSet,
            RunState::Resting,
            RunState::RunningSet,
            RunState::Completed,
        ]
    );

    let phases = sink.phase_starts();
    assert_eq!(
        phases,
        vec![
            (PhaseKind::Prepare, None),
            (PhaseKind::Repetitions, None),
            (PhaseKind::Rest, None),
            (PhaseKind::Repetitions, None),
        ]
    );

    // Sets bar: 0 during set 1, 0.5 during the rest, 1.0 at the end.
    let ratios: Vec<f64> = sink
        .snapshots
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.sets_completed_ratio)
        .collect();
    assert!(ratios.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(ratios.first().copied(), Some(0.0));
    assert_eq!(ratios.last().copied(), Some(1.0));

    // One rep-start cue per rep, across both sets.
    let rep_starts = cues
        .calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| **c == "rep_start")
        .count();
    assert_eq!(rep_starts, 6);

    let events = sink.events.lock().unwrap();
    assert!(matches!(events.first(), Some(Event::RunStarted { .. })));
    assert!(matches!(events.last(), Some(Event::RunCompleted { .. })));
}

#[tokio::test(start_paused = true)]
async fn two_sided_run_interleaves_sides_and_advances_after_left() {
    let (mut runner, sink, _cues) = harness();
    let run = runner.begin("Side Leg Raise", two_sided_config());
    let outcome = run.run().await;
    assert_eq!(outcome, RunOutcome::Completed);

    let phases = sink.phase_starts();
    assert_eq!(
        phases,
        vec![
            (PhaseKind::Prepare, Some(Side::Right)),
            (PhaseKind::Repetitions, Some(Side::Right)),
            (PhaseKind::SwitchSides, Some(Side::Left)),
            (PhaseKind::Repetitions, Some(Side::Left)),
            (PhaseKind::Rest, None),
            (PhaseKind::Repetitions, Some(Side::Right)),
            (PhaseKind::SwitchSides, Some(Side::Left)),
            (PhaseKind::Repetitions, Some(Side::Left)),
        ]
    );

    // Each set: the right side completes, then the set completes after left.
    let events = sink.events.lock().unwrap();
    let side_and_set: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::SideCompleted { .. } | Event::SetCompleted { .. }))
        .collect();
    assert_eq!(side_and_set.len(), 4);
    assert!(matches!(
        side_and_set[0],
        Event::SideCompleted { side: Side::Right, set: 1, .. }
    ));
    assert!(matches!(side_and_set[1], Event::SetCompleted { set: 1, .. }));
    assert!(matches!(
        side_and_set[2],
        Event::SideCompleted { side: Side::Right, set: 2, .. }
    ));
    assert!(matches!(side_and_set[3], Event::SetCompleted { set: 2, .. }));
    drop(events);

    // The sets bar never moves while the right side is still working.
    let snapshots = sink.snapshots.lock().unwrap();
    for s in snapshots.iter() {
        if s.phase == PhaseKind::Repetitions && s.side == Some(Side::Right) && s.remaining > 0 {
            assert!(s.sets_completed_ratio < 1.0);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn hold_cues_fire_inside_every_rep_of_a_two_sided_run() {
    let (mut runner, _sink, cues) = harness();
    let mut config = two_sided_config();
    config.sets = 1;
    let run = runner.begin("Side Leg Raise", config);
    run.run().await;
    let calls = cues.calls.lock().unwrap();
    let holds = calls.iter().filter(|c| **c == "hold_start").count();
    // Two reps per side, two sides.
    assert_eq!(holds, 4);
    assert_eq!(calls.iter().filter(|c| **c == "hold_end").count(), 4);
}

#[tokio::test(start_paused = true)]
async fn abort_during_rest_stops_the_run() {
    let (mut runner, sink, _cues) = harness();
    let run = runner.begin("Squat", single_side_config());
    let token = run.token();
    let handle = tokio::spawn(run.run());

    while !sink.reached_state(RunState::Resting) {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    token.abort();

    let outcome = handle.await.unwrap();
    assert_eq!(outcome, RunOutcome::Stopped);
    let states = sink.states();
    assert_eq!(states.last().copied(), Some(RunState::Stopped));
    assert!(!sink.reached_state(RunState::Completed));
    let events = sink.events.lock().unwrap();
    assert!(matches!(events.last(), Some(Event::RunStopped { .. })));
}

#[tokio::test(start_paused = true)]
async fn skipping_the_rest_shortens_the_run() {
    let (mut runner, sink, _cues) = harness();
    let mut config = single_side_config();
    config.rest_secs = 600;
    let run = runner.begin("Squat", config);
    let token = run.token();
    let handle = tokio::spawn(run.run());

    while !sink.reached_state(RunState::Resting) {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    token.request_skip();

    // Without the skip this would be a ten-minute wait; the timeout is the
    // assertion.
    let outcome = tokio::time::timeout(Duration::from_secs(120), handle)
        .await
        .expect("run should finish well before the full rest")
        .unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    let events = sink.events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::PhaseSkipped { phase: PhaseKind::Rest, .. })));
}

#[tokio::test(start_paused = true)]
async fn beginning_a_new_run_supersedes_the_live_one() {
    let (mut runner, sink, _cues) = harness();
    let first = runner.begin("Squat", single_side_config());
    let first_token = first.token();
    let first_handle = tokio::spawn(first.run());

    while !sink.reached_state(RunState::Preparing) {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let second = runner.begin("Glute Bridge", single_side_config());
    assert!(first_token.aborted());
    assert_eq!(first_handle.await.unwrap(), RunOutcome::Stopped);

    // The superseding run is unaffected and runs to completion.
    assert_eq!(second.run().await, RunOutcome::Completed);
    assert!(sink.reached_state(RunState::Completed));
}

#[tokio::test(start_paused = true)]
async fn pause_holds_progress_still() {
    let (mut runner, sink, _cues) = harness();
    let mut config = single_side_config();
    config.sets = 1;
    let run = runner.begin("Squat", config);
    let token = run.token();
    let handle = tokio::spawn(run.run());

    while sink.snapshots.lock().unwrap().is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    token.set_paused(true);
    let frozen = sink.snapshots.lock().unwrap().len();
    tokio::time::sleep(Duration::from_secs(30)).await;
    // At most one in-flight snapshot lands after the pause takes effect.
    assert!(sink.snapshots.lock().unwrap().len() <= frozen + 1);
    token.set_paused(false);

    assert_eq!(handle.await.unwrap(), RunOutcome::Completed);
}
