use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use setpace_core::{
    Catalog, ConfigOverrides, CueEmitter, ProgressSink, RunOutcome, RunToken, SilentCues,
    WorkoutConfig, WorkoutRunner,
};

use crate::render::{BellCues, TerminalSink};

#[derive(Args)]
pub struct RunArgs {
    /// Exercise name from the catalog (case-insensitive)
    pub exercise: String,
    /// Override the number of sets
    #[arg(long)]
    pub sets: Option<u32>,
    /// Override the repetitions per set
    #[arg(long)]
    pub reps: Option<u32>,
    /// Override the seconds per repetition movement
    #[arg(long, value_name = "SECS")]
    pub rep_duration: Option<u32>,
    /// Override the hold seconds within each repetition
    #[arg(long, value_name = "SECS")]
    pub hold: Option<u32>,
    /// Override the rest seconds between sets
    #[arg(long, value_name = "SECS")]
    pub rest: Option<u32>,
    /// Run each set on both sides, right then left
    #[arg(long, conflicts_with = "single_side")]
    pub both_sides: bool,
    /// Run each set once, ignoring sides
    #[arg(long)]
    pub single_side: bool,
    /// Override the get-ready countdown seconds
    #[arg(long, value_name = "SECS")]
    pub prepare: Option<u32>,
    /// Override the side-switch countdown seconds
    #[arg(long = "switch", value_name = "SECS")]
    pub side_switch: Option<u32>,
    /// Suppress terminal bell cues
    #[arg(long)]
    pub silent: bool,
    /// Emit JSON lines instead of drawing progress
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sets: self.sets,
            reps: self.reps,
            rep_duration_secs: self.rep_duration,
            hold_secs: self.hold,
            rest_secs: self.rest,
            both_sides: if self.both_sides {
                Some(true)
            } else if self.single_side {
                Some(false)
            } else {
                None
            },
            prepare_secs: self.prepare,
            side_switch_secs: self.side_switch,
        }
    }
}

/// Restores the terminal even when the run path errors or panics.
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn enable() -> Self {
        Self {
            active: enable_raw_mode().is_ok(),
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load()?;
    let exercise = catalog.find(&args.exercise)?;
    let config = WorkoutConfig::resolve(exercise, &catalog.app, &args.overrides());
    let label = exercise.name.clone();

    let interactive = !args.json && std::io::stdout().is_terminal();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run_workout(label, config, &args, interactive));
    Ok(())
}

async fn run_workout(label: String, config: WorkoutConfig, args: &RunArgs, interactive: bool) {
    let sink: Arc<dyn ProgressSink> = Arc::new(TerminalSink::new(args.json, interactive));
    let cues: Arc<dyn CueEmitter> = if args.silent || args.json {
        Arc::new(SilentCues)
    } else {
        Arc::new(BellCues)
    };

    let mut runner = WorkoutRunner::new(cues, sink);
    let run = runner.begin(label, config);
    let token = run.token();

    let guard = interactive.then(RawModeGuard::enable);
    let reader = interactive.then(|| {
        let token = run.token();
        std::thread::spawn(move || key_loop(&token))
    });
    if interactive {
        print!("Controls: [p]ause  [s]kip  [q]uit\r\n");
    }

    let outcome = run.run().await;

    // Wakes the key reader even after a natural finish.
    token.abort();
    if let Some(reader) = reader {
        let _ = reader.join();
    }
    drop(guard);

    if interactive {
        println!();
    }
    match outcome {
        RunOutcome::Completed => println!("Completed. All sets are finished."),
        RunOutcome::Stopped => println!("Stopped."),
    }
}

fn key_loop(token: &RunToken) {
    while !token.aborted() {
        match event::poll(Duration::from_millis(120)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => return,
        }
        let Ok(TermEvent::Key(key)) = event::read() else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => token.abort(),
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => token.abort(),
            (_, KeyCode::Char('p')) | (_, KeyCode::Char(' ')) => {
                token.toggle_paused();
            }
            (_, KeyCode::Char('s')) => token.request_skip(),
            _ => {}
        }
    }
}
