use clap::Subcommand;
use setpace_core::Catalog;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List all exercises
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one exercise in detail
    Show {
        /// Exercise name (case-insensitive)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load()?;
    match action {
        ExerciseAction::List { json } => {
            if json {
                let out = serde_json::to_string_pretty(&catalog.exercises)?;
                println!("{out}");
            } else {
                for exercise in &catalog.exercises {
                    let sides = if exercise.perform_both_sides {
                        ", both sides"
                    } else {
                        ""
                    };
                    println!(
                        "{}: {} sets of {} reps{}",
                        exercise.name, exercise.sets, exercise.reps, sides
                    );
                }
            }
        }
        ExerciseAction::Show { name, json } => {
            let exercise = catalog.find(&name)?;
            if json {
                let out = serde_json::to_string_pretty(exercise)?;
                println!("{out}");
            } else {
                println!("{}", exercise.name);
                if !exercise.description.is_empty() {
                    println!("  {}", exercise.description);
                }
                println!("  sets: {}", exercise.sets);
                println!("  reps: {}", exercise.reps);
                println!("  rep duration: {}s", exercise.rep_duration_secs);
                println!("  hold: {}s", exercise.hold_secs);
                println!("  rest: {}s", exercise.rest_secs);
                println!("  both sides: {}", exercise.perform_both_sides);
                if exercise.perform_both_sides {
                    println!("  side switch: {}s", exercise.side_switch_secs);
                }
            }
        }
    }
    Ok(())
}
