//! Terminal presentation: the progress sink and the bell cues.
//!
//! Interactive mode redraws a single status line in place. JSON mode emits
//! one object per line so other tools can follow along; events serialize
//! as-is, snapshots are wrapped with `"type": "progress"`.

use std::io::Write;

use serde::Serialize;
use setpace_core::{CueEmitter, Event, PhaseSnapshot, ProgressSink};

const BAR_WIDTH: usize = 24;
const LINE_WIDTH: usize = 78;

pub struct TerminalSink {
    json: bool,
    raw: bool,
}

impl TerminalSink {
    /// `raw` marks that the terminal is in raw mode, where line breaks need
    /// an explicit carriage return.
    pub fn new(json: bool, raw: bool) -> Self {
        Self { json, raw }
    }

    fn line(&self, text: &str) {
        // Pad over whatever the in-place status line left behind.
        let padded = format!("{text:<LINE_WIDTH$}");
        if self.raw {
            print!("\r{padded}\r\n");
        } else {
            println!("{padded}");
        }
        let _ = std::io::stdout().flush();
    }
}

#[derive(Serialize)]
struct ProgressLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    snapshot: &'a PhaseSnapshot,
}

fn bar(percentage: f64) -> String {
    let filled = (percentage / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl ProgressSink for TerminalSink {
    fn snapshot(&self, snapshot: &PhaseSnapshot) {
        if self.json {
            if let Ok(line) = serde_json::to_string(&ProgressLine {
                kind: "progress",
                snapshot,
            }) {
                println!("{line}");
            }
            return;
        }
        let hold = if snapshot.holding { " hold" } else { "" };
        let text = format!(
            "{} {:>3.0}%{} | sets {:>3.0}% | {}",
            bar(snapshot.percentage),
            snapshot.percentage,
            hold,
            snapshot.sets_completed_ratio * 100.0,
            snapshot.status
        );
        print!("\r{text:<LINE_WIDTH$}");
        let _ = std::io::stdout().flush();
    }

    fn event(&self, event: &Event) {
        if self.json {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
            return;
        }
        match event {
            Event::RunStarted { label, config, .. } => {
                let sides = if config.both_sides { ", both sides" } else { "" };
                self.line(&format!(
                    "{label}: {} sets of {} reps{sides}",
                    config.sets, config.reps
                ));
            }
            Event::SetCompleted { set, of, .. } => {
                self.line(&format!("Set {set} of {of} complete."));
            }
            _ => {}
        }
    }
}

/// Cues through the terminal bell. The hold opening rings twice so it can
/// be told apart without looking.
pub struct BellCues;

impl BellCues {
    fn ring(&self, times: usize) {
        let mut out = std::io::stdout();
        for _ in 0..times {
            let _ = out.write_all(b"\x07");
        }
        let _ = out.flush();
    }
}

impl CueEmitter for BellCues {
    fn tick(&self) {
        self.ring(1);
    }

    fn rep_start(&self) {
        self.ring(1);
    }

    fn hold_start(&self) {
        self.ring(2);
    }

    fn hold_end(&self) {
        self.ring(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_with_percentage() {
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        let half = bar(50.0);
        assert_eq!(half.matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn bar_clamps_overshoot() {
        assert_eq!(bar(250.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn progress_line_is_tagged() {
        let snapshot = PhaseSnapshot {
            phase: setpace_core::PhaseKind::Rest,
            label: "Squat".into(),
            side: None,
            remaining: 10,
            percentage: 25.0,
            sets_completed_ratio: 0.5,
            status: "Next: Set 2 of 3".into(),
            holding: false,
        };
        let line = serde_json::to_string(&ProgressLine {
            kind: "progress",
            snapshot: &snapshot,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "progress");
        assert_eq!(value["phase"], "rest");
        assert_eq!(value["remaining"], 10);
    }
}
