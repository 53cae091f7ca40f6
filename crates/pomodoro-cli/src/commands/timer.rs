use clap::Subcommand;
use pomodoro_core::timer::{format_time, tick, Mode, TimerState};
use serde::Serialize;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Format a number of seconds as MM:SS
    Format {
        seconds: u32,
    },
    /// List the modes with their durations and theme colors
    Modes {
        #[arg(long)]
        json: bool,
    },
    /// Show which mode follows each of the next N completed sessions
    Preview {
        /// Number of completed sessions to simulate
        #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(..=MAX_PREVIEW_CYCLES))]
        cycles: u32,
        /// Mode to start from
        #[arg(long, default_value = "focus")]
        from: String,
        #[arg(long)]
        json: bool,
    },
}

const MAX_PREVIEW_CYCLES: i64 = 10_000;

#[derive(Debug, Serialize)]
struct PreviewStep {
    finished: Mode,
    next: Mode,
    completed_pomodoros: u32,
}

/// Complete `cycles` sessions back to back starting from `from`.
fn preview(from: Mode, cycles: u32) -> Vec<PreviewStep> {
    let mut state = TimerState {
        mode: from,
        ..TimerState::default()
    };
    let mut steps = Vec::new();
    for _ in 0..cycles {
        let finished = state.mode;
        let out = tick(&TimerState {
            remaining_seconds: 1,
            ..state
        });
        state = out.next_state;
        steps.push(PreviewStep {
            finished,
            next: state.mode,
            completed_pomodoros: state.completed_pomodoros,
        });
    }
    steps
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Format { seconds } => {
            println!("{}", format_time(seconds));
        }
        TimerAction::Modes { json } => {
            if json {
                let modes: Vec<_> = Mode::ALL
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "mode": m,
                            "label": m.label(),
                            "duration_secs": m.duration_secs(),
                            "theme_color": m.theme_color(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&modes)?);
            } else {
                for mode in Mode::ALL {
                    println!(
                        "{:<12} {}  {}",
                        mode.as_str(),
                        format_time(mode.duration_secs()),
                        mode.theme_color()
                    );
                }
            }
        }
        TimerAction::Preview { cycles, from, json } => {
            let from: Mode = from.parse()?;
            let steps = preview(from, cycles);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for (i, step) in steps.iter().enumerate() {
                    println!(
                        "{:>3}. {} -> {}  (pomodoros: {})",
                        i + 1,
                        step.finished,
                        step.next,
                        step.completed_pomodoros
                    );
                }
            }
        }
    }
    Ok(())
}
