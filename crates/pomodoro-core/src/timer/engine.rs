//! Timer state engine.
//!
//! Pure transition functions over [`TimerState`]. Nothing here owns a clock
//! or a scheduler: the caller (normally [`SessionController`]) decides when a
//! tick happens and swaps in the returned state wholesale.
//!
//! ## Mode advancement
//!
//! ```text
//! focus --(n % 4 != 0)--> short-break --> focus
//! focus --(n % 4 == 0)--> long-break  --> focus
//! ```
//!
//! where `n` is the completed focus count after the session that just ended.
//!
//! [`SessionController`]: super::SessionController

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mode::{Mode, POMODOROS_PER_LONG_BREAK};
use crate::task::Task;

/// Snapshot of the whole timer. Rebuilt, never patched, on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    /// Always within `0..=mode.duration_secs()`.
    pub remaining_seconds: u32,
    /// Completed focus sessions.
    pub completed_pomodoros: u32,
    pub is_running: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            mode: Mode::Focus,
            remaining_seconds: Mode::Focus.duration_secs(),
            completed_pomodoros: 0,
            is_running: false,
            tasks: Vec::new(),
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn time_text(&self) -> String {
        format_time(self.remaining_seconds)
    }

    pub fn progress(&self) -> f64 {
        progress_ratio(self)
    }
}

/// What happens when a session runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancePolicy {
    /// Move on to the next mode (break after focus, focus after a break).
    #[default]
    Auto,
    /// Reload the same mode and wait for a manual mode switch.
    Stay,
}

/// Result of a single [`tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub next_state: TimerState,
    /// True when this tick ended the session.
    pub completed_cycle: bool,
}

pub fn duration_for(mode: Mode) -> u32 {
    mode.duration_secs()
}

/// Duration lookup by wire name; unknown names get the focus duration.
pub fn duration_for_name(name: &str) -> u32 {
    duration_for(Mode::from_name(name))
}

/// Mode that follows `finished`, given the focus count *after* it ended.
pub fn next_mode_after(finished: Mode, completed_pomodoros: u32) -> Mode {
    match finished {
        Mode::Focus if completed_pomodoros > 0
            && completed_pomodoros % POMODOROS_PER_LONG_BREAK == 0 =>
        {
            Mode::LongBreak
        }
        Mode::Focus => Mode::ShortBreak,
        Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
    }
}

/// Select `mode` at its full duration, stopped. Counters and tasks carry over.
pub fn switch_mode(state: &TimerState, mode: Mode) -> TimerState {
    TimerState {
        mode,
        remaining_seconds: duration_for(mode),
        is_running: false,
        ..state.clone()
    }
}

pub fn with_running(state: &TimerState, is_running: bool) -> TimerState {
    TimerState {
        is_running,
        ..state.clone()
    }
}

/// Back to a stopped focus session. Counters and tasks carry over.
pub fn reset(state: &TimerState) -> TimerState {
    switch_mode(state, Mode::Focus)
}

/// Advance one second using the default [`AdvancePolicy::Auto`].
pub fn tick(state: &TimerState) -> TickOutcome {
    tick_with(state, AdvancePolicy::Auto)
}

/// Advance one second.
///
/// The tick that would bring the clock to zero completes the session
/// instead, so `remaining_seconds` is never observed at 0 after a tick.
pub fn tick_with(state: &TimerState, policy: AdvancePolicy) -> TickOutcome {
    if state.remaining_seconds > 1 {
        return TickOutcome {
            next_state: TimerState {
                remaining_seconds: state.remaining_seconds - 1,
                ..state.clone()
            },
            completed_cycle: false,
        };
    }

    let completed_pomodoros = if state.mode == Mode::Focus {
        state.completed_pomodoros.saturating_add(1)
    } else {
        state.completed_pomodoros
    };
    let next_mode = match policy {
        AdvancePolicy::Auto => next_mode_after(state.mode, completed_pomodoros),
        AdvancePolicy::Stay => state.mode,
    };

    TickOutcome {
        next_state: TimerState {
            mode: next_mode,
            remaining_seconds: duration_for(next_mode),
            completed_pomodoros,
            is_running: false,
            tasks: state.tasks.clone(),
        },
        completed_cycle: true,
    }
}

/// Zero-padded `MM:SS`. Minutes are not capped at 59.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Fraction of the current session already elapsed, in `0.0..=1.0`.
pub fn progress_ratio(state: &TimerState) -> f64 {
    let total = duration_for(state.mode);
    if total == 0 {
        return 0.0;
    }
    (1.0 - f64::from(state.remaining_seconds) / f64::from(total)).clamp(0.0, 1.0)
}

/// Append a task. Blank text leaves the state unchanged.
pub fn add_task(state: &TimerState, text: &str) -> TimerState {
    let Some(task) = Task::new(text) else {
        return state.clone();
    };
    let mut tasks = state.tasks.clone();
    tasks.push(task);
    TimerState {
        tasks,
        ..state.clone()
    }
}

pub fn delete_task(state: &TimerState, id: Uuid) -> TimerState {
    TimerState {
        tasks: state.tasks.iter().filter(|t| t.id != id).cloned().collect(),
        ..state.clone()
    }
}

/// Flip `is_done` on the matching task; unknown ids are ignored.
pub fn toggle_task(state: &TimerState, id: Uuid) -> TimerState {
    TimerState {
        tasks: state
            .tasks
            .iter()
            .map(|t| if t.id == id { t.toggled() } else { t.clone() })
            .collect(),
        ..state.clone()
    }
}
