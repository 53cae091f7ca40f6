use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::Mode;

/// Every state-changing controller operation produces an Event.
/// Renderers receive them through [`Renderer::on_event`].
///
/// [`Renderer::on_event`]: crate::timer::Renderer::on_event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        at: DateTime<Utc>,
    },
    /// A session ran out. This is the alert signal.
    CycleCompleted {
        finished: Mode,
        next: Mode,
        completed_pomodoros: u32,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: Uuid,
        text: String,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: Uuid,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: Uuid,
        is_done: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at }
            | Event::ModeSwitched { at, .. }
            | Event::CycleCompleted { at, .. }
            | Event::TaskAdded { at, .. }
            | Event::TaskDeleted { at, .. }
            | Event::TaskToggled { at, .. } => *at,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Event::CycleCompleted { .. })
    }
}
