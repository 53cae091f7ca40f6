//! Display data derived from a state snapshot.
//!
//! Renderers paint from a [`TimerView`] instead of recomputing text and
//! geometry themselves.

use std::f64::consts::PI;

use serde::Serialize;

use super::engine::{format_time, progress_ratio, TimerState};
use super::mode::Mode;

/// Radius of the circular progress ring, in px.
pub const DEFAULT_RING_RADIUS: f64 = 135.0;

/// Widest text progress bar [`TimerView::progress_bar`] will draw.
pub const MAX_PROGRESS_BAR_WIDTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub mode: Mode,
    pub time_text: String,
    pub progress: f64,
    /// Stroke offset of the ring: circumference scaled by progress.
    pub ring_offset: f64,
    pub theme_color: &'static str,
    pub mode_label: &'static str,
    pub status_label: &'static str,
    pub is_running: bool,
    pub completed_pomodoros: u32,
    pub task_count: usize,
    pub tasks_done: usize,
}

impl TimerView {
    pub fn from_state(state: &TimerState, ring_radius: f64) -> Self {
        let progress = progress_ratio(state);
        Self {
            mode: state.mode,
            time_text: format_time(state.remaining_seconds),
            progress,
            ring_offset: 2.0 * PI * ring_radius * progress,
            theme_color: state.mode.theme_color(),
            mode_label: state.mode.label(),
            status_label: status_label(state),
            is_running: state.is_running,
            completed_pomodoros: state.completed_pomodoros,
            task_count: state.tasks.len(),
            tasks_done: state.tasks.iter().filter(|t| t.is_done).count(),
        }
    }

    /// Text progress bar `width` cells wide, capped at [`MAX_PROGRESS_BAR_WIDTH`].
    pub fn progress_bar(&self, width: usize) -> String {
        let width = width.min(MAX_PROGRESS_BAR_WIDTH);
        let filled = ((self.progress * width as f64).round() as usize).min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

pub fn status_label(state: &TimerState) -> &'static str {
    match (state.mode, state.is_running) {
        (Mode::Focus, true) => "Go go go!",
        (Mode::Focus, false) => "Ready to focus?",
        _ => "Take a breather",
    }
}
