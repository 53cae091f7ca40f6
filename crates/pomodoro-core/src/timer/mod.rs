mod controller;
mod engine;
mod mode;
mod session;
mod view;

pub use controller::{Renderer, SessionController, SessionControllerBuilder, TICK_PERIOD};
pub use engine::{
    add_task, delete_task, duration_for, duration_for_name, format_time, next_mode_after,
    progress_ratio, reset, switch_mode, tick, tick_with, toggle_task, with_running,
    AdvancePolicy, TickOutcome, TimerState,
};
pub use mode::{Mode, UnknownMode, POMODOROS_PER_LONG_BREAK};
pub use session::{run_session, Command};
pub use view::{status_label, TimerView, DEFAULT_RING_RADIUS, MAX_PROGRESS_BAR_WIDTH};
