//! # Pomodoro Core Library
//!
//! Core logic for a three-mode Pomodoro countdown timer: focus (25 min),
//! short break (5 min) and long break (15 min), with a long break after
//! every fourth completed focus session.
//!
//! ## Architecture
//!
//! - **Timer Engine**: pure transition functions over an immutable
//!   [`TimerState`] snapshot
//! - **Session Controller**: owns the single one-second tick source and
//!   repaints through a caller-supplied [`Renderer`]
//! - **Session loop**: [`run_session`] multiplexes channel commands with ticks,
//!   for embedders that never need to read the state between commands
//! - **Storage**: TOML-based configuration (timer state itself is never
//!   persisted)
//!
//! ## Key Components
//!
//! - [`SessionController`]: start / pause / reset / switch mode / tasks
//! - [`TimerView`]: display-ready text and ring geometry
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use task::Task;
pub use timer::{
    run_session, AdvancePolicy, Command, Mode, Renderer, SessionController, TickOutcome,
    TimerState, TimerView,
};
