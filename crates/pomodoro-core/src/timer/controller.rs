//! Session controller.
//!
//! Holds the current [`TimerState`] and the one periodic tick source. Every
//! control call swaps the state through an engine function and repaints via
//! the caller's [`Renderer`].
//!
//! The controller never spawns anything. Whoever drives it awaits
//! [`SessionController::next_tick`] and feeds the firing back through
//! [`SessionController::handle_tick`]; [`run_session`] does exactly that.
//!
//! [`run_session`]: super::run_session

use std::time::Duration;

use chrono::Utc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::engine::{self, AdvancePolicy, TickOutcome, TimerState};
use super::mode::Mode;
use crate::error::{CoreError, Result};
use crate::events::Event;

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receives state snapshots to paint.
///
/// Any `FnMut(&TimerState)` closure is a renderer.
pub trait Renderer {
    fn render(&mut self, state: &TimerState);

    /// Called once per state-changing operation, before the matching render.
    fn on_event(&mut self, _event: &Event) {}
}

impl<F> Renderer for F
where
    F: FnMut(&TimerState),
{
    fn render(&mut self, state: &TimerState) {
        self(state)
    }
}

pub struct SessionController<R> {
    state: TimerState,
    renderer: R,
    /// `Some` exactly while running.
    ticker: Option<Interval>,
    period: Duration,
    policy: AdvancePolicy,
}

impl<R: Renderer> SessionController<R> {
    pub fn builder() -> SessionControllerBuilder<R> {
        SessionControllerBuilder::default()
    }

    /// Controller over a fresh state with default period and policy.
    pub fn new(renderer: R) -> Self {
        Self {
            state: TimerState::default(),
            renderer,
            ticker: None,
            period: TICK_PERIOD,
            policy: AdvancePolicy::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn into_state(self) -> TimerState {
        self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Paint the current state without changing it.
    pub fn refresh(&mut self) {
        self.renderer.render(&self.state);
    }

    /// Begin ticking. No-op while already running.
    ///
    /// Must be called from within a Tokio runtime. The first firing lands one
    /// full period from now.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("start ignored, tick source already active");
            return;
        }
        self.state = engine::with_running(&self.state, true);
        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
        debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "timer started");
        self.emit(Event::TimerStarted {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        });
        self.renderer.render(&self.state);
    }

    /// Stop ticking and keep the remaining time. No-op when not running.
    pub fn pause(&mut self) {
        if !self.stop_ticker() {
            debug!("pause ignored, timer not running");
            return;
        }
        self.state = engine::with_running(&self.state, false);
        debug!(remaining = self.state.remaining_seconds, "timer paused");
        self.emit(Event::TimerPaused {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        });
        self.renderer.render(&self.state);
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) {
        if self.ticker.is_some() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Back to a stopped, full focus session. Counters and tasks survive.
    pub fn reset(&mut self) {
        self.stop_ticker();
        self.state = engine::reset(&self.state);
        debug!("timer reset");
        self.emit(Event::TimerReset { at: Utc::now() });
        self.renderer.render(&self.state);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.stop_ticker();
        let from = self.state.mode;
        self.state = engine::switch_mode(&self.state, mode);
        debug!(%from, to = %mode, "mode switched");
        self.emit(Event::ModeSwitched {
            from,
            to: mode,
            at: Utc::now(),
        });
        self.renderer.render(&self.state);
    }

    /// Returns the new task id, or `None` when `text` is blank.
    pub fn add_task(&mut self, text: &str) -> Option<Uuid> {
        let next = engine::add_task(&self.state, text);
        if next.tasks.len() == self.state.tasks.len() {
            debug!("blank task ignored");
            return None;
        }
        self.state = next;
        let task = self.state.tasks.last()?.clone();
        self.emit(Event::TaskAdded {
            id: task.id,
            text: task.text,
            at: Utc::now(),
        });
        self.renderer.render(&self.state);
        Some(task.id)
    }

    /// Returns false when no task has `id`.
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        if !self.state.tasks.iter().any(|t| t.id == id) {
            return false;
        }
        self.state = engine::delete_task(&self.state, id);
        self.emit(Event::TaskDeleted { id, at: Utc::now() });
        self.renderer.render(&self.state);
        true
    }

    /// Returns false when no task has `id`.
    pub fn toggle_task(&mut self, id: Uuid) -> bool {
        self.state = engine::toggle_task(&self.state, id);
        let Some(is_done) = self
            .state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.is_done)
        else {
            return false;
        };
        self.emit(Event::TaskToggled {
            id,
            is_done,
            at: Utc::now(),
        });
        self.renderer.render(&self.state);
        true
    }

    // ── Tick source ──────────────────────────────────────────────────

    /// Resolves at the next firing of the tick source. Pending forever while
    /// stopped, so it can sit in a `select!` next to a command channel.
    pub async fn next_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Apply one firing. Returns true when it completed the session, in which
    /// case the tick source has been stopped and the state rendered twice.
    pub fn handle_tick(&mut self) -> bool {
        if self.ticker.is_none() {
            debug!("stale tick dropped");
            return false;
        }
        let finished = self.state.mode;
        let TickOutcome {
            next_state,
            completed_cycle,
        } = engine::tick_with(&self.state, self.policy);
        self.state = next_state;
        self.renderer.render(&self.state);

        if completed_cycle {
            self.stop_ticker();
            info!(
                %finished,
                next = %self.state.mode,
                completed = self.state.completed_pomodoros,
                "session completed"
            );
            self.emit(Event::CycleCompleted {
                finished,
                next: self.state.mode,
                completed_pomodoros: self.state.completed_pomodoros,
                at: Utc::now(),
            });
            self.renderer.render(&self.state);
        }
        completed_cycle
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stop_ticker(&mut self) -> bool {
        self.ticker.take().is_some()
    }

    fn emit(&mut self, event: Event) {
        self.renderer.on_event(&event);
    }
}

/// Builder for [`SessionController`]. A renderer is mandatory.
pub struct SessionControllerBuilder<R> {
    renderer: Option<R>,
    state: TimerState,
    period: Duration,
    policy: AdvancePolicy,
}

impl<R> Default for SessionControllerBuilder<R> {
    fn default() -> Self {
        Self {
            renderer: None,
            state: TimerState::default(),
            period: TICK_PERIOD,
            policy: AdvancePolicy::default(),
        }
    }
}

impl<R: Renderer> SessionControllerBuilder<R> {
    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Start from an existing state. It is loaded stopped.
    pub fn state(mut self, state: TimerState) -> Self {
        self.state = engine::with_running(&state, false);
        self
    }

    /// Tick period. Zero is replaced with the default one second.
    pub fn period(mut self, period: Duration) -> Self {
        self.period = if period.is_zero() { TICK_PERIOD } else { period };
        self
    }

    pub fn policy(mut self, policy: AdvancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<SessionController<R>> {
        let renderer = self.renderer.ok_or(CoreError::MissingRenderer)?;
        Ok(SessionController {
            state: self.state,
            renderer,
            ticker: None,
            period: self.period,
            policy: self.policy,
        })
    }
}
