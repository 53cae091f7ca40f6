//! Async session loop.
//!
//! Multiplexes UI commands with tick-source firings. Each trigger runs to
//! completion before the next one is polled, so the controller is only ever
//! touched from this one task.
//!
//! This is the entry point for embedders that talk to the timer purely
//! through a channel. Front ends that need to read the state between
//! commands (the bundled CLI resolves task numbers against it) own the
//! controller instead and run the same `select!` over
//! [`SessionController::next_tick`] and [`SessionController::apply`].

use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use super::controller::{Renderer, SessionController};
use super::engine::TimerState;
use super::mode::Mode;

/// Control requests a UI layer can send into [`run_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    SwitchMode(Mode),
    AddTask(String),
    DeleteTask(Uuid),
    ToggleTask(Uuid),
    /// Repaint without changing state.
    Refresh,
    Shutdown,
}

impl<R: Renderer> SessionController<R> {
    /// Dispatch one command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle(),
            Command::Reset => self.reset(),
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::AddTask(text) => {
                self.add_task(&text);
            }
            Command::DeleteTask(id) => {
                self.delete_task(id);
            }
            Command::ToggleTask(id) => {
                self.toggle_task(id);
            }
            Command::Refresh => self.refresh(),
            Command::Shutdown => {}
        }
    }
}

/// Drive `controller` until [`Command::Shutdown`] arrives or every sender is
/// dropped. Paints the initial state first and returns the final one.
pub async fn run_session<R: Renderer>(
    mut controller: SessionController<R>,
    mut commands: mpsc::Receiver<Command>,
) -> TimerState {
    controller.refresh();
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => {
                    debug!(?command, "command received");
                    controller.apply(command);
                }
            },
            () = controller.next_tick() => {
                controller.handle_tick();
            }
        }
    }
    debug!("session loop finished");
    controller.into_state()
}
