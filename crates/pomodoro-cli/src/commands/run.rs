//! Interactive terminal session.
//!
//! Reads one command per stdin line and paints a status line for every
//! render the controller asks for. Input and ticks share one task, so task
//! numbers always refer to the state the user last saw.

use std::io::Write;

use clap::Args;
use pomodoro_core::{Command, Config, Event, Mode, Renderer, SessionController, TimerState, TimerView};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  start | pause | toggle | reset
  mode <focus|short-break|long-break>
  add <text>     add a task
  done <n>       toggle task n
  rm <n>         delete task n
  tasks          list tasks
  status         repaint
  quit";

#[derive(Args)]
pub struct RunArgs {
    /// Emit each frame as a JSON object instead of a status line
    #[arg(long)]
    json: bool,
    /// Suppress the "Time is up!" alert
    #[arg(long)]
    no_alert: bool,
}

/// Paints frames to `out` (stdout in the real session).
struct TerminalRenderer<W> {
    out: W,
    json: bool,
    alert: bool,
    ring_radius: f64,
    bar_width: usize,
    /// Set once a write fails; nothing is written afterwards.
    closed: bool,
}

impl<W: Write> TerminalRenderer<W> {
    fn line(&self, state: &TimerState) -> String {
        let view = TimerView::from_state(state, self.ring_radius);
        if self.json {
            return serde_json::to_string(&view).unwrap_or_default();
        }
        format!(
            "[{}] {}  {} {:>3.0}%  {}  (pomodoros: {}, tasks: {}/{})",
            view.mode_label,
            view.time_text,
            view.progress_bar(self.bar_width),
            view.progress * 100.0,
            view.status_label,
            view.completed_pomodoros,
            view.tasks_done,
            view.task_count,
        )
    }

    fn write_line(&mut self, line: &str) {
        if self.closed {
            return;
        }
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "output closed, ending session");
            self.closed = true;
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &TimerState) {
        let line = self.line(state);
        self.write_line(&line);
    }

    fn on_event(&mut self, event: &Event) {
        tracing::debug!(?event, "timer event");
        if self.alert && event.is_alert() {
            self.write_line("\x07Time is up!");
        }
    }
}

/// Outcome of parsing one input line.
#[derive(Debug, PartialEq)]
enum Input {
    Command(Command),
    ListTasks,
    Help,
    Empty,
}

/// Task numbers are 1-based positions in the latest snapshot.
fn parse_line(line: &str, state: &TimerState) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let task_id = |arg: &str| {
        let n: usize = arg
            .parse()
            .map_err(|_| format!("expected a task number, got '{arg}'"))?;
        n.checked_sub(1)
            .and_then(|i| state.tasks.get(i))
            .map(|t| t.id)
            .ok_or_else(|| format!("no task #{n}"))
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "start" => Input::Command(Command::Start),
        "pause" => Input::Command(Command::Pause),
        "toggle" => Input::Command(Command::Toggle),
        "reset" => Input::Command(Command::Reset),
        "mode" => Input::Command(Command::SwitchMode(Mode::from_name(rest))),
        "add" => Input::Command(Command::AddTask(rest.to_string())),
        "done" => Input::Command(Command::ToggleTask(task_id(rest)?)),
        "rm" | "delete" => Input::Command(Command::DeleteTask(task_id(rest)?)),
        "tasks" => Input::ListTasks,
        "status" => Input::Command(Command::Refresh),
        "quit" | "exit" | "q" => Input::Command(Command::Shutdown),
        "help" | "?" => Input::Help,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(input)
}

fn print_tasks(state: &TimerState) {
    if state.tasks.is_empty() {
        println!("No active tasks");
        return;
    }
    for (i, task) in state.tasks.iter().enumerate() {
        let mark = if task.is_done { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", i + 1, task.text);
    }
}

async fn session(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = TerminalRenderer {
        out: std::io::stdout(),
        json: args.json,
        alert: config.notifications.alert_on_complete && !args.no_alert,
        ring_radius: config.ui.ring_radius,
        bar_width: config.ui.progress_bar_width,
        closed: false,
    };
    let mut controller = SessionController::builder()
        .renderer(renderer)
        .period(config.tick_period())
        .policy(config.advance_policy())
        .build()?;
    controller.refresh();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !controller.renderer().closed {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line, controller.state()) {
                    Ok(Input::Command(Command::Shutdown)) => break,
                    Ok(Input::Command(command)) => controller.apply(command),
                    Ok(Input::ListTasks) => print_tasks(controller.state()),
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Empty) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
            () = controller.next_tick() => {
                controller.handle_tick();
            }
        }
    }

    let state = controller.into_state();
    tracing::info!(
        completed = state.completed_pomodoros,
        tasks = state.tasks.len(),
        "session ended"
    );
    Ok(())
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(args, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_core::timer::add_task;

    #[test]
    fn parses_controls() {
        let state = TimerState::default();
        assert_eq!(parse_line("start", &state), Ok(Input::Command(Command::Start)));
        assert_eq!(parse_line("  PAUSE ", &state), Ok(Input::Command(Command::Pause)));
        assert_eq!(
            parse_line("mode long-break", &state),
            Ok(Input::Command(Command::SwitchMode(Mode::LongBreak)))
        );
        assert_eq!(
            parse_line("mode nap", &state),
            Ok(Input::Command(Command::SwitchMode(Mode::Focus)))
        );
        assert_eq!(parse_line("", &state), Ok(Input::Empty));
        assert!(parse_line("dance", &state).is_err());
    }

    #[test]
    fn resolves_task_numbers() {
        let state = add_task(&add_task(&TimerState::default(), "one"), "two");
        let second = state.tasks[1].id;
        assert_eq!(
            parse_line("done 2", &state),
            Ok(Input::Command(Command::ToggleTask(second)))
        );
        assert!(parse_line("rm 0", &state).is_err());
        assert!(parse_line("rm 3", &state).is_err());
        assert!(parse_line("done x", &state).is_err());
    }

    struct ClosedPipe {
        writes: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.writes += 1;
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn renderer<W: Write>(out: W) -> TerminalRenderer<W> {
        TerminalRenderer {
            out,
            json: false,
            alert: true,
            ring_radius: 135.0,
            bar_width: 10,
            closed: false,
        }
    }

    #[test]
    fn writes_status_lines() {
        let mut r = renderer(Vec::new());
        r.render(&TimerState::default());
        let text = String::from_utf8(r.out).unwrap();
        assert!(text.starts_with("[Focus] 25:00"));
        assert!(text.ends_with("Ready to focus?  (pomodoros: 0, tasks: 0/0)\n"));
    }

    #[test]
    fn broken_pipe_marks_renderer_closed() {
        let mut r = renderer(ClosedPipe { writes: 0 });
        r.render(&TimerState::default());
        assert!(r.closed);
        let writes = r.out.writes;
        r.render(&TimerState::default());
        assert_eq!(r.out.writes, writes);
    }

    #[test]
    fn add_keeps_inner_spaces() {
        let state = TimerState::default();
        assert_eq!(
            parse_line("add buy  oat milk ", &state),
            Ok(Input::Command(Command::AddTask("buy  oat milk".into())))
        );
    }
}
