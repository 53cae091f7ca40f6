//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify its output.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command with `stdin` piped in and return (code, stdout, stderr).
fn run_cli_with_input(args: &[&str], stdin: &str) -> (i32, String, String) {
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    run_cli_in(config_dir.path(), args, stdin)
}

fn run_cli_in(config_dir: &std::path::Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomodoro-cli"))
        .args(args)
        .env("POMODORO_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(args, "")
}

#[test]
fn test_timer_format() {
    let (code, stdout, _) = run_cli(&["timer", "format", "3661"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "61:01");
}

#[test]
fn test_timer_modes_json() {
    let (code, stdout, _) = run_cli(&["timer", "modes", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let modes = parsed.as_array().unwrap();
    assert_eq!(modes.len(), 3);
    assert_eq!(modes[1]["mode"], "short-break");
    assert_eq!(modes[1]["duration_secs"], 300);
}

#[test]
fn test_timer_preview_fourth_is_long_break() {
    let (code, stdout, _) = run_cli(&["timer", "preview", "--cycles", "7"]);
    assert_eq!(code, 0);
    let last = stdout.lines().last().unwrap();
    assert!(last.contains("focus -> long-break"), "got: {last}");
}

#[test]
fn test_timer_preview_rejects_unknown_mode() {
    let (code, _, stderr) = run_cli(&["timer", "preview", "--from", "nap"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown mode"));
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_in(dir.path(), &["config", "set", "timer.auto_advance", "false"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli_in(dir.path(), &["config", "get", "timer.auto_advance"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "false");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "set", "ui.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_run_paints_initial_frame() {
    let (code, stdout, _) = run_cli_with_input(&["run"], "quit\n");
    assert_eq!(code, 0);
    let first = stdout.lines().next().unwrap();
    assert!(first.starts_with("[Focus] 25:00"), "got: {first}");
    assert!(first.contains("Ready to focus?"));
}

#[test]
fn test_run_mode_and_tasks() {
    let input = "add buy milk\nadd   \ndone 1\nmode short-break\ntasks\nquit\n";
    let (code, stdout, _) = run_cli_with_input(&["run"], input);
    assert_eq!(code, 0);
    assert!(stdout.contains("[Short Break] 05:00"));
    assert!(stdout.contains("tasks: 1/1"));
    assert!(stdout.contains("[x] buy milk"));
}

#[test]
fn test_run_json_frames() {
    let (code, stdout, _) = run_cli_with_input(&["run", "--json"], "mode long-break\nquit\n");
    assert_eq!(code, 0);
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1]["time_text"], "15:00");
    assert_eq!(frames[1]["theme_color"], "var(--google-yellow)");
}

#[test]
fn test_run_unknown_command_keeps_going() {
    let (code, stdout, stderr) = run_cli_with_input(&["run"], "dance\nstatus\nquit\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("unknown command 'dance'"));
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_timer_preview_rejects_huge_cycle_count() {
    let (code, stdout, stderr) = run_cli(&["timer", "preview", "--cycles", "4000000000"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--cycles"));
}

#[test]
fn test_broken_config_is_reported_and_defaults_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "timer = [").unwrap();
    let (code, stdout, stderr) = run_cli_in(dir.path(), &["timer", "format", "59"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "00:59");
    assert!(stderr.contains("falling back to default config"), "got: {stderr}");
}
