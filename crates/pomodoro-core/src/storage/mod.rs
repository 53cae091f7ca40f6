mod config;

pub use config::{Config, NotificationsConfig, TimerConfig, UiConfig};

use std::path::PathBuf;

/// Returns the configuration directory, creating it if needed.
///
/// `POMODORO_CONFIG_DIR` overrides the default `~/.config/pomodoro/`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("POMODORO_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pomodoro"),
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
