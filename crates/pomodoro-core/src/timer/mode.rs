use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of completed focus sessions between long breaks.
pub const POMODOROS_PER_LONG_BREAK: u32 = 4;

/// The three timer phases.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Fixed session length in whole seconds.
    pub const fn duration_secs(self) -> u32 {
        match self {
            Mode::Focus => 25 * 60,
            Mode::ShortBreak => 5 * 60,
            Mode::LongBreak => 15 * 60,
        }
    }

    /// CSS color token used to theme the display for this mode.
    pub const fn theme_color(self) -> &'static str {
        match self {
            Mode::Focus => "var(--google-blue)",
            Mode::ShortBreak => "var(--google-green)",
            Mode::LongBreak => "var(--google-yellow)",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Wire name, e.g. `short-break`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    pub const fn is_break(self) -> bool {
        !matches!(self, Mode::Focus)
    }

    /// Lenient lookup by wire name. Unrecognized names resolve to `Focus`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(name, "unknown mode name, falling back to focus");
            Mode::Focus
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Mode::from_str`] for names outside the three known modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode '{}' (expected focus, short-break or long-break)", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(Mode::Focus),
            "short-break" | "short_break" | "short" => Ok(Mode::ShortBreak),
            "long-break" | "long_break" | "long" => Ok(Mode::LongBreak),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_fixed() {
        assert_eq!(Mode::Focus.duration_secs(), 1500);
        assert_eq!(Mode::ShortBreak.duration_secs(), 300);
        assert_eq!(Mode::LongBreak.duration_secs(), 900);
    }

    #[test]
    fn unknown_name_falls_back_to_focus() {
        assert_eq!(Mode::from_name("nap"), Mode::Focus);
        assert_eq!(Mode::from_name("long-break"), Mode::LongBreak);
        assert!("nap".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Mode::ShortBreak).unwrap();
        assert_eq!(json, "\"short-break\"");
        let parsed: Mode = serde_json::from_str("\"long-break\"").unwrap();
        assert_eq!(parsed, Mode::LongBreak);
    }

    #[test]
    fn display_matches_wire_name() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string(), mode.as_str());
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }
}
