//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer modes and their fixed durations
//! - Timer state with its countdown invariants
//! - Session configuration with validation

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Mode
// ============================================================================

/// Duration table in seconds, indexed in `Mode::ALL` order.
const MODE_DURATIONS: [u32; 3] = [25 * 60, 5 * 60, 15 * 60];

/// One of the three fixed timer presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Focused work session (25 minutes)
    Work,
    /// Short break (5 minutes)
    ShortBreak,
    /// Long break (15 minutes)
    LongBreak,
}

impl Mode {
    /// All modes, in duration table order.
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the fixed duration of this mode in seconds.
    pub const fn duration_seconds(self) -> u32 {
        MODE_DURATIONS[self as usize]
    }

    /// Returns the machine name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        }
    }

    /// Returns the human-readable label of the mode.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Work
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected work, short-break or long-break)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(&['-', ' '][..], "_");
        match normalized.as_str() {
            "work" | "pomodoro" | "1" => Ok(Mode::Work),
            "short_break" | "short" | "2" => Ok(Mode::ShortBreak),
            "long_break" | "long" | "3" => Ok(Mode::LongBreak),
            _ => Err(ParseModeError(s.trim().to_string())),
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Read-only view of where a timer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Full duration remaining, not running
    Idle,
    /// Counting down
    Running,
    /// Stopped part-way through
    Paused,
    /// Reached zero
    Completed,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Mutable countdown state of a single timer.
///
/// The fields are only reachable through the methods below, which keep
/// `remaining_seconds` within `[0, mode.duration_seconds()]` and never
/// leave a timer running at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    mode: Mode,
    remaining_seconds: u32,
    running: bool,
}

impl TimerState {
    /// Creates an idle state for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            remaining_seconds: mode.duration_seconds(),
            running: false,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Seconds left in the current countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns true if the countdown is decrementing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Full duration of the current mode in seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.mode.duration_seconds()
    }

    /// Derives the lifecycle phase from the raw fields.
    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.remaining_seconds == 0 {
            Phase::Completed
        } else if self.remaining_seconds == self.duration_seconds() {
            Phase::Idle
        } else {
            Phase::Paused
        }
    }

    /// Starts counting down. Has no effect at zero.
    pub fn start(&mut self) {
        if self.remaining_seconds > 0 {
            self.running = true;
        }
    }

    /// Stops counting down, keeping the remaining time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops and refills the countdown for the current mode.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_seconds();
    }

    /// Switches to another mode, discarding any progress.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if this tick finished the countdown. A stopped timer is
    /// left untouched and never reports completion.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            return true;
        }
        false
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Shortest accepted tick interval.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Longest accepted tick interval.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// How timer updates are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable status lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tick interval outside the accepted range
    #[error("tick interval must be between {min:?} and {max:?}, got {actual:?}")]
    TickIntervalOutOfRange {
        /// Requested interval
        actual: Duration,
        /// Lower bound
        min: Duration,
        /// Upper bound
        max: Duration,
    },
}

/// Configuration for one foreground timer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Mode the timer starts in
    pub initial_mode: Mode,
    /// Whether to start counting down immediately
    pub auto_start: bool,
    /// Whether the session ends after the first completion
    pub exit_on_completion: bool,
    /// Period of the tick source
    pub tick_interval: Duration,
    /// Whether to play the completion chime
    pub sound: bool,
    /// Whether to ring the terminal bell on completion
    pub bell: bool,
    /// Output format of the presenter
    pub output: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Work,
            auto_start: false,
            exit_on_completion: false,
            tick_interval: Duration::from_secs(1),
            sound: true,
            bell: true,
            output: OutputFormat::Text,
        }
    }
}

impl SessionConfig {
    /// Sets the initial mode.
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Sets the tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval < MIN_TICK_INTERVAL || self.tick_interval > MAX_TICK_INTERVAL {
            return Err(ConfigError::TickIntervalOutOfRange {
                actual: self.tick_interval,
                min: MIN_TICK_INTERVAL,
                max: MAX_TICK_INTERVAL,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
