//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{Mode, OutputFormat, SessionConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - work, short break and long break countdowns
#[derive(Parser, Debug)]
#[command(
    name = "pomotimer",
    version,
    about = "Terminal Pomodoro timer",
    long_about = "A countdown timer with three fixed modes: Pomodoro (25 min), \
                  Short Break (5 min) and Long Break (15 min).\n\
                  Control it by typing commands (start, pause, reset, work, short, long, quit).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer in the foreground
    Run(RunArgs),

    /// Show the fixed duration of each mode
    Durations,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Mode names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Pomodoro work session (25 minutes)
    Work,
    /// Short break (5 minutes)
    ShortBreak,
    /// Long break (15 minutes)
    LongBreak,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => Mode::Work,
            ModeArg::ShortBreak => Mode::ShortBreak,
            ModeArg::LongBreak => Mode::LongBreak,
        }
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Mode to start in
    #[arg(short, long, value_enum, default_value = "work")]
    pub mode: ModeArg,

    /// Start counting down immediately
    #[arg(short, long)]
    pub start: bool,

    /// Exit when the countdown completes
    #[arg(long)]
    pub once: bool,

    /// Print one JSON object per event instead of status lines
    #[arg(long)]
    pub json: bool,

    /// Disable the completion chime
    #[arg(long)]
    pub no_sound: bool,

    /// Disable the terminal bell
    #[arg(long)]
    pub no_bell: bool,

    /// Tick period in milliseconds
    #[arg(
        long,
        hide = true,
        default_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub tick_ms: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            mode: ModeArg::Work,
            start: false,
            once: false,
            json: false,
            no_sound: false,
            no_bell: false,
            tick_ms: 1000,
        }
    }
}

impl RunArgs {
    /// Builds the session configuration for these arguments.
    pub fn to_config(&self) -> SessionConfig {
        SessionConfig {
            initial_mode: self.mode.into(),
            auto_start: self.start,
            exit_on_completion: self.once,
            tick_interval: Duration::from_millis(self.tick_ms),
            sound: !self.no_sound,
            bell: !self.no_bell,
            output: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
