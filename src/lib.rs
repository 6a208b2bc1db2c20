//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine: a countdown state machine over three fixed modes
//! - Session: the tokio tick source and command loop hosting the engine
//! - Completion alerts (terminal message, audible chime)
//! - CLI command parsing and display utilities
//! - Type definitions for modes, state and configuration

pub mod cli;
pub mod engine;
pub mod notify;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, Mode, OutputFormat, ParseModeError, Phase, SessionConfig, TimerState};

pub use engine::{Completion, Session, SessionCommand, SessionError, TimerEngine, TimerEvent};

pub use notify::{
    try_create_chime, ChimeNotifier, MockNotifier, Notifier, NotifyError, TerminalNotifier,
};
