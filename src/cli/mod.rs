//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive control commands read from stdin
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, ModeArg, RunArgs};
pub use display::{format_clock, progress_ratio, Display};
pub use input::{forward_lines, spawn_stdin_reader, InputError, InputLine};
