//! Interactive control input for the Pomodoro Timer CLI.
//!
//! Each line typed on stdin is one command. Parsing is case-insensitive
//! and ignores surrounding whitespace.

use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::SessionCommand;
use crate::types::{Mode, ParseModeError};

use super::display::Display;

/// Help text listing the interactive commands.
pub const HELP_TEXT: &str = "\
Commands:
  start, s             start or resume the countdown
  pause, p             pause the countdown
  reset, r             refill the countdown for the current mode
  work, w, 1           switch to Pomodoro (25:00)
  short, 2             switch to Short Break (5:00)
  long, 3              switch to Long Break (15:00)
  mode <name>          switch to the named mode
  status, st           show the current state
  quit, q              exit
  help, h, ?           show this help";

// ============================================================================
// Parsing
// ============================================================================

/// Input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line is not a known command
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    /// `mode` without a mode name
    #[error("missing mode name (expected work, short-break or long-break)")]
    MissingMode,

    /// `mode` with an unrecognized name
    #[error(transparent)]
    InvalidMode(#[from] ParseModeError),
}

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    /// A command for the session
    Command(SessionCommand),
    /// A request to print the help text
    Help,
    /// A blank line
    Empty,
}

impl FromStr for InputLine {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(InputLine::Empty);
        }

        let lower = line.to_ascii_lowercase();
        let mut words = lower.split_whitespace();
        let head = words.next().unwrap_or_default();

        let command = match head {
            "start" | "s" => SessionCommand::Start,
            "pause" | "p" => SessionCommand::Pause,
            "reset" | "r" => SessionCommand::Reset,
            "work" | "w" | "1" => SessionCommand::SetMode(Mode::Work),
            "short" | "short-break" | "2" => SessionCommand::SetMode(Mode::ShortBreak),
            "long" | "long-break" | "3" => SessionCommand::SetMode(Mode::LongBreak),
            "status" | "st" => SessionCommand::Status,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            "help" | "h" | "?" => return Ok(InputLine::Help),
            "mode" => {
                let rest: Vec<&str> = words.collect();
                if rest.is_empty() {
                    return Err(InputError::MissingMode);
                }
                return Ok(InputLine::Command(SessionCommand::SetMode(
                    rest.join(" ").parse()?,
                )));
            }
            _ => return Err(InputError::UnknownCommand(line.to_string())),
        };

        if words.next().is_some() {
            return Err(InputError::UnknownCommand(line.to_string()));
        }
        Ok(InputLine::Command(command))
    }
}

// ============================================================================
// Stdin Reader
// ============================================================================

/// Spawns a thread that forwards commands read from stdin to the session.
///
/// The thread exits after `quit`, at end of input, or once the session has
/// dropped its receiver.
pub fn spawn_stdin_reader(tx: mpsc::Sender<SessionCommand>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            forward_lines(stdin.lock(), &tx);
            debug!("stdin reader finished");
        })
}

/// Parses lines from `reader` and forwards the commands over `tx`.
///
/// Returns the number of commands forwarded.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<SessionCommand>) -> usize {
    let mut forwarded = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                Display::show_error(&format!("failed to read input: {}", e));
                break;
            }
        }

        // Invalid UTF-8 becomes U+FFFD and fails to parse like any other typo.
        let line = String::from_utf8_lossy(&buf);

        match line.parse::<InputLine>() {
            Ok(InputLine::Command(command)) => {
                if tx.blocking_send(command).is_err() {
                    break;
                }
                forwarded += 1;
                if command == SessionCommand::Quit {
                    break;
                }
            }
            Ok(InputLine::Help) => Display::show_help(HELP_TEXT),
            Ok(InputLine::Empty) => {}
            Err(e) => Display::show_error(&e.to_string()),
        }
    }

    forwarded
}

// ============================================================================
// Tests
// ============================================================================
