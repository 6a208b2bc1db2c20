//! Terminal completion alert.
//!
//! Writes a short "Time's up!" line to stderr, optionally preceded by the
//! terminal bell character.

use std::io::{self, Write};

use super::error::NotifyError;
use super::Notifier;
use crate::engine::Completion;

/// ASCII bell
const BELL: &str = "\x07";

/// Raises completion alerts on the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    bell: bool,
}

impl TerminalNotifier {
    /// Creates a terminal notifier; `bell` controls the audible bell.
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    /// Builds the alert text for a completion.
    pub fn message(completion: &Completion) -> String {
        format!("Time's up! {} finished.", completion.mode.label())
    }

    /// Writes the alert to the given writer.
    pub fn write_to<W: Write>(&self, out: &mut W, completion: &Completion) -> io::Result<()> {
        if self.bell {
            out.write_all(BELL.as_bytes())?;
        }
        writeln!(out, "{}", Self::message(completion))?;
        out.flush()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, completion: &Completion) -> Result<(), NotifyError> {
        let stderr = io::stderr();
        let mut lock = stderr.lock();
        self.write_to(&mut lock, completion)?;
        Ok(())
    }
}
