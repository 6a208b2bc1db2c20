//! Completion alerts for the Pomodoro Timer.
//!
//! The timer engine only emits a [`Completion`]; this module decides how a
//! user hears about it:
//!
//! - [`TerminalNotifier`]: "Time's up!" line on stderr with a bell
//! - [`ChimeNotifier`]: short synthesized chime via rodio
//! - [`MockNotifier`]: records completions for tests

mod chime;
mod error;
mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use chime::{try_create_chime, ChimeNotifier};
pub use error::NotifyError;
pub use terminal::TerminalNotifier;

use crate::engine::Completion;

/// Receives completion events and alerts the user.
pub trait Notifier {
    /// Raises an alert for a finished countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn notify(&self, completion: &Completion) -> Result<(), NotifyError>;
}

/// Mock notifier for testing.
///
/// Clones share the same record, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    calls: Arc<Mutex<Vec<Completion>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that records each call and then fails.
    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.set_should_fail(true);
        mock
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Returns every completion received so far.
    #[must_use]
    pub fn completions(&self) -> Vec<Completion> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, completion: &Completion) -> Result<(), NotifyError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(*completion);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::DeliveryFailed("Mock failure".to_string()));
        }
        Ok(())
    }
}
