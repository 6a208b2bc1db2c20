//! Foreground timer session.
//!
//! A [`Session`] hosts one [`TimerEngine`] inside a tokio runtime:
//! - Owns the one-second tick source (`tokio::time::Interval`)
//! - Applies control commands received over an mpsc channel
//! - Publishes every state change as a [`TimerEvent`]
//! - Hands completions to the configured notifiers
//!
//! The interval only exists while the engine is running. It is created when
//! a command starts the countdown and dropped as soon as a command or a
//! completion stops it.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::types::{Mode, SessionConfig, TimerState};

use super::timer::{Completion, TimerEngine};

// ============================================================================
// SessionCommand
// ============================================================================

/// Control commands accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Refill the countdown for the current mode
    Reset,
    /// Switch to another mode
    SetMode(Mode),
    /// Republish the current state
    Status,
    /// End the session
    Quit,
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Events published to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// State after a command or tick
    Updated(TimerState),
    /// A running countdown reached zero
    Completed(Completion),
}

// ============================================================================
// SessionError
// ============================================================================

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The event receiver was dropped
    #[error("event channel closed")]
    EventChannelClosed,
}

// ============================================================================
// Session
// ============================================================================

/// Hosts a timer engine with its tick source and notifiers.
pub struct Session {
    engine: TimerEngine,
    config: SessionConfig,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    notifiers: Vec<Box<dyn Notifier>>,
    ticker: Option<Interval>,
}

impl Session {
    /// Creates a session whose engine starts idle in `config.initial_mode`.
    pub fn new(
        config: SessionConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        notifiers: Vec<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            engine: TimerEngine::with_mode(config.initial_mode),
            config,
            event_tx,
            notifiers,
            ticker: None,
        }
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    /// Returns true while the tick source is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Runs the session until `Quit`, the command channel closing, or (with
    /// `exit_on_completion`) the first completion.
    ///
    /// Returns the final timer state.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
    ) -> Result<TimerState, SessionError> {
        info!(mode = %self.state().mode(), "session started");
        self.publish(TimerEvent::Updated(*self.state()))?;

        if self.config.auto_start {
            self.apply(SessionCommand::Start)?;
        }

        loop {
            let step = tokio::select! {
                command = commands.recv() => Step::Command(command),
                _ = next_tick(&mut self.ticker) => Step::Tick,
            };

            match step {
                Step::Command(None) => {
                    debug!("command channel closed");
                    break;
                }
                Step::Command(Some(SessionCommand::Quit)) => break,
                Step::Command(Some(command)) => self.apply(command)?,
                Step::Tick => {
                    if self.on_tick()?.is_some() && self.config.exit_on_completion {
                        break;
                    }
                }
            }
        }

        info!(state = ?self.state(), "session ended");
        Ok(*self.state())
    }

    /// Applies a control command and publishes the resulting state.
    pub fn apply(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        match command {
            SessionCommand::Start => self.engine.start(),
            SessionCommand::Pause => self.engine.pause(),
            SessionCommand::Reset => self.engine.reset(),
            SessionCommand::SetMode(mode) => self.engine.set_mode(mode),
            SessionCommand::Status | SessionCommand::Quit => {}
        }
        self.sync_ticker();
        self.publish(TimerEvent::Updated(*self.state()))
    }

    /// Delivers one tick to the engine.
    ///
    /// On completion the notifiers run before the `Completed` event is sent.
    fn on_tick(&mut self) -> Result<Option<Completion>, SessionError> {
        let completion = self.engine.tick();
        self.sync_ticker();
        self.publish(TimerEvent::Updated(*self.state()))?;

        if let Some(completion) = completion {
            self.notify(&completion);
            self.publish(TimerEvent::Completed(completion))?;
        }
        Ok(completion)
    }

    /// Arms or drops the interval so it matches the engine's run state.
    fn sync_ticker(&mut self) {
        let running = self.state().is_running();
        match (running, self.ticker.is_some()) {
            (true, false) => {
                let period = self.config.tick_interval;
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
                debug!(?period, "tick source armed");
            }
            (false, true) => {
                self.ticker = None;
                debug!("tick source stopped");
            }
            _ => {}
        }
    }

    fn notify(&self, completion: &Completion) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(completion) {
                warn!("Failed to deliver completion notification: {}", e);
            }
        }
    }

    fn publish(&self, event: TimerEvent) -> Result<(), SessionError> {
        self.event_tx
            .send(event)
            .map_err(|_| SessionError::EventChannelClosed)
    }
}

enum Step {
    Command(Option<SessionCommand>),
    Tick,
}

/// Waits for the next tick, or forever when no interval is armed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

// ============================================================================
// Tests
// ============================================================================
