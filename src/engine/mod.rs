//! Engine module for the Pomodoro Timer.
//!
//! - `timer`: countdown state machine with tick semantics
//! - `session`: tokio tick source and command loop around the engine

pub mod session;
pub mod timer;

pub use session::{Session, SessionCommand, SessionError, TimerEvent};
pub use timer::{Completion, TimerEngine};
