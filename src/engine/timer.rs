//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core countdown state machine:
//! - Start / pause / reset / mode switch commands
//! - One-second tick semantics
//! - A completion event when a running countdown reaches zero
//!
//! The engine has no notion of wall-clock time; see [`super::session`]
//! for the tick source that drives it.

use serde::Serialize;
use tracing::{debug, info};

use crate::types::{Mode, TimerState};

// ============================================================================
// Completion
// ============================================================================

/// Emitted once when a running countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Mode whose countdown finished
    pub mode: Mode,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Countdown state machine for a single timer.
///
/// Every operation is total: commands that do not apply to the current
/// state are silently ignored rather than reported as errors.
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Creates an idle engine in work mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle engine in the given mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            state: TimerState::new(mode),
        }
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Starts the countdown.
    ///
    /// Ignored if already running or if no time is left.
    pub fn start(&mut self) {
        self.state.start();
        debug!(state = ?self.state, "start");
    }

    /// Pauses the countdown.
    pub fn pause(&mut self) {
        self.state.pause();
        debug!(state = ?self.state, "pause");
    }

    /// Stops the countdown and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.state.reset();
        debug!(state = ?self.state, "reset");
    }

    /// Switches mode, discarding any progress in the previous one.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.switch_mode(mode);
        debug!(state = ?self.state, "set_mode");
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the completion event on the tick that reaches zero. Ticks
    /// delivered while stopped change nothing and return `None`, so the
    /// event cannot fire twice for one run.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.state.tick() {
            return None;
        }

        let completion = Completion {
            mode: self.state.mode(),
        };
        info!(mode = %completion.mode, "countdown completed");
        Some(completion)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn run_ticks(engine: &mut TimerEngine, count: u32) -> Vec<Completion> {
        (0..count).filter_map(|_| engine.tick()).collect()
    }

    // ------------------------------------------------------------------------
    // Command Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let engine = TimerEngine::new();
            let state = engine.state();

            assert_eq!(state.mode(), Mode::Work);
            assert_eq!(state.remaining_seconds(), 1500);
            assert!(!state.is_running());
        }

        #[test]
        fn test_with_mode() {
            let engine = TimerEngine::with_mode(Mode::LongBreak);
            assert_eq!(engine.state().mode(), Mode::LongBreak);
            assert_eq!(engine.state().remaining_seconds(), 900);
        }

        #[test]
        fn test_start_is_idempotent() {
            let mut engine = TimerEngine::new();
            engine.start();
            engine.tick();
            engine.start();

            assert!(engine.state().is_running());
            assert_eq!(engine.state().remaining_seconds(), 1499);
        }

        #[test]
        fn test_pause_is_idempotent() {
            let mut engine = TimerEngine::new();
            engine.pause();
            assert_eq!(*engine.state(), TimerState::new(Mode::Work));

            engine.start();
            engine.tick();
            engine.pause();
            engine.pause();
            assert!(!engine.state().is_running());
            assert_eq!(engine.state().remaining_seconds(), 1499);
        }

        #[test]
        fn test_reset_from_any_state() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            run_ticks(&mut engine, 42);
            engine.reset();
            assert_eq!(*engine.state(), TimerState::new(Mode::ShortBreak));

            engine.start();
            run_ticks(&mut engine, 300);
            assert_eq!(engine.state().phase(), Phase::Completed);
            engine.reset();
            assert_eq!(*engine.state(), TimerState::new(Mode::ShortBreak));
        }

        #[test]
        fn test_set_mode_for_all_modes() {
            for mode in Mode::ALL {
                let mut engine = TimerEngine::new();
                engine.start();
                engine.tick();
                engine.set_mode(mode);

                let state = engine.state();
                assert_eq!(state.mode(), mode);
                assert!(!state.is_running());
                assert_eq!(state.remaining_seconds(), mode.duration_seconds());
            }
        }

        #[test]
        fn test_start_at_zero_is_blocked() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            run_ticks(&mut engine, 300);

            engine.start();
            assert!(!engine.state().is_running());
            assert_eq!(engine.state().remaining_seconds(), 0);

            engine.reset();
            engine.start();
            assert!(engine.state().is_running());
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_when_idle_is_noop() {
            let mut engine = TimerEngine::new();
            let before = *engine.state();

            assert_eq!(engine.tick(), None);
            assert_eq!(*engine.state(), before);
        }

        #[test]
        fn test_tick_when_paused_is_noop() {
            let mut engine = TimerEngine::new();
            engine.start();
            run_ticks(&mut engine, 10);
            engine.pause();
            let before = *engine.state();

            assert!(run_ticks(&mut engine, 10).is_empty());
            assert_eq!(*engine.state(), before);
        }

        #[test]
        fn test_work_runs_to_completion() {
            let mut engine = TimerEngine::new();
            engine.start();

            let completions = run_ticks(&mut engine, 1500);

            assert_eq!(completions, vec![Completion { mode: Mode::Work }]);
            assert_eq!(engine.state().remaining_seconds(), 0);
            assert!(!engine.state().is_running());
        }

        #[test]
        fn test_completion_fires_on_final_tick_only() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();

            assert!(run_ticks(&mut engine, 299).is_empty());
            assert_eq!(engine.state().remaining_seconds(), 1);
            assert_eq!(
                engine.tick(),
                Some(Completion {
                    mode: Mode::ShortBreak
                })
            );
        }

        #[test]
        fn test_no_repeat_completion_after_zero() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            assert_eq!(run_ticks(&mut engine, 300).len(), 1);

            assert!(run_ticks(&mut engine, 50).is_empty());
            engine.start();
            assert!(run_ticks(&mut engine, 50).is_empty());
        }

        #[test]
        fn test_pause_mid_short_break() {
            let mut engine = TimerEngine::new();
            engine.set_mode(Mode::ShortBreak);
            engine.start();
            run_ticks(&mut engine, 100);
            engine.pause();
            run_ticks(&mut engine, 50);

            assert_eq!(engine.state().remaining_seconds(), 200);
            assert!(!engine.state().is_running());
        }

        #[test]
        fn test_set_mode_discards_progress() {
            let mut engine = TimerEngine::new();
            engine.start();
            run_ticks(&mut engine, 600);
            engine.set_mode(Mode::LongBreak);

            assert_eq!(engine.state().remaining_seconds(), 900);
            assert!(!engine.state().is_running());
            assert!(run_ticks(&mut engine, 5).is_empty());
        }

        #[test]
        fn test_second_run_after_reset_completes_again() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            assert_eq!(run_ticks(&mut engine, 300).len(), 1);

            engine.reset();
            engine.start();
            assert_eq!(run_ticks(&mut engine, 400).len(), 1);
        }
    }

    // ------------------------------------------------------------------------
    // Random Command Sequence Tests
    // ------------------------------------------------------------------------

    mod random_sequence_tests {
        use super::*;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        fn assert_invariants(state: &TimerState) {
            assert!(state.remaining_seconds() <= state.duration_seconds());
            if state.remaining_seconds() == 0 {
                assert!(!state.is_running(), "running at zero: {:?}", state);
            }
        }

        #[test]
        fn test_invariants_hold_for_random_commands() {
            for seed in 0..64u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut engine = TimerEngine::new();
                let mut completions = 0usize;
                let mut zero_transitions = 0usize;

                for _ in 0..5_000 {
                    let before = *engine.state();
                    let event = match rng.gen_range(0..100) {
                        0..=4 => {
                            engine.start();
                            None
                        }
                        5..=6 => {
                            engine.pause();
                            None
                        }
                        7 => {
                            engine.reset();
                            None
                        }
                        8 => {
                            engine.set_mode(Mode::ALL[rng.gen_range(0..3)]);
                            None
                        }
                        _ => engine.tick(),
                    };
                    let after = *engine.state();

                    assert_invariants(&after);
                    if before.is_running() && after.remaining_seconds() == 0 {
                        zero_transitions += 1;
                    }
                    if event.is_some() {
                        completions += 1;
                        assert_eq!(after.remaining_seconds(), 0);
                    }
                    if !before.is_running() && event.is_some() {
                        panic!("completion while stopped (seed {seed})");
                    }
                }

                assert_eq!(completions, zero_transitions, "seed {seed}");
            }
        }

        #[test]
        fn test_tick_never_changes_stopped_state() {
            let mut rng = StdRng::seed_from_u64(7);
            let mut engine = TimerEngine::new();

            for _ in 0..1_000 {
                match rng.gen_range(0..4) {
                    0 => engine.start(),
                    1 => engine.pause(),
                    2 => engine.set_mode(Mode::ALL[rng.gen_range(0..3)]),
                    _ => {}
                }
                if !engine.state().is_running() {
                    let before = *engine.state();
                    assert_eq!(engine.tick(), None);
                    assert_eq!(*engine.state(), before);
                } else {
                    engine.tick();
                }
            }
        }
    }
}
