//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - Clock strings and progress bars
//! - Timer events (text or JSON lines)
//! - The duration table, help and error messages

use crate::engine::TimerEvent;
use crate::types::{Mode, OutputFormat, TimerState};

/// Width of the progress bar in cells.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Width the mode label is padded to.
const LABEL_WIDTH: usize = 11;

// ============================================================================
// Formatting helpers
// ============================================================================

/// Formats seconds as `m:ss` (minutes unpadded, seconds zero-padded).
pub fn format_clock(total_seconds: u32) -> String {
    let (minutes, seconds) = split_minutes(total_seconds);
    format!("{}:{:02}", minutes, seconds)
}

/// Fraction of the current mode's duration that has elapsed, in `[0, 1]`.
pub fn progress_ratio(state: &TimerState) -> f64 {
    let duration = state.duration_seconds();
    if duration == 0 {
        return 0.0;
    }
    let elapsed = duration.saturating_sub(state.remaining_seconds());
    f64::from(elapsed) / f64::from(duration)
}

/// Renders a fixed-width bar for a ratio in `[0, 1]`.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn split_minutes(total_seconds: u32) -> (u32, u32) {
    (total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders a one-line status for a timer state.
    ///
    /// Format: `<label> <m:ss> [<bar>] <pct>% <phase>`
    pub fn render_state(state: &TimerState) -> String {
        let ratio = progress_ratio(state);
        format!(
            "{:<width$} {:>5} [{}] {:>3}% {}",
            state.mode().label(),
            format_clock(state.remaining_seconds()),
            progress_bar(ratio, PROGRESS_BAR_WIDTH),
            (ratio * 100.0).floor() as u32,
            state.phase().as_str(),
            width = LABEL_WIDTH,
        )
    }

    /// Renders an event in the requested output format.
    pub fn render_event(event: &TimerEvent, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string(event)
                .unwrap_or_else(|e| format!(r#"{{"event":"error","message":"{}"}}"#, e)),
            OutputFormat::Text => match event {
                TimerEvent::Updated(state) => Self::render_state(state),
                TimerEvent::Completed(completion) => format!(
                    "{} complete. Type 'reset' or pick a mode to go again.",
                    completion.mode.label()
                ),
            },
        }
    }

    /// Prints an event to stdout.
    pub fn show_event(event: &TimerEvent, format: OutputFormat) {
        println!("{}", Self::render_event(event, format));
    }

    /// Renders the fixed duration table.
    pub fn render_durations() -> String {
        Mode::ALL
            .iter()
            .map(|mode| {
                format!(
                    "{:<width$} {:>5}  ({})",
                    mode.label(),
                    format_clock(mode.duration_seconds()),
                    mode.as_str(),
                    width = LABEL_WIDTH,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints the fixed duration table.
    pub fn show_durations() {
        println!("{}", Self::render_durations());
    }

    /// Shows the greeting printed when an interactive session starts.
    pub fn show_welcome(mode: Mode, auto_start: bool) {
        let hint = if auto_start {
            "running"
        } else {
            "type 'start' to begin"
        };
        eprintln!(
            "Pomodoro Timer: {} ({}), {}. Type 'help' for commands.",
            mode.label(),
            format_clock(mode.duration_seconds()),
            hint
        );
    }

    /// Shows the interactive help text.
    pub fn show_help(text: &str) {
        eprintln!("{}", text);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Completion, TimerEngine};

    // ------------------------------------------------------------------------
    // Format Clock Tests
    // ------------------------------------------------------------------------

    mod format_clock_tests {
        use super::*;

        #[test]
        fn test_format_clock_zero() {
            assert_eq!(format_clock(0), "0:00");
        }

        #[test]
        fn test_format_clock_seconds_only() {
            assert_eq!(format_clock(5), "0:05");
            assert_eq!(format_clock(45), "0:45");
        }

        #[test]
        fn test_format_clock_minutes_unpadded() {
            assert_eq!(format_clock(300), "5:00");
            assert_eq!(format_clock(61), "1:01");
        }

        #[test]
        fn test_format_clock_mode_durations() {
            assert_eq!(format_clock(1500), "25:00");
            assert_eq!(format_clock(900), "15:00");
            assert_eq!(format_clock(1499), "24:59");
        }
    }

    // ------------------------------------------------------------------------
    // Progress Tests
    // ------------------------------------------------------------------------

    mod progress_tests {
        use super::*;

        #[test]
        fn test_progress_idle_is_zero() {
            let state = TimerState::new(Mode::Work);
            assert_eq!(progress_ratio(&state), 0.0);
        }

        #[test]
        fn test_progress_half_way() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            for _ in 0..150 {
                engine.tick();
            }
            assert!((progress_ratio(engine.state()) - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn test_progress_completed_is_one() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            for _ in 0..300 {
                engine.tick();
            }
            assert_eq!(progress_ratio(engine.state()), 1.0);
        }

        #[test]
        fn test_progress_bar() {
            assert_eq!(progress_bar(0.0, 4), "----");
            assert_eq!(progress_bar(0.5, 4), "##--");
            assert_eq!(progress_bar(1.0, 4), "####");
            assert_eq!(progress_bar(1.7, 4), "####");
            assert_eq!(progress_bar(-0.2, 4), "----");
        }
    }

    // ------------------------------------------------------------------------
    // Render Tests
    // ------------------------------------------------------------------------

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_idle_state() {
            let line = Display::render_state(&TimerState::new(Mode::Work));
            assert_eq!(
                line,
                format!("Pomodoro    25:00 [{}]   0% idle", "-".repeat(20))
            );
        }

        #[test]
        fn test_render_running_state() {
            let mut engine = TimerEngine::with_mode(Mode::ShortBreak);
            engine.start();
            for _ in 0..30 {
                engine.tick();
            }

            let line = Display::render_state(engine.state());
            assert!(line.starts_with("Short Break  4:30 [##"));
            assert!(line.ends_with(" 10% running"));
        }

        #[test]
        fn test_render_completed_event_text() {
            let event = TimerEvent::Completed(Completion {
                mode: Mode::LongBreak,
            });
            let line = Display::render_event(&event, OutputFormat::Text);
            assert!(line.starts_with("Long Break complete."));
        }

        #[test]
        fn test_render_event_json() {
            let event = TimerEvent::Updated(TimerState::new(Mode::LongBreak));
            let line = Display::render_event(&event, OutputFormat::Json);
            assert_eq!(
                line,
                r#"{"event":"updated","mode":"long_break","remaining_seconds":900,"running":false}"#
            );
        }

        #[test]
        fn test_render_durations() {
            let table = Display::render_durations();
            let lines: Vec<&str> = table.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("Pomodoro") && lines[0].contains("25:00"));
            assert!(lines[1].starts_with("Short Break") && lines[1].contains("5:00"));
            assert!(lines[2].starts_with("Long Break") && lines[2].contains("15:00"));
        }

        #[test]
        fn test_show_functions_do_not_panic() {
            Display::show_welcome(Mode::Work, false);
            Display::show_help("help");
            Display::show_error("Test error message");
        }
    }
}
