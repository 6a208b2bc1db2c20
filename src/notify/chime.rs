//! Audible completion chime using rodio.
//!
//! The chime is synthesized (two short sine tones), so no sound files are
//! needed. Playback is non-blocking: the sink is detached and keeps playing
//! after `notify` returns.

use std::time::Duration;

use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::NotifyError;
use super::Notifier;
use crate::engine::Completion;

/// Tone frequencies in Hz, played in order.
const CHIME_TONES: [f32; 2] = [880.0, 1320.0];

/// Length of each tone.
const TONE_DURATION: Duration = Duration::from_millis(180);

/// Output volume (0.0 - 1.0).
const CHIME_VOLUME: f32 = 0.2;

/// Plays a short chime when a countdown completes.
pub struct ChimeNotifier {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl ChimeNotifier {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DeviceNotAvailable` if no output device exists.
    pub fn new() -> Result<Self, NotifyError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| NotifyError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    fn play(&self) -> Result<(), NotifyError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| NotifyError::StreamError(e.to_string()))?;

        for freq in CHIME_TONES {
            sink.append(
                SineWave::new(freq)
                    .take_duration(TONE_DURATION)
                    .amplify(CHIME_VOLUME),
            );
        }
        sink.detach();

        debug!("Chime playback started (detached)");
        Ok(())
    }
}

impl Notifier for ChimeNotifier {
    fn notify(&self, completion: &Completion) -> Result<(), NotifyError> {
        debug!(mode = %completion.mode, "Playing completion chime");
        self.play()
    }
}

impl std::fmt::Debug for ChimeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChimeNotifier").finish_non_exhaustive()
    }
}

/// Creates a chime notifier, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_chime() -> Option<ChimeNotifier> {
    match ChimeNotifier::new() {
        Ok(chime) => Some(chime),
        Err(e) => {
            warn!("Audio not available, chime disabled: {}", e);
            None
        }
    }
}
