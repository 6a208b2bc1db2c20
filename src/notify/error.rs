//! Notification error types.

use thiserror::Error;

/// Errors that can occur while raising a completion alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Writing the alert failed.
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),

    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create the audio output sink.
    #[error("failed to open audio stream: {0}")]
    StreamError(String),
}

impl From<std::io::Error> for NotifyError {
    fn from(e: std::io::Error) -> Self {
        Self::DeliveryFailed(e.to_string())
    }
}
