//! Outbound-transport seam between the scheduler's dispatcher and the
//! channel adapter that actually talks to the messaging network.
//!
//! The dispatcher only ever sees this trait, so delivery can be exercised in
//! tests with an in-process mock instead of a live bot connection.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// A single failed send attempt. There is no retry anywhere in the system:
/// the caller logs this and drops the message (at-most-once delivery).
#[derive(Debug, Error)]
#[error("delivery to {destination} failed: {reason}")]
pub struct DeliveryError {
    pub destination: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(destination: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            reason: reason.into(),
        }
    }
}

/// One send attempt per call; no buffering, no retries.
///
/// `destination` is an opaque handle owned by the adapter (for Telegram, a
/// chat id rendered as decimal).
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError>;

    /// Send an image with a caption. Adapters without photo support may
    /// degrade to `send_text(destination, caption)`.
    async fn send_photo(
        &self,
        destination: &str,
        image: &Path,
        caption: &str,
    ) -> Result<(), DeliveryError>;
}
