use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A one-shot reminder held in memory until it fires or the engine stops.
///
/// Removed from the queue before the delivery handoff, whether the send
/// later succeeds or not; there is exactly one firing attempt per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledJob {
    /// Assigned at creation; used for logging and cancellation.
    pub id: Uuid,
    /// Absolute deadline. Always strictly in the future at insert time.
    pub fire_at: DateTime<Utc>,
    /// Opaque delivery handle owned by the channel adapter (for Telegram,
    /// the chat id rendered as decimal).
    pub destination: String,
    /// Free-text message body, delivered under the dispatcher's banner.
    pub payload: String,
}
