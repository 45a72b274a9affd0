use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur within the scheduler subsystem.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The time token is not a valid `HH:MM` wall-clock time.
    #[error("Malformed time {0:?} (expected HH:MM, 00:00–23:59)")]
    MalformedTime(String),

    /// `schedule()` was handed an instant that is not strictly in the
    /// future. The resolver should already prevent this; the engine checks
    /// again at insert time.
    #[error("Fire time {fire_at} is not in the future (now {now})")]
    PastTime {
        fire_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The wall-clock time cannot be mapped to an instant in the configured
    /// zone on any of the next few days (repeated DST gaps, practically
    /// unreachable for real zones).
    #[error("Cannot resolve {time} to an instant in the configured zone")]
    Unresolvable { time: String },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
