//! `beacon-scheduler`: in-memory one-shot job scheduler.
//!
//! # Overview
//!
//! Jobs live in a [`std::collections::BTreeMap`] ordered by fire time (ties
//! broken by insertion order). The [`engine::Scheduler`] loop sleeps until
//! the earliest deadline and is re-armed through a [`tokio::sync::Notify`]
//! whenever a job with an earlier deadline is inserted, never by fixed-tick
//! polling. Fired jobs are handed to the [`dispatch::Dispatcher`] over an
//! mpsc channel and removed from the queue before the handoff, so a job can
//! never fire twice.
//!
//! # Guarantees
//!
//! | Property   | Behaviour                                             |
//! |------------|-------------------------------------------------------|
//! | Firing     | At most once, at or shortly after `fire_at`           |
//! | Durability | None: pending jobs die with the process              |
//! | Delivery   | Single attempt, failures logged and dropped           |
//! | Shutdown   | Prompt; remaining jobs are discarded                  |

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod types;

pub use dispatch::Dispatcher;
pub use engine::{Scheduler, SchedulerHandle};
pub use error::{Result, SchedulerError};
pub use resolve::next_occurrence;
pub use types::ScheduledJob;
