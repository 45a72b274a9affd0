//! `beacon-content`: flat-file content store for events, resources, tips
//! and facts.
//!
//! Every lookup degrades to an empty collection when the backing file is
//! missing or corrupt; content problems are an operator concern (logged),
//! never a user-visible error.

pub mod store;
pub mod types;

pub use store::ContentStore;
pub use types::{Event, Resource};
