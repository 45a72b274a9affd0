//! `beacon-users`: append-only member registry in SQLite.
//!
//! The rest of the system only ever asks one question of this crate:
//! "has this identity been seen before?", answered either directly via
//! [`IdentityStore::exists`] or as the return value of
//! [`IdentityStore::register_if_new`].

pub mod db;
pub mod error;
pub mod store;

pub use error::{Result, UserError};
pub use store::{IdentityStore, Member};
