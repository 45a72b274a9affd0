//! `beacon-core`: configuration, error taxonomy and the outbound-transport
//! seam shared by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod outbound;

pub use config::BeaconConfig;
pub use error::{BeaconError, Result};
pub use outbound::{DeliveryError, Outbound};
