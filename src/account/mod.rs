//! Account directory for the portal
//!
//! - Flat list of accounts persisted as one JSON document
//! - Unsalted SHA-256 credential digests
//! - Email-unique registration and first-start admin seeding

pub mod types;
pub mod digest;
pub mod store;

pub use types::{Account, Role, ALL_PLATFORMS};
pub use store::AccountDirectory;
