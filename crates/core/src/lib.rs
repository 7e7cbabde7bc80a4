//! `lootbag-core`: shared domain building blocks.
//!
//! Pure domain primitives with no IO: the error model used by every crate in
//! the workspace, and the ordinal timestamp attached to picked-up items.

pub mod error;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use time::PickupTime;
