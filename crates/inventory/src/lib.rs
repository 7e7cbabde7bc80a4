//! Inventory domain module.
//!
//! Game items kept in a binary search tree ordered by name, with stacking
//! rules for consumables and sorted reporting. Pure domain logic: rendering
//! produces records and text, and writing them anywhere is the caller's job.

pub mod inventory;
pub mod item;
pub mod report;

pub use inventory::{AddOutcome, Inventory, RemoveOutcome};
pub use item::{Item, ItemType};
pub use report::{ItemRecord, Report, SortAttribute};
