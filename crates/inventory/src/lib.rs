//! Inventory domain module.
//!
//! This crate contains the inventory business rules: validated records and the
//! keyed collection that owns them. Pure domain logic (no IO, no console).
//! Conversion to and from the persisted JSON shape lives here too, since it is
//! just a `serde_json::Value` and never touches the filesystem.

pub mod record;
pub mod store;

pub use record::{Record, RecordData};
pub use store::{Inventory, Summary};
