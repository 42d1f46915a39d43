//! Inventory persistence boundary.
//!
//! `InventoryStorage` moves the persisted JSON document in and out of durable
//! storage. Loading never fails: a missing or unreadable document degrades to
//! an empty inventory with a logged warning.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;
pub use r#trait::{InventoryStorage, StorageError};

use serde_json::Value;
use stockroom_inventory::Inventory;

/// Load and rebuild an inventory. Bad entries are skipped by the rebuild.
pub fn load_inventory<S: InventoryStorage + ?Sized>(storage: &S) -> Inventory {
    let inventory = Inventory::from_serializable(&Value::Object(storage.load()));
    tracing::info!(records = inventory.len(), "inventory loaded");
    inventory
}

/// Persist the full inventory, replacing whatever was stored before.
pub fn save_inventory<S: InventoryStorage + ?Sized>(
    storage: &S,
    inventory: &Inventory,
) -> Result<(), StorageError> {
    storage.save(&inventory.to_serializable())?;
    tracing::info!(records = inventory.len(), "inventory saved");
    Ok(())
}
