//! Infrastructure layer: file persistence and configuration.

pub mod config;
pub mod storage;

pub use config::StockroomConfig;
pub use storage::{
    InMemoryStorage, InventoryStorage, JsonFileStorage, StorageError, load_inventory,
    save_inventory,
};
