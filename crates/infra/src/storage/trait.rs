use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

/// Persistence failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode inventory as JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Durable home of the persisted inventory document
/// (`{ "<id>": {"id", "name", "quantity", "price"} }`).
pub trait InventoryStorage: Send + Sync {
    /// Return the stored document, or an empty map if there is none or it
    /// cannot be read. Problems are logged, never returned.
    fn load(&self) -> Map<String, Value>;

    /// Replace the stored document. On failure the previous document must
    /// remain intact.
    fn save(&self, data: &Map<String, Value>) -> Result<(), StorageError>;
}
