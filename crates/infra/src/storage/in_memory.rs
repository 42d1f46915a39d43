use std::sync::RwLock;

use serde_json::{Map, Value};

use super::r#trait::{InventoryStorage, StorageError};

/// In-memory document store.
///
/// Intended for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    document: RwLock<Option<Map<String, Value>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, as if it had been saved earlier.
    pub fn with_document(document: Map<String, Value>) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }

    /// Last saved document, if any.
    pub fn saved(&self) -> Option<Map<String, Value>> {
        self.document.read().ok().and_then(|doc| doc.clone())
    }
}

impl InventoryStorage for InMemoryStorage {
    fn load(&self) -> Map<String, Value> {
        match self.document.read() {
            Ok(doc) => doc.clone().unwrap_or_default(),
            Err(_) => {
                tracing::warn!("in-memory storage lock poisoned; starting empty");
                Map::new()
            }
        }
    }

    fn save(&self, data: &Map<String, Value>) -> Result<(), StorageError> {
        let mut doc = self
            .document
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        *doc = Some(data.clone());
        Ok(())
    }
}
