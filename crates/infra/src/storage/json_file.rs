use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::r#trait::{InventoryStorage, StorageError};

/// JSON file on local disk, replaced atomically on every save.
///
/// Saves write the whole document to a sibling `<file>.tmp`, flush it to disk
/// and rename it over the target, so readers see either the old document or
/// the new one and never a partial write. Concurrent writers are not
/// coordinated; the last rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file used while a save is in flight.
    pub fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, data: &Map<String, Value>) -> Result<(), StorageError> {
        // Encode before touching the disk so an encoding failure writes nothing.
        let mut body = serde_json::to_vec_pretty(data)?;
        body.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.tmp_path();
        let replaced = write_synced(&tmp, &body).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(source) = replaced {
            // Best effort: the target is untouched either way.
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::Io {
                path: self.path.clone(),
                source,
            });
        }

        Ok(())
    }
}

/// Write `bytes` to a fresh file and flush it. The handle is closed on return.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl InventoryStorage for JsonFileStorage {
    fn load(&self) -> Map<String, Value> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "no inventory file yet; starting empty"
                );
                return Map::new();
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read inventory file; starting with an empty inventory"
                );
                return Map::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "inventory file is not a JSON object; starting with an empty inventory"
                );
                Map::new()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "inventory file is not valid JSON; starting with an empty inventory"
                );
                Map::new()
            }
        }
    }

    fn save(&self, data: &Map<String, Value>) -> Result<(), StorageError> {
        self.write_atomic(data).inspect_err(|err| {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                "failed to save inventory; previous file left untouched"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_inventory, save_inventory};
    use serde_json::json;
    use stockroom_inventory::{Inventory, Record};
    use tempfile::TempDir;

    fn three_records() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(Record::new("P1", "Bolt", 10, 0.5).unwrap()).unwrap();
        inv.add(Record::new("P2", "Tuerca ñandú", 0, 0.0).unwrap()).unwrap();
        inv.add(Record::new("P3", "Washer", 250, 12.99).unwrap()).unwrap();
        inv
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_then_load_in_fresh_storage_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("inventory.json");
        let inv = three_records();

        save_inventory(&JsonFileStorage::new(&path), &inv).unwrap();

        // A new adapter instance stands in for a fresh process.
        let reloaded = load_inventory(&JsonFileStorage::new(&path));
        assert_eq!(reloaded, inv);
        assert_eq!(reloaded.list_all(), inv.list_all());
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("inventory.json");
        let storage = JsonFileStorage::new(&path);

        save_inventory(&storage, &three_records()).unwrap();

        assert!(path.is_file());
        assert!(!storage.tmp_path().exists());
        assert_eq!(storage.tmp_path().file_name().unwrap(), "inventory.json.tmp");
    }

    #[test]
    fn saved_file_is_indented_utf8_with_literal_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        save_inventory(&JsonFileStorage::new(&path), &three_records()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Tuerca ñandú"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n  \"P1\": {"));
    }

    #[test]
    fn malformed_json_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{ \"P1\": { \"id\": ").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().is_empty());
        assert!(load_inventory(&storage).is_empty());
    }

    #[test]
    fn non_object_json_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(JsonFileStorage::new(&path).load().is_empty());
    }

    #[test]
    fn legacy_spanish_file_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventario.json");
        let legacy = json!({
            "A1": {"id": "A1", "nombre": "Martillo", "cantidad": 3, "precio": 15.0}
        });
        fs::write(&path, serde_json::to_string_pretty(&legacy).unwrap()).unwrap();

        let inv = load_inventory(&JsonFileStorage::new(&path));
        let record = inv.get("A1").unwrap();
        assert_eq!(record.name(), "Martillo");
        assert_eq!(record.quantity(), 3);
    }

    #[test]
    fn failed_save_preserves_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        let storage = JsonFileStorage::new(&path);
        save_inventory(&storage, &three_records()).unwrap();
        let before = fs::read(&path).unwrap();

        // Occupy the temp path with a directory so the write cannot start.
        fs::create_dir(storage.tmp_path()).unwrap();

        let err = save_inventory(&storage, &Inventory::new()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn save_onto_directory_target_fails_without_residue() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "x").unwrap();
        let storage = JsonFileStorage::new(&target);

        assert!(storage.save(&Map::new()).is_err());
        assert!(target.join("keep.txt").is_file());
        assert!(!storage.tmp_path().exists());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::collection::vec;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: prices with full f64 precision survive a trip through the file.
            #[test]
            fn file_round_trip_keeps_exact_prices(
                prices in vec(0.0f64..5_000.0, 1..50),
                quantities in vec(0i64..100_000, 50)
            ) {
                let dir = TempDir::new().unwrap();
                let path = dir.path().join("inventory.json");

                let mut inv = Inventory::new();
                for (i, price) in prices.iter().enumerate() {
                    let record =
                        Record::new(format!("P{i}"), "Item", quantities[i], *price).unwrap();
                    inv.add(record).unwrap();
                }

                save_inventory(&JsonFileStorage::new(&path), &inv).unwrap();
                let reloaded = load_inventory(&JsonFileStorage::new(&path));

                for (before, after) in inv.iter().zip(reloaded.iter()) {
                    prop_assert_eq!(before.price().to_bits(), after.price().to_bits());
                    prop_assert_eq!(before.quantity(), after.quantity());
                }
                prop_assert_eq!(reloaded, inv);
            }
        }
    }
}
