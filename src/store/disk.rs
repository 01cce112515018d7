use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{RecordStore, StoreError, COLLECTION_NAME, SCHEMA_VERSION};
use crate::models::Restaurant;

/// File holding the schema version marker.
const VERSION_FILE: &str = "schema_version";

/// The keyed collection plus the time it was last written.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCollection {
    cached_at: DateTime<Utc>,
    records: BTreeMap<i64, Restaurant>,
}

/// Durable record store backed by a JSON file in a named directory.
///
/// Writes go through a temp file and rename so a concurrent reader
/// never observes a half-written collection.
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Open the store directory, creating it if absent. Idempotent: an
    /// existing directory at the expected schema version is left as is.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StoreError::Unavailable)?;

        let version_path = dir.join(VERSION_FILE);
        match fs::read_to_string(&version_path) {
            Ok(contents) => {
                let version: u32 = contents.trim().parse().map_err(|_| {
                    StoreError::Corrupt(format!("unreadable schema version: {:?}", contents))
                })?;
                if version != SCHEMA_VERSION {
                    return Err(StoreError::Corrupt(format!(
                        "schema version {} (expected {})",
                        version, SCHEMA_VERSION
                    )));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::write(&version_path, SCHEMA_VERSION.to_string())
                    .map_err(StoreError::Unavailable)?;
                debug!(dir = %dir.display(), "Initialized record store");
            }
            Err(e) => return Err(StoreError::Unavailable(e)),
        }

        Ok(Self { dir })
    }

    fn collection_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", COLLECTION_NAME))
    }

    fn load(&self) -> Result<Option<StoredCollection>, StoreError> {
        let contents = match fs::read_to_string(self.collection_path()) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Unavailable(e)),
        };
        let collection =
            serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Some(collection))
    }

    fn commit(&self, collection: &StoredCollection) -> Result<(), StoreError> {
        let tmp = self.dir.join(format!("{}.json.tmp", COLLECTION_NAME));
        let contents = serde_json::to_string_pretty(collection)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(&tmp, contents).map_err(StoreError::Unavailable)?;
        fs::rename(&tmp, self.collection_path()).map_err(StoreError::Unavailable)?;
        Ok(())
    }
}

impl RecordStore for DiskStore {
    fn put_all(&self, records: &[Restaurant]) -> Result<(), StoreError> {
        let mut map = match self.load() {
            Ok(Some(existing)) => existing.records,
            Ok(None) => BTreeMap::new(),
            // A corrupt collection is replaced wholesale on the next write.
            Err(StoreError::Corrupt(e)) => {
                warn!(error = %e, "Replacing corrupt record collection");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for record in records {
            map.insert(record.id, record.clone());
        }
        self.commit(&StoredCollection {
            cached_at: Utc::now(),
            records: map,
        })
    }

    fn get_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self
            .load()?
            .map(|c| c.records.into_values().collect())
            .unwrap_or_default())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.collection_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Unavailable(e)),
        }
    }

    fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.load()?.map(|c| c.cached_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn restaurant(id: i64, name: &str) -> Restaurant {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "cuisine_type": "Italian",
            "neighborhood": "Downtown",
            "latlng": {"lat": 40.0, "lng": -73.0}
        }))
        .unwrap()
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();

        let records = vec![restaurant(2, "Emily"), restaurant(1, "Roberta's")];
        store.put_all(&records).unwrap();

        let mut got = store.get_all().unwrap();
        got.sort_by_key(|r| r.id);
        let mut want = records.clone();
        want.sort_by_key(|r| r.id);
        assert_eq!(got, want);
    }

    #[test]
    fn test_get_from_empty_store_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        assert!(store.get_all().unwrap().is_empty());
        assert!(store.last_refreshed().unwrap().is_none());
    }

    #[test]
    fn test_put_all_is_an_upsert_by_id() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();

        store
            .put_all(&[restaurant(1, "Old Name"), restaurant(2, "Emily")])
            .unwrap();
        store.put_all(&[restaurant(1, "New Name")]).unwrap();

        let mut got = store.get_all().unwrap();
        got.sort_by_key(|r| r.id);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "New Name");
        assert_eq!(got[1].name, "Emily");
    }

    #[test]
    fn test_reopen_is_idempotent_and_persistent() {
        let dir = TempDir::new().unwrap();
        {
            let store = DiskStore::open(dir.path()).unwrap();
            store.put_all(&[restaurant(1, "Roberta's")]).unwrap();
        }
        let store = DiskStore::open(dir.path()).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 1);
        assert!(store.last_refreshed().unwrap().is_some());
    }

    #[test]
    fn test_corrupt_collection_surfaces_as_error() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        std::fs::write(
            dir.path().join(format!("{}.json", COLLECTION_NAME)),
            "{not json",
        )
        .unwrap();

        assert!(matches!(store.get_all(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_schema_version_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(VERSION_FILE), "2").unwrap();
        assert!(matches!(
            DiskStore::open(dir.path()),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_clear_empties_the_store() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        store.put_all(&[restaurant(1, "Roberta's")]).unwrap();
        store.clear().unwrap();
        assert!(store.get_all().unwrap().is_empty());
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }
}
