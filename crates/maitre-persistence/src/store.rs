//! Generic JSON-array store with overwrite-by-id saves.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::record::Record;

/// A store holding every record of one entity kind in a single JSON array.
///
/// The cache is populated once at open time and is the authoritative view
/// for this store instance; writes made by another process or another store
/// instance are not visible until reopen. Saves replace the record with a
/// matching id (or append) and rewrite the whole file.
///
/// The cache sits behind a `Mutex`; save and lookup stay consistent when a
/// store is shared across tasks.
pub struct JsonStore<T: Record> {
    path: PathBuf,
    cache: Mutex<Vec<T>>,
}

impl<T: Record> JsonStore<T> {
    /// Opens the store for `T` under the given data directory.
    ///
    /// Fails with [`StoreError::Unavailable`] if the backing file does not
    /// exist (no auto-create) and [`StoreError::Decode`] if it cannot be
    /// parsed. An empty file decodes as an empty collection.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = Self::store_path(data_dir.as_ref());
        if !path.exists() {
            return Err(StoreError::Unavailable { path });
        }

        let records = Self::load(&path)?;
        debug!(
            kind = T::KIND,
            count = records.len(),
            path = %path.display(),
            "opened store"
        );

        Ok(Self {
            path,
            cache: Mutex::new(records),
        })
    }

    /// Creates (or replaces) the backing file with the given records and
    /// opens the store. This is the explicit operator action that `open`
    /// refuses to perform implicitly.
    pub fn create(data_dir: impl AsRef<Path>, records: Vec<T>) -> Result<Self> {
        let dir = data_dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let path = Self::store_path(dir);
        write_array(&path, &records)?;

        Ok(Self {
            path,
            cache: Mutex::new(records),
        })
    }

    /// Path of the backing file for `T` under a data directory.
    pub fn store_path(data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.json", T::KIND))
    }

    /// Returns every record of this kind.
    pub fn all(&self) -> Vec<T> {
        self.cache.lock().expect("store cache poisoned").clone()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<T> {
        self.cache
            .lock()
            .expect("store cache poisoned")
            .iter()
            .find(|r| r.record_id() == id)
            .cloned()
    }

    /// Returns the first record matching the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.cache
            .lock()
            .expect("store cache poisoned")
            .iter()
            .find(|r| predicate(r))
            .cloned()
    }

    /// Saves a record: replaces any cached record with the same id (or
    /// appends), then rewrites the whole collection atomically.
    pub fn save(&self, record: &T) -> Result<()> {
        let mut cache = self.cache.lock().expect("store cache poisoned");
        cache.retain(|r| r.record_id() != record.record_id());
        cache.push(record.clone());
        write_array(&self.path, &cache)?;

        debug!(kind = T::KIND, id = record.record_id(), "saved record");
        Ok(())
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.cache.lock().expect("store cache poisoned").len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(path: &Path) -> Result<Vec<T>> {
        let data = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Writes a whole collection to `path` via a temp file in the same
/// directory followed by an atomic rename, so readers never observe a
/// partial write.
fn write_array<T: Record>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tmp.persist(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maitre_models::Guest;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempdir().unwrap();

        let result: Result<JsonStore<Guest>> = JsonStore::open(dir.path());

        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("guest.json"), "{not json").unwrap();

        let result: Result<JsonStore<Guest>> = JsonStore::open(dir.path());

        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_open_empty_file_is_empty_collection() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("guest.json"), "").unwrap();

        let store: JsonStore<Guest> = JsonStore::open(dir.path()).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempdir().unwrap();
        let guest = Guest::new("Ada");

        JsonStore::create(dir.path(), vec![guest.clone()]).unwrap();
        let store: JsonStore<Guest> = JsonStore::open(dir.path()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(guest.id.as_str()).unwrap().name, "Ada");
    }

    #[test]
    fn test_save_appends_new_record() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Guest> = JsonStore::create(dir.path(), Vec::new()).unwrap();

        store.save(&Guest::new("Ada")).unwrap();
        store.save(&Guest::new("Grace")).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_overwrites_by_id() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Guest> = JsonStore::create(dir.path(), Vec::new()).unwrap();

        let mut guest = Guest::new("Ada");
        store.save(&guest).unwrap();

        guest.add_allergies(["basil"]);
        store.save(&guest).unwrap();

        assert_eq!(store.len(), 1);
        let loaded = store.get(guest.id.as_str()).unwrap();
        assert!(loaded.allergies.contains("basil"));
    }

    #[test]
    fn test_saves_survive_reopen() {
        let dir = tempdir().unwrap();
        let guest_id;

        {
            let store: JsonStore<Guest> = JsonStore::create(dir.path(), Vec::new()).unwrap();
            let mut guest = Guest::new("Ada");
            guest.add_preferences(["window"]);
            guest_id = guest.id.clone();
            store.save(&guest).unwrap();
        }

        let reopened: JsonStore<Guest> = JsonStore::open(dir.path()).unwrap();
        let loaded = reopened.get(guest_id.as_str()).unwrap();

        assert_eq!(loaded.name, "Ada");
        assert!(loaded.preferences.contains("window"));
    }

    #[test]
    fn test_find_by_predicate() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Guest> = JsonStore::create(dir.path(), Vec::new()).unwrap();
        store.save(&Guest::new("Ada")).unwrap();
        store.save(&Guest::new("Grace")).unwrap();

        let found = store.find(|g| g.name == "Grace").unwrap();
        assert_eq!(found.name, "Grace");

        assert!(store.find(|g| g.name == "Linus").is_none());
    }

    #[test]
    fn test_cache_not_refreshed_from_disk() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Guest> = JsonStore::create(dir.path(), Vec::new()).unwrap();

        // A bypassing writer replaces the file behind the store's back.
        let other: JsonStore<Guest> = JsonStore::open(dir.path()).unwrap();
        other.save(&Guest::new("Grace")).unwrap();

        // The first instance still sees its open-time view.
        assert!(store.is_empty());
    }
}
