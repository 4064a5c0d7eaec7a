//! Sled-backed persistence for campaign and trophy state.
//!
//! The store is a thin JSON-over-key-value layer: every value is serialized
//! to JSON text on write and parsed on read, under the same string keys the
//! mobile client uses. A missing key is `Ok(None)`, never an error. A value
//! that is present but unparseable surfaces as [`MusterError::Corrupt`] with
//! the offending key; callers decide whether to repair or abort.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::MusterError;

/// Key holding the JSON array of campaigns.
pub const KEY_CAMPAIGNS: &str = "campaigns";
/// Key holding the active campaign, duplicated by value.
pub const KEY_ACTIVE_CAMPAIGN: &str = "activeCampaign";
/// Key holding the trophy-id -> record mapping.
pub const KEY_TROPHIES: &str = "trophiesAchieved";

const TREE_PRIMARY: &str = "muster";

/// Sled-backed key-value store for the domain core. Cloning is cheap; all
/// clones share the same underlying database handle.
#[derive(Clone)]
pub struct MusterStore {
    _db: sled::Db,
    primary: sled::Tree,
}

impl MusterStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MusterError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let primary = db.open_tree(TREE_PRIMARY)?;
        Ok(MusterStore { _db: db, primary })
    }

    /// Fetch and parse the value stored under `key`. Absent keys yield
    /// `Ok(None)`; unparseable values yield [`MusterError::Corrupt`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, MusterError> {
        let Some(bytes) = self.primary.get(key.as_bytes())? else {
            return Ok(None);
        };
        let value = serde_json::from_slice(&bytes).map_err(|source| MusterError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` as JSON text and store it under `key`, flushing so
    /// the write is durable before the call returns.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), MusterError> {
        let bytes = serde_json::to_vec(value)?;
        self.primary.insert(key.as_bytes(), bytes)?;
        self.primary.flush()?;
        Ok(())
    }

    /// Delete the value stored under `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), MusterError> {
        self.primary.remove(key.as_bytes())?;
        self.primary.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn absent_key_yields_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = MusterStore::open(dir.path()).expect("store");
        let value: Option<Vec<String>> = store.get(KEY_CAMPAIGNS).expect("get");
        assert!(value.is_none());
    }

    #[test]
    fn put_get_remove_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let store = MusterStore::open(dir.path()).expect("store");

        let mut mapping = BTreeMap::new();
        mapping.insert("visit".to_string(), 1u32);
        store.put(KEY_TROPHIES, &mapping).expect("put");

        let fetched: BTreeMap<String, u32> = store
            .get(KEY_TROPHIES)
            .expect("get")
            .expect("value present");
        assert_eq!(fetched, mapping);

        store.remove(KEY_TROPHIES).expect("remove");
        let gone: Option<BTreeMap<String, u32>> = store.get(KEY_TROPHIES).expect("get");
        assert!(gone.is_none());
    }

    #[test]
    fn mismatched_shape_surfaces_corrupt_with_key() {
        let dir = TempDir::new().expect("tempdir");
        let store = MusterStore::open(dir.path()).expect("store");
        store.put(KEY_CAMPAIGNS, &"not an array").expect("put");

        let err = store
            .get::<Vec<u64>>(KEY_CAMPAIGNS)
            .expect_err("shape mismatch should error");
        match err {
            MusterError::Corrupt { key, .. } => assert_eq!(key, KEY_CAMPAIGNS),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().expect("tempdir");
        {
            let store = MusterStore::open(dir.path()).expect("store");
            store.put("marker", &42u64).expect("put");
        }
        let store = MusterStore::open(dir.path()).expect("reopen");
        let value: Option<u64> = store.get("marker").expect("get");
        assert_eq!(value, Some(42));
    }
}
