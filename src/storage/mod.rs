//! Per-user record persistence
//!
//! Each user owns one JSON record stored under data/store/<user>.json.
//! The ledger keeps its portfolio under the record's `portfolio` key;
//! sibling keys written by other features are carried through untouched.
//!
//! Load-then-save is not atomic across processes: two writers racing on
//! the same user's record resolve as last-write-wins. Accepted
//! limitation, not worked around here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use crate::data_paths::DataPaths;
use crate::ledger::Portfolio;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access record: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The persisted per-user document.
///
/// `portfolio` is the ledger's slice of the record; everything else a
/// user record may contain is preserved via the flattened map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub portfolio: Portfolio,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Load/save interface for per-user records.
///
/// Implementations must return an empty record when nothing has been
/// persisted for the user yet.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<UserRecord, StorageError>;
    async fn save(&self, user_id: &str, record: &UserRecord) -> Result<(), StorageError>;
}

/// One pretty-printed JSON file per user under the store directory.
#[derive(Clone)]
pub struct JsonFileStore {
    store_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_paths: &DataPaths) -> Self {
        Self {
            store_dir: data_paths.store(),
        }
    }

    fn record_path(&self, user_id: &str) -> PathBuf {
        self.store_dir
            .join(format!("{}.json", sanitize_filename(user_id)))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    /// Read a user's record, falling back to an empty record when the
    /// file is missing or unreadable. An unreadable record is treated
    /// as "no data" so a corrupt file never takes the assistant down.
    async fn load(&self, user_id: &str) -> Result<UserRecord, StorageError> {
        let path = self.record_path(user_id);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UserRecord::default());
            }
            Err(e) => {
                warn!(user_id, error = %e, "Failed to read record, treating as empty");
                return Ok(UserRecord::default());
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(user_id, error = %e, "Failed to parse record, treating as empty");
                Ok(UserRecord::default())
            }
        }
    }

    async fn save(&self, user_id: &str, record: &UserRecord) -> Result<(), StorageError> {
        fs::create_dir_all(&self.store_dir).await?;

        let path = self.record_path(user_id);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).await?;

        Ok(())
    }
}

/// HashMap-backed store for tests and embedding.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn load(&self, user_id: &str) -> Result<UserRecord, StorageError> {
        let records = self.records.lock().await;
        Ok(records.get(user_id).cloned().unwrap_or_default())
    }

    async fn save(&self, user_id: &str, record: &UserRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().await;
        records.insert(user_id.to_string(), record.clone());
        Ok(())
    }
}

/// Sanitize filename to remove invalid characters
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Holding, PurchaseLot};
    use rust_decimal_macros::dec;

    fn sample_record() -> UserRecord {
        let mut record = UserRecord::default();
        record.portfolio.insert(
            "BTC".to_string(),
            Holding {
                quantity: dec!(2.00),
                lots: vec![PurchaseLot {
                    quantity: dec!(2),
                    price: dec!(30000.00),
                }],
                current_price: None,
            },
        );
        record
    }

    #[tokio::test]
    async fn file_store_round_trips_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(&DataPaths::new(dir.path()));

        let record = sample_record();
        store.save("user1", &record).await.unwrap();

        let loaded = store.load("user1").await.unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(&DataPaths::new(dir.path()));

        let record = store.load("nobody").await.unwrap();
        assert!(record.portfolio.is_empty());
        assert!(record.extra.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let store = JsonFileStore::new(&paths);

        std::fs::create_dir_all(paths.store()).unwrap();
        std::fs::write(paths.store().join("user1.json"), "{not json").unwrap();

        let record = store.load("user1").await.unwrap();
        assert!(record.portfolio.is_empty());
    }

    #[tokio::test]
    async fn sibling_keys_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(&DataPaths::new(dir.path()));

        let mut record = sample_record();
        record.extra.insert(
            "preferences".to_string(),
            serde_json::json!({"theme": "dark"}),
        );
        store.save("user1", &record).await.unwrap();

        let loaded = store.load("user1").await.unwrap();
        assert_eq!(
            loaded.extra.get("preferences"),
            Some(&serde_json::json!({"theme": "dark"}))
        );
    }

    #[tokio::test]
    async fn user_ids_are_sanitized_into_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let store = JsonFileStore::new(&paths);

        store.save("a/b:c", &sample_record()).await.unwrap();
        assert!(paths.store().join("a_b_c.json").exists());
    }

    #[tokio::test]
    async fn in_memory_store_round_trips() {
        let store = InMemoryStore::new();
        let record = sample_record();
        store.save("user1", &record).await.unwrap();
        assert_eq!(store.load("user1").await.unwrap(), record);
        assert!(store.load("user2").await.unwrap().portfolio.is_empty());
    }
}
