//! In-memory implementation of RecordStore for testing and development

use crate::core::record::Record;
use crate::core::store::{RecordStore, StoredRecord};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<Uuid, StoredRecord>>>,
}

impl InMemoryRecordStore {
    /// Create a new in-memory record store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all types
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, type_name: &str, record: Record) -> Result<StoredRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = StoredRecord::new(type_name, record);
        records.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn get(&self, type_name: &str, id: &Uuid) -> Result<Option<StoredRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .get(id)
            .filter(|stored| stored.type_name == type_name)
            .cloned())
    }

    async fn list(&self, type_name: &str) -> Result<Vec<StoredRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut listed: Vec<StoredRecord> = records
            .values()
            .filter(|stored| stored.type_name == type_name)
            .cloned()
            .collect();
        listed.sort_by_key(|stored| stored.created_at);

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_save_record() {
        let store = InMemoryRecordStore::new();
        let saved = store
            .save("article", record(json!({"title": "Hi"})))
            .await
            .unwrap();

        assert_eq!(saved.type_name, "article");
        assert_eq!(saved.data["title"], "Hi");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_record() {
        let store = InMemoryRecordStore::new();
        let saved = store.save("article", Record::new()).await.unwrap();

        let retrieved = store.get("article", &saved.id).await.unwrap();
        assert_eq!(retrieved.map(|r| r.id), Some(saved.id));
    }

    #[tokio::test]
    async fn test_get_record_of_other_type_is_none() {
        let store = InMemoryRecordStore::new();
        let saved = store.save("article", Record::new()).await.unwrap();

        assert!(store.get("user", &saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryRecordStore::new();
        assert!(store.get("article", &Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let store = InMemoryRecordStore::new();
        store.save("article", Record::new()).await.unwrap();
        store.save("article", Record::new()).await.unwrap();
        store.save("user", Record::new()).await.unwrap();

        assert_eq!(store.list("article").await.unwrap().len(), 2);
        assert_eq!(store.list("user").await.unwrap().len(), 1);
        assert!(store.list("page").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = InMemoryRecordStore::new();
        let clone = store.clone();
        clone.save("article", Record::new()).await.unwrap();
        assert!(!store.is_empty());
    }
}
