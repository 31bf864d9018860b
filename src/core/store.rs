//! Persistence seam for validated records

use super::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record as persisted by a [`RecordStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,

    /// Name of the record type the record was saved under
    pub type_name: String,

    pub data: Record,

    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn new(type_name: impl Into<String>, data: Record) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_name: type_name.into(),
            data,
            created_at: Utc::now(),
        }
    }
}

/// Storage backend for records
///
/// A single `save` is assumed atomic. Callers do not retry failed saves.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a projected record
    async fn save(&self, type_name: &str, record: Record) -> Result<StoredRecord>;

    /// Get a stored record by ID
    async fn get(&self, type_name: &str, id: &Uuid) -> Result<Option<StoredRecord>>;

    /// List all stored records of a type
    async fn list(&self, type_name: &str) -> Result<Vec<StoredRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_record_new_assigns_id() {
        let a = StoredRecord::new("article", Record::new());
        let b = StoredRecord::new("article", Record::new());
        assert_ne!(a.id, b.id);
        assert_eq!(a.type_name, "article");
    }

    #[test]
    fn test_stored_record_serializes_data() {
        let data = json!({"title": "Hi"}).as_object().cloned().unwrap();
        let stored = StoredRecord::new("article", data);
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["data"]["title"], "Hi");
        assert_eq!(value["type_name"], "article");
    }
}
