//! Storage backend trait and implementations.

pub mod filesystem;
pub mod memory;

use crate::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object storage backend.
///
/// Keys are `/`-separated relative paths. Writes replace any existing
/// object at the same key.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Returns the backend name.
    fn name(&self) -> &str;

    /// Stores data at the given key.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredObject>;

    /// Retrieves data by key.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Deletes data by key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Checks if a key exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Lists keys with an optional prefix.
    async fn list(&self, prefix: Option<&str>) -> StorageResult<Vec<String>>;
}

/// Handle describing a just-written object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Storage key.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// When the object was written.
    pub created_at: DateTime<Utc>,
    /// Backend-scheme URI (`mem://...` or `file://...`).
    pub uri: String,
}

impl StoredObject {
    /// Creates a handle stamped with the current time.
    #[must_use]
    pub fn new(key: &str, size: u64, uri: String) -> Self {
        Self {
            key: key.to_string(),
            size,
            created_at: Utc::now(),
            uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_object_handle() {
        let obj = StoredObject::new("raw/a.txt", 5, "mem://raw/a.txt".to_string());
        assert_eq!(obj.key, "raw/a.txt");
        assert_eq!(obj.size, 5);
        assert_eq!(obj.uri, "mem://raw/a.txt");
    }
}
