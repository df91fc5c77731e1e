//! In-memory storage backend.

use super::{StorageBackend, StoredObject};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory backend for tests and local development.
pub struct MemoryBackend {
    data: DashMap<String, Bytes>,
    total_size: AtomicU64,
}

impl MemoryBackend {
    /// Creates a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            total_size: AtomicU64::new(0),
        }
    }

    /// Clears all data.
    pub fn clear(&self) {
        self.data.clear();
        self.total_size.store(0, Ordering::SeqCst);
    }

    /// Returns the current total size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.total_size.load(Ordering::SeqCst)
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredObject> {
        let size = data.len() as u64;

        if let Some(old) = self.data.get(key) {
            self.total_size
                .fetch_sub(old.len() as u64, Ordering::SeqCst);
        }

        self.data.insert(key.to_string(), data);
        self.total_size.fetch_add(size, Ordering::SeqCst);

        Ok(StoredObject::new(key, size, format!("mem://{key}")))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.data
            .get(key)
            .map(|obj| obj.value().clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        if let Some((_, old)) = self.data.remove(key) {
            self.total_size
                .fetch_sub(old.len() as u64, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.data.contains_key(key))
    }

    async fn list(&self, prefix: Option<&str>) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = match prefix {
            Some(p) => self
                .data
                .iter()
                .filter(|r| r.key().starts_with(p))
                .map(|r| r.key().clone())
                .collect(),
            None => self.data.iter().map(|r| r.key().clone()).collect(),
        };
        keys.sort();
        Ok(keys)
    }
}
