//! Filesystem storage backend.

use super::{StorageBackend, StoredObject};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Filesystem storage backend rooted at a directory.
pub struct FilesystemBackend {
    root: PathBuf,
}

impl FilesystemBackend {
    /// Creates a new filesystem backend, creating the root directory if
    /// it does not exist.
    ///
    /// # Errors
    /// Returns an error if the root directory cannot be created.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        if !root.exists() {
            fs::create_dir_all(&root).await?;
        }

        Ok(Self { root })
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Resolves a key to a path under the root.
    ///
    /// Absolute keys, empty segments and `.`/`..` segments are rejected
    /// so a key can never escape the root.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key
                .split('/')
                .any(|part| part.is_empty() || part == "." || part == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut path = self.root.clone();
        for part in key.split('/') {
            path.push(part);
        }
        Ok(path)
    }
}

#[async_trait]
impl StorageBackend for FilesystemBackend {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredObject> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically: temp file in place, then rename.
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &path).await?;

        Ok(StoredObject::new(
            key,
            data.len() as u64,
            format!("file://{}", path.display()),
        ))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let path = self.key_to_path(key)?;

        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let mut file = fs::File::open(&path).await?;
        let metadata = file.metadata().await?;
        let mut buffer = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut buffer).await?;

        Ok(Bytes::from(buffer))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        if path.exists() {
            fs::remove_file(&path).await?;
        }

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(path.exists())
    }

    async fn list(&self, prefix: Option<&str>) -> StorageResult<Vec<String>> {
        let search_path = match prefix {
            Some(p) => self.key_to_path(p.trim_end_matches('/'))?,
            None => self.root.clone(),
        };

        let mut keys = Vec::new();

        if !search_path.exists() {
            return Ok(keys);
        }

        let mut stack = vec![search_path];
        while let Some(current) = stack.pop() {
            if current.is_dir() {
                let mut entries = fs::read_dir(&current).await?;
                while let Some(entry) = entries.next_entry().await? {
                    let entry_path = entry.path();
                    if entry_path.is_dir() {
                        stack.push(entry_path);
                    } else if !entry_path.extension().is_some_and(|e| e == "tmp") {
                        if let Ok(rel_path) = entry_path.strip_prefix(&self.root) {
                            let key = rel_path
                                .to_string_lossy()
                                .replace(std::path::MAIN_SEPARATOR, "/");
                            keys.push(key);
                        }
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_backend() -> (FilesystemBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(temp_dir.path()).await.unwrap();
        (backend, temp_dir)
    }

    #[tokio::test]
    async fn test_put_get() {
        let (backend, _temp) = create_test_backend().await;
        let data = Bytes::from("test data");

        backend.put("test.txt", data.clone()).await.unwrap();
        let retrieved = backend.get("test.txt").await.unwrap();

        assert_eq!(retrieved, data);
    }

    #[tokio::test]
    async fn test_nested_keys() {
        let (backend, _temp) = create_test_backend().await;

        backend
            .put("raw/20250115-103000-data.csv", Bytes::from("nested"))
            .await
            .unwrap();
        let data = backend.get("raw/20250115-103000-data.csv").await.unwrap();

        assert_eq!(data, Bytes::from("nested"));
    }

    #[tokio::test]
    async fn test_put_returns_file_uri() {
        let (backend, _temp) = create_test_backend().await;
        let obj = backend.put("raw/a.txt", Bytes::from("x")).await.unwrap();

        assert!(obj.uri.starts_with("file://"));
        assert!(obj.uri.ends_with("raw/a.txt"));
        assert_eq!(obj.size, 1);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let (backend, _temp) = create_test_backend().await;

        backend.put("key", Bytes::from("first")).await.unwrap();
        backend.put("key", Bytes::from("second")).await.unwrap();

        assert_eq!(backend.get("key").await.unwrap(), Bytes::from("second"));
    }

    #[tokio::test]
    async fn test_traversal_keys_rejected() {
        let (backend, _temp) = create_test_backend().await;

        for key in ["../escape", "/absolute", "a//b", "a/./b", ""] {
            let result = backend.put(key, Bytes::from("x")).await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_list() {
        let (backend, _temp) = create_test_backend().await;

        backend.put("raw/1.txt", Bytes::from("1")).await.unwrap();
        backend.put("raw/2.txt", Bytes::from("2")).await.unwrap();
        backend
            .put("processed/3.txt", Bytes::from("3"))
            .await
            .unwrap();

        let all = backend.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let raw_only = backend.list(Some("raw/")).await.unwrap();
        assert_eq!(
            raw_only,
            vec!["raw/1.txt".to_string(), "raw/2.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let (backend, _temp) = create_test_backend().await;

        backend.put("to_delete", Bytes::from("data")).await.unwrap();
        assert!(backend.exists("to_delete").await.unwrap());

        backend.delete("to_delete").await.unwrap();
        assert!(!backend.exists("to_delete").await.unwrap());
    }
}
