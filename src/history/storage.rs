//! Key-value persistence backends for the history lists
//!
//! The history stores never touch a persistence mechanism directly; they go
//! through [`KeyValueStorage`], which models a same-origin string store with
//! raw read, write and delete of whole values.

use crate::core::error::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// String-valued key-value store
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    async fn read_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn write_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`. Deleting an absent key succeeds.
    async fn delete_raw(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        (**self).read_raw(key).await
    }

    async fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        (**self).write_raw(key, value).await
    }

    async fn delete_raw(&self, key: &str) -> Result<()> {
        (**self).delete_raw(key).await
    }
}

/// Process-local storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_raw(&self, key: &str) -> Result<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root`. The directory is created on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        // Uniquely named sibling, then rename, so readers never see a
        // partial value and concurrent writers never share a temp file
        let root = self.root.clone();
        let content = value.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&root)?;
            tmp.write_all(content.as_bytes())?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| Error::storage(format!("write task failed: {}", e)))??;

        debug!(key, bytes = value.len(), "wrote storage value");
        Ok(())
    }

    async fn delete_raw(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "deleted storage value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_input(format!("invalid storage key: {:?}", key)))
    }
}
