//! Recent-search and watched-video history
//!
//! This module handles:
//! - Persisting both lists through an injected [`KeyValueStorage`]
//! - Keeping each list de-duplicated, most-recent-first and bounded
//! - Treating corrupt or unreadable stored data as an empty list
//!
//! Both lists follow the same sequence on insert: drop the existing entry with
//! the same primary key, put the new entry at the front, truncate to the cap,
//! then write the whole list back in one storage write.

pub mod search;
pub mod storage;
pub mod watch;

#[cfg(test)]
mod property_tests;

pub use search::SearchHistory;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use watch::{Clock, WatchHistory, WatchHistoryEntry};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::core::error::Result;

/// Storage key of the search history list
pub const SEARCH_HISTORY_KEY: &str = "mediastream_search_history";

/// Storage key of the watch history list
pub const WATCH_HISTORY_KEY: &str = "mediastream_watch_history";

/// Maximum number of remembered searches
pub const MAX_SEARCH_ENTRIES: usize = 10;

/// Maximum number of remembered videos
pub const MAX_WATCH_ENTRIES: usize = 20;

/// Serializes read-modify-write cycles on one list. Shared by every clone of
/// a store so concurrent adds in this process cannot lose each other's update.
pub(crate) type WriteGate = Arc<tokio::sync::Mutex<()>>;

/// Both history lists over one storage backend
#[derive(Clone)]
pub struct HistoryStore {
    search: SearchHistory,
    watch: WatchHistory,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            search: SearchHistory::new(storage.clone()),
            watch: WatchHistory::new(storage),
        }
    }

    /// History kept in a directory on disk
    pub fn with_file_storage(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(root)))
    }

    /// History kept in memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn search(&self) -> &SearchHistory {
        &self.search
    }

    pub fn watch(&self) -> &WatchHistory {
        &self.watch
    }

    /// Clear both lists
    pub async fn clear_all(&self) -> Result<()> {
        self.search.clear().await?;
        self.watch.clear().await
    }
}

/// Read and decode a persisted list. Absent values, storage failures and
/// values that fail to decode all read as an empty list.
pub(crate) async fn load_list<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Vec<T> {
    let raw = match storage.read_raw(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read history, treating as empty");
            return Vec::new();
        }
    };

    decode_list(key, &raw)
}

pub(crate) fn decode_list<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            warn!(key, error = %e, "stored history is malformed, treating as empty");
            Vec::new()
        }
    }
}

pub(crate) async fn save_list<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    list: &[T],
) -> Result<()> {
    let content = serde_json::to_string(list)?;
    storage.write_raw(key, &content).await
}
