//! Recent search queries

use super::{
    load_list, save_list, KeyValueStorage, WriteGate, MAX_SEARCH_ENTRIES, SEARCH_HISTORY_KEY,
};
use crate::core::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Most-recent-first list of submitted search queries
///
/// Queries are stored trimmed with the casing they were typed in. Two queries
/// that differ only in case are the same entry; re-adding one moves it to the
/// front with the newer casing.
#[derive(Clone)]
pub struct SearchHistory {
    storage: Arc<dyn KeyValueStorage>,
    gate: WriteGate,
}

impl SearchHistory {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            gate: WriteGate::default(),
        }
    }

    /// Stored queries, newest first
    pub async fn get(&self) -> Vec<String> {
        load_list(self.storage.as_ref(), SEARCH_HISTORY_KEY).await
    }

    /// Record a submitted query. Blank queries are ignored.
    pub async fn add(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }

        let _guard = self.gate.lock().await;
        let mut history = self.get().await;
        insert_query(&mut history, query);

        debug!(query = query.trim(), entries = history.len(), "recorded search");
        save_list(self.storage.as_ref(), SEARCH_HISTORY_KEY, &history).await
    }

    /// Remove the entry exactly equal to `query`. Does nothing if absent.
    pub async fn remove(&self, query: &str) -> Result<()> {
        let _guard = self.gate.lock().await;
        let mut history = self.get().await;
        if !remove_query(&mut history, query) {
            return Ok(());
        }

        save_list(self.storage.as_ref(), SEARCH_HISTORY_KEY, &history).await
    }

    /// Forget every stored query
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.gate.lock().await;
        self.storage.delete_raw(SEARCH_HISTORY_KEY).await
    }

    /// Stored queries containing `text`, ignoring case, newest first
    pub async fn suggestions(&self, text: &str) -> Vec<String> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.get()
            .await
            .into_iter()
            .filter(|query| query.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Put `query` (trimmed) at the front of `history`, dropping any entry equal
/// to it ignoring case and anything past the cap. Returns false for a blank
/// query, leaving `history` untouched.
pub fn insert_query(history: &mut Vec<String>, query: &str) -> bool {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return false;
    }

    let folded = trimmed.to_lowercase();
    history.retain(|existing| existing.to_lowercase() != folded);
    history.insert(0, trimmed.to_string());
    history.truncate(MAX_SEARCH_ENTRIES);
    true
}

/// Drop the entry exactly equal to `query`. Returns whether one was removed.
pub fn remove_query(history: &mut Vec<String>, query: &str) -> bool {
    let before = history.len();
    history.retain(|existing| existing != query);
    history.len() != before
}
