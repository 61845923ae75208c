//! Recently watched videos

use super::{
    load_list, save_list, KeyValueStorage, WriteGate, MAX_WATCH_ENTRIES, WATCH_HISTORY_KEY,
};
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Source of watch timestamps, in milliseconds since the Unix epoch
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// A watched video as persisted in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    /// Video id, unique within the list
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Thumbnail URL, empty when the video had none
    #[serde(default)]
    pub thumbnail: String,
    /// When the video was last opened, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl WatchHistoryEntry {
    /// When the video was last opened
    pub fn watched_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.timestamp)
    }
}

/// Most-recent-first list of opened videos, unique by video id
#[derive(Clone)]
pub struct WatchHistory {
    storage: Arc<dyn KeyValueStorage>,
    gate: WriteGate,
    clock: Clock,
}

impl WatchHistory {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            gate: WriteGate::default(),
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Stored videos, newest first
    pub async fn get(&self) -> Vec<WatchHistoryEntry> {
        load_list(self.storage.as_ref(), WATCH_HISTORY_KEY).await
    }

    /// Whether `id` is in the list
    pub async fn contains(&self, id: &str) -> bool {
        self.get().await.iter().any(|entry| entry.id == id)
    }

    /// Record that a video was opened. An empty id is ignored. Re-adding an id
    /// moves it to the front with a fresh timestamp.
    pub async fn add(&self, id: &str, title: &str, thumbnail: &str) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }

        let _guard = self.gate.lock().await;
        let mut history = self.get().await;
        insert_entry(
            &mut history,
            WatchHistoryEntry {
                id: id.to_string(),
                title: title.to_string(),
                thumbnail: thumbnail.to_string(),
                timestamp: (self.clock)(),
            },
        );

        debug!(video_id = id, entries = history.len(), "recorded watched video");
        save_list(self.storage.as_ref(), WATCH_HISTORY_KEY, &history).await
    }

    /// Remove the video with `id`. Does nothing if absent.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.gate.lock().await;
        let mut history = self.get().await;
        let before = history.len();
        history.retain(|entry| entry.id != id);
        if history.len() == before {
            return Ok(());
        }

        save_list(self.storage.as_ref(), WATCH_HISTORY_KEY, &history).await
    }

    /// Forget every watched video
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.gate.lock().await;
        self.storage.delete_raw(WATCH_HISTORY_KEY).await
    }
}

/// Put `entry` at the front of `history`, replacing any entry with the same
/// id and dropping anything past the cap. Entries with an empty id are
/// rejected.
pub fn insert_entry(history: &mut Vec<WatchHistoryEntry>, entry: WatchHistoryEntry) -> bool {
    if entry.id.is_empty() {
        return false;
    }

    history.retain(|existing| existing.id != entry.id);
    history.insert(0, entry);
    history.truncate(MAX_WATCH_ENTRIES);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStorage;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that advances by one millisecond per reading, starting at 1000
    fn ticking_clock() -> Clock {
        let now = Arc::new(AtomicI64::new(1000));
        Arc::new(move || now.fetch_add(1, Ordering::SeqCst))
    }

    fn history() -> (Arc<MemoryStorage>, WatchHistory) {
        let storage = Arc::new(MemoryStorage::new());
        let history = WatchHistory::new(storage.clone()).with_clock(ticking_clock());
        (storage, history)
    }

    fn ids(entries: &[WatchHistoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_records_fields() {
        let (_, history) = history();

        history
            .add("abc", "Cats being cats", "https://img/abc.jpg")
            .await
            .unwrap();

        let entries = history.get().await;
        assert_eq!(
            entries,
            vec![WatchHistoryEntry {
                id: "abc".to_string(),
                title: "Cats being cats".to_string(),
                thumbnail: "https://img/abc.jpg".to_string(),
                timestamp: 1000,
            }]
        );
        assert!(history.contains("abc").await);
        assert!(!history.contains("xyz").await);
    }

    #[tokio::test]
    async fn test_rewatch_moves_to_front_with_new_timestamp() {
        let (_, history) = history();

        history.add("A", "Video A", "").await.unwrap();
        history.add("B", "Video B", "").await.unwrap();
        history.add("A", "Video A", "").await.unwrap();

        let entries = history.get().await;
        assert_eq!(ids(&entries), vec!["A", "B"]);
        assert_eq!(entries[0].timestamp, 1002);
        assert_eq!(entries[1].timestamp, 1001);
    }

    #[tokio::test]
    async fn test_rewatch_updates_title_and_thumbnail() {
        let (_, history) = history();

        history.add("A", "Old title", "").await.unwrap();
        history.add("A", "New title", "thumb").await.unwrap();

        let entries = history.get().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "New title");
        assert_eq!(entries[0].thumbnail, "thumb");
    }

    #[tokio::test]
    async fn test_empty_id_is_ignored() {
        let (storage, history) = history();

        history.add("", "No id", "").await.unwrap();

        assert!(history.get().await.is_empty());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let (_, history) = history();

        for i in 1..=21 {
            history
                .add(&format!("v{}", i), &format!("Video {}", i), "")
                .await
                .unwrap();
        }

        let entries = history.get().await;
        assert_eq!(entries.len(), MAX_WATCH_ENTRIES);
        assert_eq!(entries[0].id, "v21");
        assert_eq!(entries[MAX_WATCH_ENTRIES - 1].id, "v2");
        assert!(!history.contains("v1").await);
    }

    #[tokio::test]
    async fn test_remove() {
        let (_, history) = history();
        history.add("A", "a", "").await.unwrap();
        history.add("B", "b", "").await.unwrap();

        history.remove("A").await.unwrap();
        assert_eq!(ids(&history.get().await), vec!["B"]);

        // Missing ids are a no-op
        history.remove("zzz").await.unwrap();
        assert_eq!(ids(&history.get().await), vec!["B"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let (_, history) = history();
        history.add("A", "a", "").await.unwrap();

        history.clear().await.unwrap();
        assert!(history.get().await.is_empty());

        history.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_reads_records_without_thumbnail() {
        let (storage, history) = history();
        storage
            .write_raw(
                WATCH_HISTORY_KEY,
                r#"[{"id": "A", "title": "a", "timestamp": 5}]"#,
            )
            .await
            .unwrap();

        let entries = history.get().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].thumbnail, "");
        assert_eq!(entries[0].timestamp, 5);
    }

    #[tokio::test]
    async fn test_wrong_shape_reads_empty() {
        let (storage, history) = history();
        storage
            .write_raw(WATCH_HISTORY_KEY, r#"["just", "strings"]"#)
            .await
            .unwrap();

        assert!(history.get().await.is_empty());
    }

    #[test]
    fn test_watched_at() {
        let entry = WatchHistoryEntry {
            id: "A".to_string(),
            title: String::new(),
            thumbnail: String::new(),
            timestamp: 1_700_000_000_000,
        };
        let watched = entry.watched_at().unwrap();
        assert_eq!(watched.timestamp(), 1_700_000_000);
    }
}
