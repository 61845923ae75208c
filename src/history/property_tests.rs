//! Property tests for the history list invariants

use super::search::{insert_query, remove_query};
use super::watch::insert_entry;
use super::{SearchHistory, WatchHistoryEntry, MAX_SEARCH_ENTRIES, MAX_WATCH_ENTRIES};
use crate::history::MemoryStorage;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

mod strategies {
    use super::*;

    /// Short queries from a small alphabet so case-insensitive collisions
    /// actually happen
    pub fn query() -> impl Strategy<Value = String> {
        "[ ]{0,2}[aAbBcC]{0,3}[ ]{0,2}"
    }

    pub fn video_id() -> impl Strategy<Value = String> {
        "[a-e]{0,2}"
    }
}

proptest! {
    #[test]
    fn search_history_stays_bounded_and_unique(
        queries in prop::collection::vec(strategies::query(), 0..40),
    ) {
        let mut history = Vec::new();
        for query in &queries {
            insert_query(&mut history, query);
        }

        prop_assert!(history.len() <= MAX_SEARCH_ENTRIES);

        let folded: HashSet<String> = history.iter().map(|q| q.to_lowercase()).collect();
        prop_assert_eq!(folded.len(), history.len());

        for query in &history {
            prop_assert!(!query.is_empty());
            prop_assert_eq!(query.trim(), query.as_str());
        }

        // The front entry is the last non-blank query, as typed
        let last = queries.iter().rev().map(|q| q.trim()).find(|q| !q.is_empty());
        prop_assert_eq!(history.first().map(String::as_str), last);
    }

    #[test]
    fn search_history_remove_only_drops_exact_match(
        queries in prop::collection::vec(strategies::query(), 1..20),
        victim in strategies::query(),
    ) {
        let mut history = Vec::new();
        for query in &queries {
            insert_query(&mut history, query);
        }
        let before = history.clone();

        let removed = remove_query(&mut history, &victim);

        prop_assert_eq!(removed, before.contains(&victim));
        let expected: Vec<String> = before.into_iter().filter(|q| *q != victim).collect();
        prop_assert_eq!(history, expected);
    }

    #[test]
    fn watch_history_stays_bounded_and_unique(
        ids in prop::collection::vec(strategies::video_id(), 0..60),
    ) {
        let mut history = Vec::new();
        for (timestamp, id) in ids.iter().enumerate() {
            insert_entry(&mut history, WatchHistoryEntry {
                id: id.clone(),
                title: format!("title {}", id),
                thumbnail: String::new(),
                timestamp: timestamp as i64,
            });
        }

        prop_assert!(history.len() <= MAX_WATCH_ENTRIES);

        let unique: HashSet<&str> = history.iter().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(unique.len(), history.len());
        prop_assert!(history.iter().all(|e| !e.id.is_empty()));

        // Newest first
        for pair in history.windows(2) {
            prop_assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    #[test]
    fn stored_search_history_matches_list_model(
        queries in prop::collection::vec(strategies::query(), 0..25),
    ) {
        tokio_test::block_on(async {
            let store = SearchHistory::new(Arc::new(MemoryStorage::new()));
            let mut model = Vec::new();

            for query in &queries {
                store.add(query).await.unwrap();
                insert_query(&mut model, query);
            }

            prop_assert_eq!(store.get().await, model);
            Ok(())
        })?;
    }
}
