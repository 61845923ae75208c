//! Browsing layer over the API client and the history lists
//!
//! Everything here degrades instead of failing: remote errors become empty
//! results and history write failures are logged, so a caller can always
//! render whatever came back.

use super::client::Client;
use crate::core::{PageToken, SearchPage, VideoDetails, VideoSummary};
use crate::history::{HistoryStore, SearchHistory, WatchHistory};
use tracing::{info, warn};

/// What the player view shows for one video
#[derive(Debug, Clone, Default)]
pub struct WatchView {
    /// `None` when the video could not be fetched
    pub details: Option<VideoDetails>,
    pub related: Vec<VideoSummary>,
}

/// Client plus history, with the recording rules of the browsing flow
#[derive(Clone)]
pub struct Browser {
    client: Client,
    history: HistoryStore,
}

impl Browser {
    pub fn new(client: Client, history: HistoryStore) -> Self {
        Self { client, history }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn search_history(&self) -> &SearchHistory {
        self.history.search()
    }

    pub fn watch_history(&self) -> &WatchHistory {
        self.history.watch()
    }

    /// The home feed page
    pub async fn home(&self, page_token: Option<&PageToken>) -> SearchPage {
        match self.client.popular(page_token).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "failed to load home feed");
                SearchPage::default()
            }
        }
    }

    /// Run a search, recording the query in search history first. A blank
    /// query returns an empty page and records nothing.
    pub async fn search(&self, query: &str, page_token: Option<&PageToken>) -> SearchPage {
        let query = query.trim();
        if query.is_empty() {
            return SearchPage::default();
        }

        if let Err(e) = self.history.search().add(query).await {
            warn!(error = %e, "failed to record search");
        }

        match self.client.search(query, page_token).await {
            Ok(page) => {
                info!(query, results = page.items.len(), "search complete");
                page
            }
            Err(e) => {
                warn!(query, error = %e, "search failed");
                SearchPage::default()
            }
        }
    }

    /// Load a video and its related videos. A video that was found is
    /// recorded in watch history.
    pub async fn watch(&self, id: &str) -> WatchView {
        let id = id.trim();
        if id.is_empty() {
            return WatchView::default();
        }

        let (details, related) =
            futures::join!(self.client.video_details(id), self.client.related(id));

        let details = details.unwrap_or_else(|e| {
            warn!(video_id = id, error = %e, "failed to load video details");
            None
        });
        let related = related.unwrap_or_else(|e| {
            warn!(video_id = id, error = %e, "failed to load related videos");
            Vec::new()
        });

        if let Some(video) = &details {
            let summary = &video.summary;
            if let Err(e) = self
                .history
                .watch()
                .add(id, &summary.title, &summary.thumbnail)
                .await
            {
                warn!(video_id = id, error = %e, "failed to record watched video");
            }
        }

        WatchView { details, related }
    }
}
