//! Video types returned by the client, and the subset of the API's wire
//! format they are decoded from.

use serde::{Deserialize, Serialize};

/// Opaque cursor issued by the API for the next or previous result page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(pub String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// One video in a result grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: Option<String>,
    /// High resolution thumbnail URL, falling back to medium, else empty
    pub thumbnail: String,
}

/// Engagement counters of a single video
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// Full detail view of a single video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub summary: VideoSummary,
    pub statistics: VideoStatistics,
}

impl VideoDetails {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// URL of the embeddable player for this video
    pub fn embed_url(&self) -> String {
        embed_url(&self.summary.id)
    }

    /// URL of the video's watch page
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.summary.id)
    }
}

/// Player URL for a video id
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<VideoSummary>,
    pub next_page_token: Option<PageToken>,
    pub prev_page_token: Option<PageToken>,
    pub total_results: Option<u64>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.next_page_token.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev_page_token.is_some()
    }
}

// Wire format. Only the fields the client reads are modelled; everything
// else in the response is ignored.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub items: Vec<ResourceItem>,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceItem {
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub snippet: Snippet,
    pub statistics: Option<Statistics>,
}

/// Search results carry `{"videoId": ..}`, video resources a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResourceId {
    Plain(String),
    Object {
        #[serde(rename = "videoId")]
        video_id: Option<String>,
    },
}

impl ResourceId {
    fn video_id(&self) -> Option<&str> {
        match self {
            Self::Plain(id) => Some(id),
            Self::Object { video_id } => video_id.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl Thumbnails {
    fn best_url(&self) -> String {
        [&self.high, &self.medium]
            .into_iter()
            .flatten()
            .map(|thumb| thumb.url.as_str())
            .find(|url| !url.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

impl ResourceItem {
    /// Convert to a summary, dropping items that carry no video id
    /// (channel or playlist results)
    pub fn into_summary(self) -> Option<VideoSummary> {
        let id = self.id.as_ref()?.video_id()?.to_string();
        if id.is_empty() {
            return None;
        }

        Some(VideoSummary {
            id,
            thumbnail: self.snippet.thumbnails.best_url(),
            title: self.snippet.title,
            description: self.snippet.description,
            channel_title: self.snippet.channel_title,
            published_at: self.snippet.published_at,
        })
    }

    pub fn into_details(mut self) -> Option<VideoDetails> {
        let statistics = self.statistics.take().unwrap_or_default();
        let summary = self.into_summary()?;

        Some(VideoDetails {
            summary,
            statistics: VideoStatistics {
                view_count: parse_count(statistics.view_count),
                like_count: parse_count(statistics.like_count),
                comment_count: parse_count(statistics.comment_count),
            },
        })
    }
}

impl From<ListResponse> for SearchPage {
    fn from(response: ListResponse) -> Self {
        Self {
            items: response
                .items
                .into_iter()
                .filter_map(ResourceItem::into_summary)
                .collect(),
            next_page_token: response.next_page_token.map(PageToken),
            prev_page_token: response.prev_page_token.map(PageToken),
            total_results: response.page_info.and_then(|info| info.total_results),
        }
    }
}

fn parse_count(raw: Option<String>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_RESPONSE: &str = r#"{
        "kind": "youtube#searchListResponse",
        "nextPageToken": "CAwQAA",
        "pageInfo": {"totalResults": 1000000, "resultsPerPage": 2},
        "items": [
            {
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": "abc123"},
                "snippet": {
                    "publishedAt": "2024-03-01T10:00:00Z",
                    "title": "Cats being cats",
                    "description": "A compilation",
                    "channelTitle": "Cat Channel",
                    "thumbnails": {
                        "default": {"url": "https://i.ytimg.com/vi/abc123/default.jpg"},
                        "medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"},
                        "high": {"url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg"}
                    }
                }
            },
            {
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#channel", "channelId": "UC1"},
                "snippet": {"title": "A channel"}
            }
        ]
    }"#;

    #[test]
    fn test_search_response_to_page() {
        let response: ListResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();
        let page = SearchPage::from(response);

        // The channel result has no video id and is dropped
        assert_eq!(page.items.len(), 1);
        let video = &page.items[0];
        assert_eq!(video.id, "abc123");
        assert_eq!(video.title, "Cats being cats");
        assert_eq!(video.channel_title, "Cat Channel");
        assert_eq!(video.thumbnail, "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
        assert_eq!(video.published_at.as_deref(), Some("2024-03-01T10:00:00Z"));

        assert_eq!(page.next_page_token, Some(PageToken::new("CAwQAA")));
        assert!(!page.has_prev());
        assert_eq!(page.total_results, Some(1_000_000));
    }

    #[test]
    fn test_video_resource_to_details() {
        let raw = r#"{
            "items": [{
                "id": "xyz",
                "snippet": {
                    "title": "Dogs",
                    "thumbnails": {"medium": {"url": "https://img/medium.jpg"}}
                },
                "statistics": {"viewCount": "1234567", "likeCount": "89"}
            }]
        }"#;
        let response: ListResponse = serde_json::from_str(raw).unwrap();
        let details = response
            .items
            .into_iter()
            .next()
            .and_then(ResourceItem::into_details)
            .unwrap();

        assert_eq!(details.id(), "xyz");
        assert_eq!(details.summary.thumbnail, "https://img/medium.jpg");
        assert_eq!(details.statistics.view_count, Some(1_234_567));
        assert_eq!(details.statistics.like_count, Some(89));
        assert_eq!(details.statistics.comment_count, None);
        assert_eq!(details.embed_url(), "https://www.youtube.com/embed/xyz");
        assert_eq!(details.watch_url(), "https://www.youtube.com/watch?v=xyz");
    }

    #[test]
    fn test_missing_thumbnails_yield_empty_url() {
        let raw = r#"{"items": [{"id": {"videoId": "v1"}, "snippet": {"title": "t"}}]}"#;
        let response: ListResponse = serde_json::from_str(raw).unwrap();
        let page = SearchPage::from(response);
        assert_eq!(page.items[0].thumbnail, "");
    }

    #[test]
    fn test_empty_response_is_empty_page() {
        let response: ListResponse = serde_json::from_str("{}").unwrap();
        let page = SearchPage::from(response);
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert_eq!(page, SearchPage::default());
    }

    #[test]
    fn test_unparseable_statistics_are_dropped() {
        assert_eq!(parse_count(Some("12".to_string())), Some(12));
        assert_eq!(parse_count(Some("n/a".to_string())), None);
        assert_eq!(parse_count(None), None);
    }
}
