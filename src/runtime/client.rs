use crate::core::types::{ErrorResponse, ListResponse, ResourceItem};
use crate::core::{Config, Error, PageToken, Result, SearchPage, VideoDetails, VideoSummary};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Read-only client for the remote video API
///
/// The `Client` covers the four query shapes the browser needs: keyword search,
/// the popular home feed, video detail lookup and related-video lookup. When
/// no API key is configured every call returns an empty result without
/// touching the network.
///
/// # Examples
///
/// Basic usage:
/// ```rust,no_run
/// # use mediastream::{Client, Config};
/// # #[tokio::main]
/// # async fn main() -> mediastream::Result<()> {
/// let client = Client::new(Config::from_env())?;
/// let page = client.search("cats", None).await?;
/// for video in &page.items {
///     println!("{}", video.title);
/// }
/// # Ok(())
/// # }
/// ```
///
/// With configuration:
/// ```rust,no_run
/// # use mediastream::Client;
/// # fn main() -> mediastream::Result<()> {
/// let client = Client::builder()
///     .api_key("my-key")
///     .timeout_secs(10)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Config>,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mediastream/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a new client builder for fluent configuration
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether requests will actually be sent
    pub fn has_api_key(&self) -> bool {
        self.config.api_key().is_some()
    }

    /// Search videos by keyword
    ///
    /// Pass the `next_page_token` or `prev_page_token` of a previous page to
    /// move through the results.
    pub async fn search(&self, query: &str, page_token: Option<&PageToken>) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_input("search query cannot be empty"));
        }

        self.search_page(query, self.config.search_page_size, page_token)
            .await
    }

    /// The home feed: a keyword search for the configured home query
    pub async fn popular(&self, page_token: Option<&PageToken>) -> Result<SearchPage> {
        self.search_page(
            &self.config.home_query,
            self.config.home_page_size,
            page_token,
        )
        .await
    }

    /// Look up one video with its statistics. `None` if the API has no such
    /// video.
    pub async fn video_details(&self, id: &str) -> Result<Option<VideoDetails>> {
        let Some(key) = self.config.api_key() else {
            warn!("no API key configured, skipping video lookup");
            return Ok(None);
        };
        if id.trim().is_empty() {
            return Ok(None);
        }

        let url = self.endpoint(
            "videos",
            &[("part", "snippet,statistics"), ("id", id.trim())],
            key,
        )?;
        let response = self.get_list(url).await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(ResourceItem::into_details))
    }

    /// Videos related to `id`
    pub async fn related(&self, id: &str) -> Result<Vec<VideoSummary>> {
        let Some(key) = self.config.api_key() else {
            warn!("no API key configured, skipping related lookup");
            return Ok(Vec::new());
        };
        if id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let max_results = self.config.related_page_size.to_string();
        let url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("relatedToVideoId", id.trim()),
                ("type", "video"),
                ("maxResults", &max_results),
            ],
            key,
        )?;

        Ok(SearchPage::from(self.get_list(url).await?).items)
    }

    async fn search_page(
        &self,
        query: &str,
        page_size: u32,
        page_token: Option<&PageToken>,
    ) -> Result<SearchPage> {
        let Some(key) = self.config.api_key() else {
            warn!("no API key configured, returning no results");
            return Ok(SearchPage::default());
        };

        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("q", query),
        ];
        if let Some(token) = page_token.filter(|t| !t.as_str().is_empty()) {
            params.push(("pageToken", token.as_str()));
        }

        let url = self.endpoint("search", &params, key)?;
        Ok(SearchPage::from(self.get_list(url).await?))
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)], key: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path
        ))?;

        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("key", key);

        Ok(url)
    }

    async fn get_list(&self, url: Url) -> Result<ListResponse> {
        // Never log the query string, it carries the key
        debug!(path = url.path(), "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });

            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builder for creating `Client` instances with fluent configuration
///
/// ```rust,no_run
/// # use mediastream::Client;
/// # fn main() -> mediastream::Result<()> {
/// let client = Client::builder()
///     .api_key("my-key")
///     .search_page_size(12)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: Config,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new client builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the configuration directly
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Point the client at a different API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the number of results per search page
    pub fn search_page_size(mut self, size: u32) -> Self {
        self.config.search_page_size = size;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        Client::new(self.config)
    }
}
