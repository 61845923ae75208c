//! # mediastream
//!
//! A video browsing client for a YouTube Data API shaped search service, with
//! durable recent-search and watched-video history.
//!
//! The crate is split the same way the application is used:
//!
//! - [`history`] keeps the bounded, de-duplicated search and watch lists on top
//!   of an injected [`history::KeyValueStorage`] backend
//! - [`runtime`] talks to the remote API ([`runtime::Client`]) and glues it to
//!   the history lists ([`runtime::Browser`])
//! - [`core`] holds the shared configuration, video types and error type
//! - `cli` (behind the `cli` feature) is the `mediastream` command-line front end
//!
//! ```rust,no_run
//! use mediastream::{history::MemoryStorage, runtime::Browser, Client, Config, HistoryStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> mediastream::Result<()> {
//! let client = Client::new(Config::from_env())?;
//! let history = HistoryStore::new(Arc::new(MemoryStorage::new()));
//! let browser = Browser::new(client, history);
//!
//! let page = browser.search("rust conference talks", None).await;
//! for video in &page.items {
//!     println!("{} - {}", video.id, video.title);
//! }
//! println!("recent: {:?}", browser.search_history().get().await);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod history;
pub mod runtime;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::{Config, Error, Result, SearchPage, VideoDetails, VideoSummary};
pub use history::{HistoryStore, SearchHistory, WatchHistory, WatchHistoryEntry};
pub use runtime::{Browser, Client};
