//! Configuration, shared video types and the library error type

pub mod config;
pub mod error;
pub mod types;

pub use config::{api_key_from_env, Config, ConfigBuilder, API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::{embed_url, PageToken, SearchPage, VideoDetails, VideoStatistics, VideoSummary};
