use super::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "MEDIASTREAM_API_KEY";

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Configuration for the remote video API client
///
/// Every field has a default, so a partially written config file (or none at
/// all) still produces a usable client. A missing `api_key` is valid: the
/// client then returns empty results instead of calling the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API credential
    #[serde(default)]
    pub api_key: Option<String>,

    /// Root URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Results per keyword search page
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,

    /// Results per home feed page
    #[serde(default = "default_home_page_size")]
    pub home_page_size: u32,

    /// Number of related videos to fetch
    #[serde(default = "default_related_page_size")]
    pub related_page_size: u32,

    /// Keyword used for the home feed
    #[serde(default = "default_home_query")]
    pub home_query: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            search_page_size: default_search_page_size(),
            home_page_size: default_home_page_size(),
            related_page_size: default_related_page_size(),
            home_query: default_home_query(),
        }
    }
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Default configuration with the API key taken from `MEDIASTREAM_API_KEY`
    pub fn from_env() -> Self {
        Self {
            api_key: api_key_from_env(),
            ..Self::default()
        }
    }

    /// The API key, treating a blank value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Check the values that would make every request fail
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_input("timeout_secs must be greater than 0"));
        }

        for (name, size) in [
            ("search_page_size", self.search_page_size),
            ("home_page_size", self.home_page_size),
            ("related_page_size", self.related_page_size),
        ] {
            // The API rejects maxResults outside 0..=50
            if size == 0 || size > 50 {
                return Err(Error::invalid_input(format!(
                    "{} must be between 1 and 50, got {}",
                    name, size
                )));
            }
        }

        if self.home_query.trim().is_empty() {
            return Err(Error::invalid_input("home_query must not be empty"));
        }

        Ok(())
    }
}

/// Read the API key from the environment, ignoring blank values
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn search_page_size(mut self, size: u32) -> Self {
        self.config.search_page_size = size;
        self
    }

    pub fn home_page_size(mut self, size: u32) -> Self {
        self.config.home_page_size = size;
        self
    }

    pub fn related_page_size(mut self, size: u32) -> Self {
        self.config.related_page_size = size;
        self
    }

    pub fn home_query(mut self, query: impl Into<String>) -> Self {
        self.config.home_query = query.into();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_search_page_size() -> u32 {
    24
}

fn default_home_page_size() -> u32 {
    12
}

fn default_related_page_size() -> u32 {
    8
}

fn default_home_query() -> String {
    "popular".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.search_page_size, 24);
        assert_eq!(config.home_page_size, 12);
        assert_eq!(config.related_page_size, 8);
        assert_eq!(config.home_query, "popular");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config::builder().api_key("   ").build().unwrap();
        assert_eq!(config.api_key(), None);

        let config = Config::builder().api_key(" abc ").build().unwrap();
        assert_eq!(config.api_key(), Some("abc"));
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(Config::builder().timeout_secs(0).build().is_err());
        assert!(Config::builder().search_page_size(0).build().is_err());
        assert!(Config::builder().related_page_size(51).build().is_err());
        assert!(Config::builder().base_url("::nope").build().is_err());
        assert!(Config::builder().home_query(" ").build().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key(), Some("k"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
