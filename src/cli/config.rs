use crate::cli::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration settings for the mediastream CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Custom data directory (if not using system default)
    pub data_dir: Option<PathBuf>,

    /// Remote API settings
    #[serde(default)]
    pub api: crate::core::Config,

    /// Output formatting preferences
    #[serde(default)]
    pub output: OutputDefaults,
}

/// Output formatting defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDefaults {
    /// Enable colored output by default
    #[serde(default = "default_true")]
    pub color: bool,

    /// Show the description line under each result
    #[serde(default)]
    pub descriptions: bool,
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            color: default_true(),
            descriptions: false,
        }
    }
}

impl Config {
    /// Load configuration from file, with fallback to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let config = Self::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CliError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CliError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = crate::cli::ensure_data_dir()?;
        Ok(data_dir.join("config.toml"))
    }

    /// Merge with command-line arguments, giving priority to CLI args
    pub fn merge_with_cli_args(mut self, cli_args: &crate::cli::cli::Cli) -> Self {
        if let Some(timeout) = cli_args.timeout {
            self.api.timeout_secs = timeout;
        }
        if let Some(ref data_dir) = cli_args.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if cli_args.no_color {
            self.output.color = false;
        }

        self
    }

    /// API settings with the key from the environment taking priority over
    /// the one in the file
    pub fn resolved_api(&self) -> crate::core::Config {
        let mut api = self.api.clone();
        if let Some(key) = crate::core::api_key_from_env() {
            api.api_key = Some(key);
        }
        api
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert!(config.output.color);
        assert!(!config.output.descriptions);
        assert_eq!(config.api, crate::core::Config::default());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.api_key = Some("secret".to_string());
        config.api.search_page_size = 10;
        config.output.color = false;

        config.save_to_file(&config_path).unwrap();
        let loaded = Config::load_from_file(&config_path).unwrap();

        assert_eq!(loaded.api.api_key(), Some("secret"));
        assert_eq!(loaded.api.search_page_size, 10);
        assert!(!loaded.output.color);
    }

    #[test]
    fn test_config_file_creation() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        // Should create default config file if it doesn't exist
        let config = Config::load_from_file(&config_path).unwrap();

        assert!(config_path.exists());
        assert_eq!(config.api.timeout_secs, crate::core::Config::default().timeout_secs);
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[api]\nhome_query = \"music\"\n").unwrap();

        let config = Config::load_from_file(&config_path).unwrap();

        assert_eq!(config.api.home_query, "music");
        assert_eq!(config.api.home_page_size, 12);
        assert!(config.output.color);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "this is = = not toml").unwrap();

        let err = Config::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, CliError::Configuration(_)));
    }
}
