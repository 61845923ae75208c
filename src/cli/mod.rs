//! Command-line front end for browsing videos and managing local history.
//! ## Usage
//!
//! ```bash
//! # Browse the home feed
//! mediastream home
//!
//! # Search, then fetch the next page
//! mediastream search rust conference talks
//! mediastream search rust conference talks --page CBgQAA
//!
//! # Open a video (records it in watch history)
//! mediastream watch dQw4w9WgXcQ
//!
//! # Manage history
//! mediastream history search list
//! mediastream history watch clear --yes
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result, UserFriendlyError};

/// Version information for the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory for storing history and configuration
pub fn default_data_dir() -> std::path::PathBuf {
    directories::ProjectDirs::from("", "", "mediastream")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            // Fallback to home directory if project dirs not available
            dirs::home_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(".mediastream")
        })
}

/// Initialize the data directory if it doesn't exist
pub fn ensure_data_dir() -> Result<std::path::PathBuf> {
    let data_dir = default_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }
    Ok(data_dir)
}

/// Directory holding the history storage files under a data directory
pub fn storage_dir(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("storage")
}
