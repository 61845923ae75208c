use thiserror::Error;

/// Error type for the mediastream CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Library(#[from] crate::core::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(msg) => {
                format!(
                    "{}. Run 'mediastream config path' to locate the config file.",
                    msg
                )
            }
            Self::Library(crate::core::Error::Api { status: 400 | 403, message }) => {
                format!(
                    "The video API rejected the request: {}. Check that {} holds a valid key.",
                    message,
                    crate::core::API_KEY_ENV
                )
            }
            Self::Library(err) if err.is_remote() => {
                format!("Video API error: {}. Check your network connection.", err)
            }
            Self::Library(crate::core::Error::Storage(msg)) => {
                format!(
                    "History storage error: {}. Try --data-dir to use another location.",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Convenient result type for the CLI
pub type Result<T> = std::result::Result<T, CliError>;

/// Trait for converting errors to user-friendly messages
pub trait UserFriendlyError {
    fn user_message(&self) -> String;
}

impl UserFriendlyError for CliError {
    fn user_message(&self) -> String {
        self.user_message()
    }
}
