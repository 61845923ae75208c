use crate::cli::config::Config;
use crate::cli::output::Formatter;
use crate::{cli::cli::commands::*, cli::error::Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Browse videos from the terminal and keep a local search and watch history
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Custom data directory path
    #[arg(long, global = true)]
    pub data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the popular videos feed
    Home(HomeCommand),

    /// Search videos by keyword
    Search(SearchCommand),

    /// Show a video and its related videos
    Watch(WatchCommand),

    /// Manage search and watch history
    History {
        #[command(subcommand)]
        kind: HistoryKind,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Cli {
    /// Default log filter implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Load the config file at `path` and apply the command-line overrides.
    /// A file that fails to parse is an error.
    pub fn load_config(&self, path: &Path) -> Result<Config> {
        Ok(Config::load_from_file(path)?.merge_with_cli_args(self))
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config(&Config::default_path()?)?;

        // Set up data directory (prefer CLI arg, then config, then default)
        let data_dir: PathBuf = if let Some(dir) = config.data_dir.clone() {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
            dir
        } else {
            crate::cli::ensure_data_dir()?
        };
        debug!(data_dir = %data_dir.display(), "using data directory");

        if !config.output.color {
            colored::control::set_override(false);
        }

        let formatter = Formatter::new(config.output.color, self.quiet)
            .with_descriptions(config.output.descriptions);

        // Execute the specific command
        match self.command {
            Commands::Home(cmd) => {
                let context = Context::open(&config, &data_dir, formatter)?;
                cmd.execute(&context).await
            }
            Commands::Search(cmd) => {
                let context = Context::open(&config, &data_dir, formatter)?;
                cmd.execute(&context).await
            }
            Commands::Watch(cmd) => {
                let context = Context::open(&config, &data_dir, formatter)?;
                cmd.execute(&context).await
            }
            Commands::History { kind } => {
                let context = Context::open(&config, &data_dir, formatter)?;
                kind.execute(&context).await
            }
            Commands::Completion { shell } => {
                generate_completion(shell);
                Ok(())
            }
            Commands::Config { action } => action.execute(&config, &formatter),
        }
    }
}

/// Generate shell completion script
fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
