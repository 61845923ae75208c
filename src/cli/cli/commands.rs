//! Subcommand arguments and their handlers

use crate::cli::config::Config;
use crate::cli::error::{CliError, Result};
use crate::cli::output::Formatter;
use crate::core::{PageToken, API_KEY_ENV};
use crate::history::HistoryStore;
use crate::runtime::{Browser, Client};
use clap::{Args, Subcommand};
use std::io::Write;
use std::path::Path;

/// Everything a browsing or history command needs
pub struct Context {
    pub browser: Browser,
    pub formatter: Formatter,
}

impl Context {
    pub fn new(browser: Browser, formatter: Formatter) -> Self {
        Self { browser, formatter }
    }

    /// Build the client from `config` and open the history under `data_dir`
    pub fn open(config: &Config, data_dir: &Path, formatter: Formatter) -> Result<Self> {
        let client = Client::new(config.resolved_api())?;
        let history = HistoryStore::with_file_storage(crate::cli::storage_dir(data_dir));
        Ok(Self::new(Browser::new(client, history), formatter))
    }

    fn warn_if_no_key(&self) {
        if !self.browser.client().has_api_key() {
            eprintln!(
                "No API key configured; set {} or api.api_key in the config file.",
                API_KEY_ENV
            );
        }
    }
}

#[derive(Args, Debug)]
pub struct HomeCommand {
    /// Page token from a previous listing
    #[arg(long)]
    pub page: Option<String>,
}

impl HomeCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        ctx.warn_if_no_key();

        let token = self.page.as_deref().map(PageToken::from);
        let page = ctx.browser.home(token.as_ref()).await;
        let out = &ctx.formatter;
        out.print(&out.render_page("Popular videos", &page));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Search terms
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Page token from a previous search
    #[arg(long)]
    pub page: Option<String>,
}

impl SearchCommand {
    /// The search terms joined into one query
    pub fn query(&self) -> String {
        self.query.join(" ").trim().to_string()
    }

    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let query = self.query();
        if query.is_empty() {
            return Err(CliError::invalid_input("search query cannot be empty"));
        }
        ctx.warn_if_no_key();

        let token = self.page.as_deref().map(PageToken::from);
        let page = ctx.browser.search(&query, token.as_ref()).await;
        let out = &ctx.formatter;
        out.print(&out.render_page(&format!("Search results for \"{}\"", query), &page));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct WatchCommand {
    /// Video id
    pub id: String,
}

impl WatchCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(CliError::invalid_input("video id cannot be empty"));
        }
        ctx.warn_if_no_key();

        let view = ctx.browser.watch(id).await;
        ctx.formatter.print(&ctx.formatter.render_watch(id, &view));
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum HistoryKind {
    /// Recent search queries
    Search {
        #[command(subcommand)]
        action: SearchHistoryAction,
    },

    /// Recently watched videos
    Watch {
        #[command(subcommand)]
        action: WatchHistoryAction,
    },
}

impl HistoryKind {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        match self {
            Self::Search { action } => action.execute(ctx).await,
            Self::Watch { action } => action.execute(ctx).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SearchHistoryAction {
    /// List recent searches, newest first
    List,

    /// List recent searches containing the given text
    Suggest {
        /// Text to look for, case-insensitive
        text: String,
    },

    /// Remove one search (exact match)
    Remove {
        /// The query as listed
        query: String,
    },

    /// Remove every search
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl SearchHistoryAction {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let history = ctx.browser.search_history();
        let out = &ctx.formatter;

        match self {
            Self::List => {
                out.print(&out.render_search_history(&history.get().await));
            }
            Self::Suggest { text } => {
                for query in history.suggestions(text).await {
                    out.print(&query);
                }
            }
            Self::Remove { query } => {
                if !history.get().await.contains(query) {
                    out.print(&format!("'{}' is not in search history.", query));
                    return Ok(());
                }
                history.remove(query).await?;
                out.print(&out.success(&format!("Removed '{}' from search history.", query)));
            }
            Self::Clear { yes } => {
                if !yes && !confirm("Are you sure you want to clear all search history?")? {
                    return Ok(());
                }
                history.clear().await?;
                out.print(&out.success("Search history cleared."));
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum WatchHistoryAction {
    /// List watched videos, newest first
    List,

    /// Remove one video
    Remove {
        /// Video id
        id: String,
    },

    /// Remove every video
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl WatchHistoryAction {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let history = ctx.browser.watch_history();
        let out = &ctx.formatter;

        match self {
            Self::List => {
                out.print(&out.render_watch_history(&history.get().await));
            }
            Self::Remove { id } => {
                if !history.contains(id).await {
                    out.print(&format!("'{}' is not in watch history.", id));
                    return Ok(());
                }
                history.remove(id).await?;
                out.print(&out.success(&format!("Removed '{}' from watch history.", id)));
            }
            Self::Clear { yes } => {
                if !yes && !confirm("Are you sure you want to clear all watch history?")? {
                    return Ok(());
                }
                history.clear().await?;
                out.print(&out.success("Watch history cleared."));
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigAction {
    pub fn execute(&self, config: &Config, formatter: &Formatter) -> Result<()> {
        match self {
            Self::Show => {
                formatter.print(&render_config(config)?);
            }
            Self::Path => {
                println!("{}", Config::default_path()?.display());
            }
            Self::Init { force } => {
                let path = Config::default_path()?;
                init_config(&path, *force)?;
                formatter.print(&formatter.success(&format!(
                    "Wrote default configuration to {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// TOML of `config` with the API key masked
pub fn render_config(config: &Config) -> Result<String> {
    let mut shown = config.clone();
    shown.api = config.resolved_api();
    if let Some(key) = shown.api.api_key.as_mut() {
        *key = mask_key(key);
    }

    toml::to_string_pretty(&shown)
        .map_err(|e| CliError::configuration(format!("Failed to serialize config: {}", e)))
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::configuration(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to_file(path)
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
