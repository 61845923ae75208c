use super::{format_count, format_timestamp, truncate};
use crate::core::{SearchPage, VideoSummary};
use crate::history::WatchHistoryEntry;
use crate::runtime::WatchView;
use colored::Colorize;
use prettytable::{format, row, Table};

const TITLE_WIDTH: usize = 60;
const DESCRIPTION_WIDTH: usize = 80;

/// Renders browser results and history for the terminal
#[derive(Debug, Clone)]
pub struct Formatter {
    color: bool,
    quiet: bool,
    descriptions: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            color: true,
            quiet: false,
            descriptions: false,
        }
    }
}

impl Formatter {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self {
            color,
            quiet,
            ..Self::default()
        }
    }

    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Print a rendered block unless quiet
    pub fn print(&self, text: &str) {
        if !self.quiet && !text.is_empty() {
            println!("{}", text.trim_end());
        }
    }

    /// Confirmation line for a completed action
    pub fn success(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "✓".green(), message)
        } else {
            message.to_string()
        }
    }

    pub fn render_page(&self, heading: &str, page: &SearchPage) -> String {
        let mut out = self.heading(heading);

        if page.is_empty() {
            out.push_str(&self.dim("No results."));
            out.push('\n');
            return out;
        }

        out.push_str(&self.video_table(&page.items).to_string());

        if let Some(total) = page.total_results {
            out.push_str(&self.dim(&format!("About {} results", format_count(total))));
            out.push('\n');
        }
        if let Some(token) = &page.prev_page_token {
            out.push_str(&format!("Previous page: --page {}\n", token));
        }
        if let Some(token) = &page.next_page_token {
            out.push_str(&format!("Next page:     --page {}\n", token));
        }
        out
    }

    pub fn render_watch(&self, id: &str, view: &WatchView) -> String {
        let Some(details) = &view.details else {
            return format!("{}\n", self.dim(&format!("Video '{}' could not be loaded.", id)));
        };

        let summary = &details.summary;
        let mut out = self.heading(&summary.title);

        if !summary.channel_title.is_empty() {
            out.push_str(&format!("{}\n", self.accent(&summary.channel_title)));
        }

        let stats = &details.statistics;
        let counts: Vec<String> = [
            (stats.view_count, "views"),
            (stats.like_count, "likes"),
            (stats.comment_count, "comments"),
        ]
        .into_iter()
        .filter_map(|(count, label)| count.map(|n| format!("{} {}", format_count(n), label)))
        .collect();
        if !counts.is_empty() {
            out.push_str(&format!("{}\n", counts.join(" · ")));
        }

        out.push_str(&format!("Player: {}\n", details.embed_url()));
        out.push_str(&format!("Watch:  {}\n", details.watch_url()));

        if !summary.description.is_empty() {
            out.push('\n');
            out.push_str(summary.description.trim_end());
            out.push('\n');
        }

        if !view.related.is_empty() {
            out.push('\n');
            out.push_str(&self.heading("Related"));
            out.push_str(&self.video_table(&view.related).to_string());
        }
        out
    }

    pub fn render_search_history(&self, queries: &[String]) -> String {
        let mut out = self.heading("Search history");
        if queries.is_empty() {
            out.push_str(&self.dim("No search history yet."));
            out.push('\n');
            return out;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        for (i, query) in queries.iter().enumerate() {
            table.add_row(row![format!("{}.", i + 1), query]);
        }
        out.push_str(&table.to_string());
        out
    }

    pub fn render_watch_history(&self, entries: &[WatchHistoryEntry]) -> String {
        let mut out = self.heading("Watch history");
        if entries.is_empty() {
            out.push_str(&self.dim("No watch history yet. Start watching videos!"));
            out.push('\n');
            return out;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(row!["ID", "Title", "Watched"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                truncate(&entry.title, TITLE_WIDTH),
                format_timestamp(entry.timestamp)
            ]);
        }
        out.push_str(&table.to_string());
        out
    }

    fn video_table(&self, videos: &[VideoSummary]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(row!["ID", "Title", "Channel"]);

        for video in videos {
            let mut title = truncate(&video.title, TITLE_WIDTH);
            if self.descriptions && !video.description.is_empty() {
                title.push('\n');
                title.push_str(&truncate(&video.description, DESCRIPTION_WIDTH));
            }
            table.add_row(row![video.id, title, video.channel_title]);
        }
        table
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            format!("{}\n", text.bold())
        } else {
            format!("{}\n", text)
        }
    }

    fn accent(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
