//! Output formatting and display utilities
//!
//! This module handles:
//! - Rendering result grids and history lists as tables
//! - Color coding of titles, channels and hints
//! - Number and text shortening helpers

pub mod formatter;

// Re-export key types for convenience
pub use formatter::Formatter;

/// Format a count with thousands separators, e.g. `1234567` as `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten `text` to at most `max` characters, ending in `...` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Render an epoch-millisecond timestamp in local time
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}
