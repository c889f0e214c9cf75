//! Small display helpers shared across workflow surfaces.

use chrono::{DateTime, Utc};

/// Shorten a token for table display; full values go through the
/// clipboard, never the screen.
pub fn token_preview(token: &str) -> String {
    if token.is_empty() {
        return "-".to_string();
    }
    match token.char_indices().nth(20) {
        Some((idx, _)) => format!("{}...", &token[..idx]),
        None => token.to_string(),
    }
}

/// Render an optional timestamp for table cells, `-` when absent.
pub fn format_time(time: Option<&DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}
