use chrono::{DateTime, Utc};

use crate::models::MovieId;

pub const DEFAULT_SUMMARY_LEN: usize = 150;

/// Cuts `text` to `max_len` characters and appends `...` when it was longer
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Long US date, e.g. `January 5, 2024`
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

pub fn stream_url(api_base_url: &str, id: MovieId) -> String {
    format!("{}/stream/{}", api_base_url.trim_end_matches('/'), id)
}
