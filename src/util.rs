//! Formatting and content sniffing helpers shared by page generators.

use std::time::{SystemTime, UNIX_EPOCH};

/// Bytes inspected when deciding whether a blob is binary.
const BINARY_SNIFF_LEN: usize = 8000;

/// Current Unix time in seconds, zero if the clock is before the epoch.
pub fn now_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Formats a Unix timestamp relative to `now`.
///
/// Produces strings like "5 min ago" or "2 weeks ago". Timestamps in the
/// future (clock skew in commit metadata) read as "just now".
///
/// # Arguments
///
/// * `seconds`: Timestamp to describe
/// * `now`: Reference time, usually [`now_seconds`]
pub fn format_relative_time(seconds: i64, now: i64) -> String {
    let secs = now.saturating_sub(seconds).max(0);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    match () {
        _ if minutes < 1 => "just now".to_string(),
        _ if minutes < 60 => format!("{} min ago", minutes),
        _ if hours < 24 => format!("{} hr ago", hours),
        _ if days < 7 => format!("{} days ago", days),
        _ if days < 30 => format!("{} weeks ago", days / 7),
        _ if days < 365 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// Formats byte count as human readable file size with binary prefixes.
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Guesses whether blob content is binary.
///
/// Same heuristic git uses for diffs: a NUL byte within the first 8000
/// bytes marks the content as binary.
pub fn is_binary(content: &[u8]) -> bool {
    content.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}
