pub mod dialog;
pub mod panel;
pub mod status_bar;

use std::fmt::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Format a timestamp with a user-supplied strftime pattern. Invalid patterns
/// yield an empty string instead of panicking inside `Display`.
pub fn format_timestamp(time: SystemTime, pattern: &str) -> String {
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    match write!(out, "{}", local.format(pattern)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

/// Fit `text` into exactly `width` columns, cutting with `~` when too long.
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{:<width$}", text, width = width);
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('~');
    cut
}
