use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn format_timestamp(parsed: Option<DateTime<Utc>>, raw: &str) -> String {
    match parsed {
        Some(timestamp) => timestamp.format("%b %-d, %Y %H:%M:%S").to_string(),
        None if raw.trim().is_empty() => "unknown time".to_owned(),
        None => raw.to_owned(),
    }
}

pub fn format_date(parsed: Option<DateTime<Utc>>, raw: &str) -> String {
    match parsed {
        Some(timestamp) => timestamp.format("%b %-d, %Y").to_string(),
        None => raw.to_owned(),
    }
}

pub fn format_duration(seconds: Option<i64>) -> String {
    match seconds {
        Some(seconds) => format!("{seconds}s"),
        None => "Unknown".to_owned(),
    }
}

/// `assigned_to` becomes `assigned to`.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

/// Strings and scalars as-is; arrays and objects pretty-printed.
pub fn format_detail_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        format!("{}\u{2026}", head.trim_end())
    } else {
        head
    }
}
