//! Markup neutralization for persisted names and paths.
//!
//! Stored values may later be rendered into HTML by clients, so tags are
//! stripped and the remaining special characters escaped before writes.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>?").expect("valid tag regex"));

/// Strips markup tags, then escapes `& < > " '` as HTML entities.
pub fn sanitize_text(value: &str) -> String {
    let stripped = TAG_RE.replace_all(value, "");
    let mut escaped = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}
