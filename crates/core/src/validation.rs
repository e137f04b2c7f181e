//! Input-shape validation and text escaping.
//!
//! All functions are pure and total: malformed input yields `false`/`None`,
//! never an error.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Escape text for safe interpolation into markup.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{7,}$").expect("valid phone pattern"));

/// `local@domain.tld` shape check on the trimmed value.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Optional leading `+`, then at least 7 of digits, whitespace, `-`, `(`, `)`.
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

/// Contact fields accept either an email address or a phone number.
pub fn is_contact(value: &str) -> bool {
    is_email(value) || is_phone(value)
}

/// Case-insensitive `http://` / `https://` prefix check.
pub fn has_http_scheme(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Serialized form of an `http(s)` URL, or `None` for blank, malformed or
/// other schemes.
pub fn safe_http_url(value: &str) -> Option<String> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = Url::parse(raw).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.into())
}
