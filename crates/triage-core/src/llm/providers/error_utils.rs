//! Provider error body sanitization.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_ERROR_TEXT_CHARS: usize = 512;

static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer token regex")
});

static SECRET_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bsk-[A-Za-z0-9_\-]{8,}").expect("valid secret key regex"));

/// Redact credentials from a provider error body and cap its length.
pub fn sanitize_provider_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    let redacted = BEARER_TOKEN_RE.replace_all(trimmed, "Bearer [REDACTED]");
    let redacted = SECRET_KEY_RE.replace_all(&redacted, "[REDACTED]");

    if redacted.chars().count() <= MAX_ERROR_TEXT_CHARS {
        return redacted.into_owned();
    }
    let mut truncated: String = redacted.chars().take(MAX_ERROR_TEXT_CHARS).collect();
    truncated.push_str("...(truncated)");
    truncated
}
