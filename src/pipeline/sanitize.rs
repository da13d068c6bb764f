//! Sanitisation: raw model reply text → parsed JSON metadata.
//!
//! ## Why is sanitisation necessary?
//!
//! Even well-prompted models occasionally wrap their reply in
//! ` ```json ... ``` ` fences despite the prompt saying not to. Stripping
//! one outer fence pair before parsing rescues an otherwise perfect reply.
//! Nothing else is repaired: a reply that still fails to parse after
//! fence-stripping is reported as-is, because guessing at broken JSON would
//! silently corrupt the metadata it carries.
//!
//! The raw reply is NOT logged here — the caller logs it with request
//! context when parsing fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json|JSON)?\s*(.*?)\s*```$").unwrap());

/// Strip one outer code-fence pair, if present.
///
/// Accepts ```` ```json ````, ```` ```JSON ````, and bare ```` ``` ````
/// fences. Anything not wrapped in a single outer pair passes through
/// unchanged, including backticks inside the JSON itself.
pub fn strip_code_fences(input: &str) -> String {
    let trimmed = input.trim();
    if let Some(caps) = RE_OUTER_FENCES.captures(trimmed) {
        caps[1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse the model reply as JSON after fence-stripping.
///
/// The returned [`Value`] is the metadata document exactly as the model
/// wrote it. On failure the error carries only the parser's message; the
/// offending text stays with the caller.
pub fn parse_metadata(raw: &str) -> Result<Value, ExtractError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| ExtractError::InvalidFormat {
        detail: e.to_string(),
    })
}
