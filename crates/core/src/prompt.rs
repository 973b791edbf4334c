//! Prompt text sanitization, validation, and share-token minting.
//!
//! Prompt text is sanitized before storage (whitespace collapsed, markup
//! characters stripped) and re-validated server-side regardless of what the
//! client checked.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum length for prompt text in characters, after sanitization.
pub const MIN_PROMPT_TEXT_LENGTH: usize = 10;

/// Maximum length for prompt text in characters.
pub const MAX_PROMPT_TEXT_LENGTH: usize = 10_000;

/// Maximum length for the free-form prompt type label.
pub const MAX_PROMPT_TYPE_LENGTH: usize = 50;

/// Runs of whitespace, collapsed to a single space during sanitization.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Characters stripped from prompt text during sanitization.
static STRIPPED_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>{}\[\]\\^~]").expect("valid regex"));

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Sanitize raw prompt text: collapse whitespace runs to single spaces,
/// strip `<>{}[]\^~`, and trim.
pub fn sanitize_prompt_text(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let stripped = STRIPPED_CHARS_RE.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate sanitized prompt text: non-empty and within length bounds.
pub fn validate_prompt_text(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::Validation(
            "Prompt text must not be empty".to_string(),
        ));
    }
    if text.len() < MIN_PROMPT_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt text must be at least {MIN_PROMPT_TEXT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    if text.len() > MAX_PROMPT_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt text exceeds maximum length of {MAX_PROMPT_TEXT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}

/// Validate a prompt type label: length check only (the label is free-form).
pub fn validate_prompt_type(prompt_type: &str) -> Result<(), CoreError> {
    if prompt_type.len() > MAX_PROMPT_TYPE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt type exceeds maximum length of {MAX_PROMPT_TYPE_LENGTH} characters (got {})",
            prompt_type.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Share tokens
// ---------------------------------------------------------------------------

/// Mint a new share token (UUID v4).
///
/// Tokens are never reused: clearing a prompt's token discards it, and a
/// later re-share mints a fresh one.
pub fn new_share_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
