//! Tolerant JSON extraction from free-form model output.
//!
//! Language models often wrap the requested object in prose or markdown
//! fences. This locates the first balanced `{...}` span (brace-aware inside
//! string literals) and parses only that span.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonSpanError {
    /// No balanced object span exists in the text
    #[error("Failed to parse AI response")]
    NoObject,

    /// A span was found but is not valid JSON
    #[error("Failed to parse AI response: {0}")]
    Invalid(String),
}

/// Return the first balanced `{...}` span in `text`, if any.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Locate and parse the first JSON object embedded in `text`.
pub fn parse_first_json_object(text: &str) -> Result<Value, JsonSpanError> {
    let span = first_json_object(text).ok_or(JsonSpanError::NoObject)?;
    serde_json::from_str(span).map_err(|e| JsonSpanError::Invalid(e.to_string()))
}
