//! Listing transformer: sends a snapshot to the language model and parses
//! the structured listing out of its reply.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::models::{OptimizedListing, ProductSnapshot};
use super::prompts::{build_optimization_prompt, OPTIMIZER_SYSTEM_PROMPT};
use crate::common::{parse_first_json_object, UpstreamError};
use crate::kernel::{BaseAI, ChatMessage, CompletionRequest};

pub const OPTIMIZER_TEMPERATURE: f32 = 0.7;
pub const OPTIMIZER_MAX_TOKENS: u32 = 1500;

/// Fields the model must return, by their wire names.
const REQUIRED_FIELDS: [&str; 4] = ["title", "bulletPoints", "description", "keywords"];

const INVALID_STRUCTURE: &str = "Invalid optimization response structure";

pub fn optimization_request(snapshot: &ProductSnapshot) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(OPTIMIZER_SYSTEM_PROMPT),
            ChatMessage::user(build_optimization_prompt(snapshot)),
        ],
        temperature: OPTIMIZER_TEMPERATURE,
        max_tokens: OPTIMIZER_MAX_TOKENS,
    }
}

/// Optimize a scraped listing. A single attempt; no retry.
pub async fn optimize_listing(
    snapshot: &ProductSnapshot,
    ai: &dyn BaseAI,
) -> Result<OptimizedListing, UpstreamError> {
    info!(asin = %snapshot.asin, "Optimizing product listing");

    let raw = ai.complete(optimization_request(snapshot)).await.map_err(|e| {
        warn!(asin = %snapshot.asin, error = %e, "Language model call failed");
        e
    })?;

    debug!(asin = %snapshot.asin, response_length = raw.len(), "Language model responded");

    parse_optimized_listing(&raw)
}

/// Parse and validate a raw model reply.
///
/// The reply may wrap the JSON object in prose or code fences. All four
/// required fields must be present and truthy (non-null, non-empty string,
/// non-false, non-zero).
pub fn parse_optimized_listing(raw: &str) -> Result<OptimizedListing, UpstreamError> {
    let value = parse_first_json_object(raw)
        .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| !is_truthy(value.get(**field)))
    {
        debug!(field = missing, "Optimization response missing required field");
        return Err(UpstreamError::MalformedResponse(INVALID_STRUCTURE.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| UpstreamError::MalformedResponse(format!("{INVALID_STRUCTURE}: {e}")))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "title": "Silent Wireless Mouse with USB Receiver",
        "bulletPoints": ["Silent clicks", "Plug and play", "Long battery", "Ergonomic", "Compact"],
        "description": "A quiet mouse for focused work.",
        "keywords": ["silent mouse", "wireless mouse", "usb mouse"]
    }"#;

    #[test]
    fn test_parses_wrapped_response() {
        let raw = format!("Sure! Here is the optimized listing:\n```json\n{VALID}\n```");
        let listing = parse_optimized_listing(&raw).unwrap();

        assert_eq!(listing.title, "Silent Wireless Mouse with USB Receiver");
        assert_eq!(listing.bullet_points.len(), 5);
        assert_eq!(listing.keywords[0], "silent mouse");
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut value: Value = serde_json::from_str(VALID).unwrap();
            value.as_object_mut().unwrap().remove(field);
            value["extra"] = Value::String("lots of other content".repeat(20));

            let err = parse_optimized_listing(&value.to_string()).unwrap_err();
            assert!(
                matches!(err, UpstreamError::MalformedResponse(ref m) if m == INVALID_STRUCTURE),
                "field {field} should be required"
            );
        }
    }

    #[test]
    fn test_null_or_empty_fields_are_rejected() {
        let raw = r#"{"title": "", "bulletPoints": ["a"], "description": "d", "keywords": ["k"]}"#;
        assert!(parse_optimized_listing(raw).is_err());

        let raw = r#"{"title": "t", "bulletPoints": null, "description": "d", "keywords": ["k"]}"#;
        assert!(parse_optimized_listing(raw).is_err());
    }

    #[test]
    fn test_wrong_field_types_are_rejected() {
        let raw = r#"{"title": "t", "bulletPoints": "one long bullet", "description": "d", "keywords": ["k"]}"#;
        assert!(matches!(
            parse_optimized_listing(raw),
            Err(UpstreamError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_no_json_in_response() {
        let err = parse_optimized_listing("I'm sorry, I can't do that.").unwrap_err();
        assert_eq!(err.to_string(), "AI optimization failed: Failed to parse AI response");
    }

    #[test]
    fn test_bullet_count_is_not_enforced() {
        let raw = r#"{"title": "t", "bulletPoints": ["only one"], "description": "d", "keywords": ["k"]}"#;
        assert_eq!(parse_optimized_listing(raw).unwrap().bullet_points.len(), 1);
    }

    #[test]
    fn test_request_parameters() {
        let snapshot = ProductSnapshot {
            asin: "B08N5WRWNW".into(),
            title: "Mouse".into(),
            bullet_points: vec!["Quiet".into()],
            description: "Quiet".into(),
        };
        let request = optimization_request(&snapshot);

        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 1500);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.contains("Original Title: Mouse"));
    }
}
