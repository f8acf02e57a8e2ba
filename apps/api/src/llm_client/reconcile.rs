//! Reconciliation of raw model output into a typed result.
//!
//! Models are told to answer with bare JSON but routinely wrap it in a
//! markdown fence, or answer in prose. `reconcile` never fails: anything that
//! does not decode to a JSON object comes back as a tagged `Fallback` so
//! callers have to handle both shapes explicitly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Leading fence with an optional language tag, or a trailing fence.
/// Anchored to the ends of the string; fences in the middle are left alone.
static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[\w+-]*\s*|\s*```$").unwrap());

/// Why a model response could not be used as a structured result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    InvalidJson,
    NotAnObject,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::InvalidJson => "invalid JSON",
            FallbackReason::NotAnObject => "JSON is not an object",
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of reconciling one model response. Exactly one shape is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciledResponse {
    Structured(Map<String, Value>),
    Fallback { text: String, reason: FallbackReason },
}

impl ReconciledResponse {
    pub fn is_structured(&self) -> bool {
        matches!(self, ReconciledResponse::Structured(_))
    }

    /// JSON form written to disk. A fallback keeps the unparsed text under
    /// `analysis` and records why it was not decoded.
    pub fn into_value(self) -> Value {
        match self {
            ReconciledResponse::Structured(map) => Value::Object(map),
            ReconciledResponse::Fallback { text, reason } => json!({
                "analysis": text,
                "parse_error": reason.as_str(),
            }),
        }
    }
}

/// Strips one outer ```` ``` ```` / ```` ```json ```` fence pair from model output.
pub fn strip_code_fences(text: &str) -> String {
    RE_OUTER_FENCE
        .replace_all(text.trim(), "")
        .trim()
        .to_string()
}

/// Converts raw model text into a `ReconciledResponse`. Never fails.
pub fn reconcile(raw_text: &str) -> ReconciledResponse {
    let stripped = strip_code_fences(raw_text);

    match serde_json::from_str::<Value>(&stripped) {
        Ok(Value::Object(map)) => ReconciledResponse::Structured(map),
        Ok(other) => {
            debug!("Model returned JSON {} instead of an object", json_kind(&other));
            ReconciledResponse::Fallback {
                text: stripped,
                reason: FallbackReason::NotAnObject,
            }
        }
        Err(e) => {
            debug!("Model output is not valid JSON: {e}");
            ReconciledResponse::Fallback {
                text: stripped,
                reason: FallbackReason::InvalidJson,
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_fenced_json() {
        let result = reconcile("```json\n{\"a\":1}\n```");
        let mut expected = Map::new();
        expected.insert("a".to_string(), json!(1));
        assert_eq!(result, ReconciledResponse::Structured(expected));
    }

    #[test]
    fn test_reconcile_plain_text_falls_back_verbatim() {
        let result = reconcile("not json at all");
        match result {
            ReconciledResponse::Fallback { text, reason } => {
                assert_eq!(text, "not json at all");
                assert_eq!(reason.to_string(), "invalid JSON");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_reconcile_unfenced_json() {
        let result = reconcile(r#"  {"job_title": "Backend Engineer", "skills": ["Rust"]}  "#);
        assert!(result.is_structured());
    }

    #[test]
    fn test_reconcile_array_is_not_structured() {
        let result = reconcile("```\n[1, 2, 3]\n```");
        assert_eq!(
            result,
            ReconciledResponse::Fallback {
                text: "[1, 2, 3]".to_string(),
                reason: FallbackReason::NotAnObject,
            }
        );
    }

    #[test]
    fn test_strip_code_fences_with_other_language_tag() {
        assert_eq!(strip_code_fences("```javascript\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_code_fences_leaves_inner_fences() {
        let input = "{\"snippet\": \"```rust\\nfn main() {}\\n```\"}";
        assert_eq!(strip_code_fences(input), input);
        assert!(reconcile(input).is_structured());
    }

    #[test]
    fn test_strip_code_fences_only_leading_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 2}"), "{\"a\": 2}");
    }

    #[test]
    fn test_fallback_into_value_keeps_text() {
        let value = reconcile("The candidate is a strong match.").into_value();
        assert_eq!(value["analysis"], "The candidate is a strong match.");
        assert_eq!(value["parse_error"], "invalid JSON");
    }

    #[test]
    fn test_truncated_json_falls_back() {
        let result = reconcile("```json\n{\"executive_summary\": {\"match\": 80\n```");
        assert!(matches!(
            result,
            ReconciledResponse::Fallback {
                reason: FallbackReason::InvalidJson,
                ..
            }
        ));
    }
}
