//! Lenient JSON recovery for machine-generated responses.
//!
//! Language-model output often wraps JSON in a code fence, leaves a
//! trailing comma, or folds the payload across lines. [`parse_lenient`]
//! tries the strict parse first and falls back to a single repaired
//! attempt before giving up.

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

const SNIPPET_CHARS: usize = 500;

/// Parse a JSON payload out of a raw response string.
///
/// A fenced block (```` ```json ... ``` ````) takes priority over the
/// whole response. If the strict parse fails, one repair pass removes
/// newlines and trailing commas and the parse is retried; a second
/// failure surfaces the original error with a bounded snippet of the
/// raw response.
pub fn parse_lenient(response: &str) -> Result<Value> {
    let fence = Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap();
    let payload = fence
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| response.trim().to_string());

    match serde_json::from_str(&payload) {
        Ok(value) => Ok(value),
        Err(first) => {
            let repaired = repair(&payload);
            serde_json::from_str(&repaired).map_err(|_| Error::JsonParse {
                message: first.to_string(),
                // Snippet the response, not the extracted payload, so the
                // prose around a fenced block stays in the diagnostic.
                snippet: response.chars().take(SNIPPET_CHARS).collect(),
            })
        }
    }
}

fn repair(payload: &str) -> String {
    let flattened = payload.replace(['\r', '\n'], " ");
    let object_commas = Regex::new(r",\s*\}").unwrap();
    let array_commas = Regex::new(r",\s*\]").unwrap();
    let pass = object_commas.replace_all(&flattened, "}");
    array_commas.replace_all(&pass, "]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let value = parse_lenient(r#"{"title": "Appendix A"}"#).unwrap();
        assert_eq!(value["title"], "Appendix A");
    }

    #[test]
    fn test_fenced_json_preferred_over_prose() {
        let response = "Here is the summary you asked for:\n```json\n{\"count\": 3}\n```\nLet me know!";
        let value = parse_lenient(response).unwrap();
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_fence_without_language_tag() {
        let value = parse_lenient("```\n[1, 2, 3]\n```").unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(3));
    }

    #[test]
    fn test_trailing_comma_repaired() {
        let value = parse_lenient("{\"items\": [1, 2,], \"done\": true,}").unwrap();
        assert_eq!(value["items"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["done"], true);
    }

    #[test]
    fn test_garbage_reports_snippet() {
        let err = parse_lenient("not json at all").unwrap_err();
        match err {
            Error::JsonParse { snippet, .. } => assert!(snippet.contains("not json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_snippet_keeps_prose_around_fence() {
        let response = "Model said something first.\n```json\n{\"a\": oops}\n```";
        let err = parse_lenient(response).unwrap_err();
        match err {
            Error::JsonParse { snippet, .. } => {
                assert!(snippet.starts_with("Model said something first."))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_snippet_is_bounded() {
        let long = "x".repeat(2_000);
        let err = parse_lenient(&long).unwrap_err();
        match err {
            Error::JsonParse { snippet, .. } => assert_eq!(snippet.chars().count(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
