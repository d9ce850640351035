//! Rust types for the Gemini `generateContent` API.
//!
//! Serde-serializable to JSON for HTTP calls. Every response field is
//! optional on the wire; a missing path is data, not a decode error.

use serde::{Deserialize, Serialize};

/// Resolve model aliases to full Gemini model IDs.
pub fn resolve_model(alias: &str) -> &str {
    match alias {
        "pro" => "gemini-1.5-pro-002",
        "flash" => "gemini-1.5-flash-002",
        _ => alias, // pass through full model IDs
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }

    /// Text of the first part of the first content, if any.
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// A content block: an ordered list of parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single part. Only text parts are used here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part. Later candidates and
    /// parts are ignored.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_model_aliases() {
        assert_eq!(resolve_model("pro"), "gemini-1.5-pro-002");
        assert_eq!(resolve_model("flash"), "gemini-1.5-flash-002");
    }

    #[test]
    fn resolve_model_passthrough() {
        assert_eq!(resolve_model("gemini-2.0-flash"), "gemini-2.0-flash");
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = GenerateContentRequest::from_prompt("Explain SB 1.1.1");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"parts": [{"text": "Explain SB 1.1.1"}]}]})
        );
        assert_eq!(req.prompt_text(), Some("Explain SB 1.1.1"));
    }

    #[test]
    fn response_first_candidate_text() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Example explanation."}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), Some("Example explanation."));
    }

    #[test]
    fn response_ignores_later_candidates_and_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second part"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), Some("first"));
    }

    #[test]
    fn response_missing_paths_decode() {
        for json in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
            assert_eq!(resp.text(), None, "{json}");
        }
    }
}
