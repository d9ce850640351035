//! Instruction template for verse explanations.
//!
//! The reference is embedded verbatim: whatever the user typed, including
//! surrounding whitespace, lands in the prompt.

use crate::llm::types::GenerateContentRequest;

pub use explainer_config::DEFAULT_PROMPT_TEMPLATE;

/// Placeholder replaced by the verse reference.
pub const VERSE_PLACEHOLDER: &str = "{verse}";

/// Interpolate `verse` into `template`.
///
/// Templates without the placeholder get the reference appended after a
/// single space.
pub fn build_prompt(template: &str, verse: &str) -> String {
    if template.contains(VERSE_PLACEHOLDER) {
        template.replace(VERSE_PLACEHOLDER, verse)
    } else {
        format!("{template} {verse}")
    }
}

/// Build the API request for a verse reference.
pub fn build_request(template: &str, verse: &str) -> GenerateContentRequest {
    GenerateContentRequest::from_prompt(build_prompt(template, verse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_frames_scholar() {
        let prompt = build_prompt(DEFAULT_PROMPT_TEMPLATE, "SB 1.1.1");
        assert!(prompt.starts_with("You are a knowledgeable scholar of Vedic literature"));
        assert!(prompt.ends_with("maintaining the spiritual essence: SB 1.1.1"));
        assert!(!prompt.contains(VERSE_PLACEHOLDER));
    }

    #[test]
    fn reference_embedded_verbatim() {
        let prompt = build_prompt(DEFAULT_PROMPT_TEMPLATE, "  SB 1.1.1 ");
        assert!(prompt.ends_with(":   SB 1.1.1 "));
    }

    #[test]
    fn custom_template_placeholder() {
        assert_eq!(build_prompt("Explain [{verse}] briefly", "BG 2.47"), "Explain [BG 2.47] briefly");
    }

    #[test]
    fn template_without_placeholder_appends() {
        assert_eq!(build_prompt("Explain:", "SB 10.1.1"), "Explain: SB 10.1.1");
    }

    #[test]
    fn request_carries_prompt() {
        let req = build_request("Explain {verse}", "SB 1.2.3");
        assert_eq!(req.prompt_text(), Some("Explain SB 1.2.3"));
    }
}
