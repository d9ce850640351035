//! Non-interactive `explain <VERSE>` mode.

use std::io::{self, Write};

use crate::explainer::ExplainerView;

/// Run one request for `verse` and report it: the explanation goes to
/// `out`, the user-facing error message to `err`. Returns `true` when no
/// error was recorded.
pub async fn explain_once(
    view: &mut ExplainerView,
    verse: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    view.set_verse_reference(verse);
    view.request_explanation().await;
    let state = view.state();
    if !state.error_message.is_empty() {
        writeln!(err, "{}", state.error_message)?;
        return Ok(false);
    }
    writeln!(out, "{}", state.explanation_text)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explainer::error::{EMPTY_REFERENCE_MESSAGE, REQUEST_FAILED_MESSAGE};
    use crate::llm::mock::{server_error, text_response, ScriptedSource};

    async fn run(source: std::sync::Arc<ScriptedSource>, verse: &str) -> (bool, String, String) {
        let mut view = ExplainerView::new(source);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = explain_once(&mut view, verse, &mut out, &mut err)
            .await
            .unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn success_prints_explanation() {
        let source = ScriptedSource::replying(vec![text_response("Example explanation.")]);
        let (ok, out, err) = run(source.clone(), "SB 1.1.1").await;
        assert!(ok);
        assert_eq!(out, "Example explanation.\n");
        assert!(err.is_empty());
        assert_eq!(source.prompts().len(), 1);
        assert!(source.prompts()[0].contains("SB 1.1.1"));
    }

    #[tokio::test]
    async fn request_failure_reports_generic_message() {
        let source = ScriptedSource::replying(vec![server_error()]);
        let (ok, out, err) = run(source, "SB 1.1.1").await;
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, format!("{REQUEST_FAILED_MESSAGE}\n"));
    }

    #[tokio::test]
    async fn blank_reference_never_sends() {
        let source = ScriptedSource::replying(vec![]);
        let (ok, out, err) = run(source.clone(), "   ").await;
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, format!("{EMPTY_REFERENCE_MESSAGE}\n"));
        assert!(source.prompts().is_empty());
    }

    #[tokio::test]
    async fn empty_candidates_print_empty_line() {
        let source = ScriptedSource::replying(vec![Ok(Default::default())]);
        let (ok, out, err) = run(source, "SB 1.1.1").await;
        assert!(ok);
        assert_eq!(out, "\n");
        assert!(err.is_empty());
    }
}
