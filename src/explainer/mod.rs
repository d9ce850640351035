//! Explainer View — verse reference in, explanation out.
//!
//! Owns `QueryState` and the single in-flight request. Two ways to run a
//! request:
//!
//! - `request_explanation().await` — validate, call, settle, inline.
//! - `spawn_explanation()` + `poll_settled()` — the request runs as a tokio
//!   task so an event loop keeps drawing; `cancel()` aborts it.
//!
//! Either way the state transitions are the same: set loading and clear
//! the error, settle explanation-or-error, clear loading. Loading is
//! cleared exactly once per started request, including when the awaiting
//! future is dropped.

pub mod error;
pub mod prompt;

use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::llm::client::LlmError;
use crate::llm::types::{GenerateContentRequest, GenerateContentResponse};
use crate::llm::ExplanationSource;
use error::ExplainError;

/// What to do with a success response that carries no candidate text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponsePolicy {
    /// Show an empty explanation, no error.
    #[default]
    Lenient,
    /// Report it like any other failed request.
    Strict,
}

impl ResponsePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub verse_reference: String,
    pub explanation_text: String,
    pub is_loading: bool,
    pub error_message: String,
}

/// Which outcome drives the screen. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

impl QueryState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if !self.error_message.is_empty() {
            Phase::Failure
        } else if !self.explanation_text.is_empty() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

type Outcome = Result<GenerateContentResponse, LlmError>;

/// Clears `is_loading` when dropped.
struct Settling<'a> {
    state: &'a mut QueryState,
}

impl Drop for Settling<'_> {
    fn drop(&mut self) {
        self.state.is_loading = false;
    }
}

/// Apply a settled request to the state. Loading is left to the caller.
fn apply_outcome(
    state: &mut QueryState,
    policy: ResponsePolicy,
    outcome: Result<GenerateContentResponse, ExplainError>,
) {
    let text = outcome.and_then(|resp| match resp.text() {
        Some(text) => Ok(text.to_string()),
        None if policy == ResponsePolicy::Strict => Err(ExplainError::MissingText),
        None => {
            warn!("response carried no candidate text; showing empty explanation");
            Ok(String::new())
        }
    });

    match text {
        Ok(text) => {
            info!(chars = text.chars().count(), "explanation received");
            state.explanation_text = text;
        }
        Err(err) => {
            match std::error::Error::source(&err) {
                Some(cause) => error!(error = %cause, "explanation request failed"),
                None => error!(error = ?err, "explanation request failed"),
            }
            state.error_message = err.to_string();
        }
    }
}

/// The Explainer View model.
pub struct ExplainerView {
    state: QueryState,
    source: Arc<dyn ExplanationSource>,
    template: String,
    policy: ResponsePolicy,
    in_flight: Option<JoinHandle<Outcome>>,
}

impl ExplainerView {
    /// A view with the default prompt template and lenient policy.
    pub fn new(source: Arc<dyn ExplanationSource>) -> Self {
        Self {
            state: QueryState::default(),
            source,
            template: prompt::DEFAULT_PROMPT_TEMPLATE.to_string(),
            policy: ResponsePolicy::default(),
            in_flight: None,
        }
    }

    /// A view using the template and policy from configuration.
    pub fn from_config(
        source: Arc<dyn ExplanationSource>,
        config: &explainer_config::ExplainerConfig,
    ) -> Self {
        Self::new(source)
            .with_template(&config.prompt_template)
            .with_policy(ResponsePolicy::from_strict(config.strict_response))
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// The trigger is disabled while a request is in flight.
    pub fn can_trigger(&self) -> bool {
        !self.state.is_loading
    }

    /// Replace the verse reference (the input field's content).
    pub fn set_verse_reference(&mut self, verse: impl Into<String>) {
        self.state.verse_reference = verse.into();
    }

    /// Validate and transition into loading. Returns the request to send,
    /// or `None` when nothing should be sent.
    fn begin(&mut self) -> Option<GenerateContentRequest> {
        if self.state.is_loading {
            debug!("trigger ignored: request already in flight");
            return None;
        }
        if self.state.verse_reference.trim().is_empty() {
            self.state.error_message = ExplainError::EmptyReference.to_string();
            return None;
        }

        self.state.is_loading = true;
        self.state.error_message.clear();
        info!(verse = %self.state.verse_reference.trim(), "requesting explanation");
        Some(prompt::build_request(
            &self.template,
            &self.state.verse_reference,
        ))
    }

    /// Validate, send one request, and settle the state.
    ///
    /// No-op while another request is in flight.
    pub async fn request_explanation(&mut self) {
        let Some(request) = self.begin() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let guard = Settling {
            state: &mut self.state,
        };
        let outcome = source.generate(&request).await;
        apply_outcome(guard.state, policy, outcome.map_err(ExplainError::from));
    }

    /// Start a request as a background task. Returns `true` if one was
    /// started. Collect the result with `poll_settled` or `wait_settled`.
    pub fn spawn_explanation(&mut self) -> bool {
        let Some(request) = self.begin() else {
            return false;
        };
        let source = Arc::clone(&self.source);
        self.in_flight = Some(tokio::spawn(async move { source.generate(&request).await }));
        true
    }

    /// Settle the background request if it has finished. Never blocks.
    /// Returns `true` if a settlement was applied.
    pub fn poll_settled(&mut self) -> bool {
        let Some(handle) = self.in_flight.as_mut() else {
            return false;
        };
        if !handle.is_finished() {
            return false;
        }
        match handle.now_or_never() {
            Some(joined) => {
                self.in_flight = None;
                self.settle(joined);
                true
            }
            None => false,
        }
    }

    /// Wait for the background request, if any, and settle it.
    pub async fn wait_settled(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            let joined = handle.await;
            self.settle(joined);
        }
    }

    fn settle(&mut self, joined: Result<Outcome, tokio::task::JoinError>) {
        let outcome = match joined {
            Ok(outcome) => outcome.map_err(ExplainError::from),
            Err(e) => Err(ExplainError::Task(e)),
        };
        let guard = Settling {
            state: &mut self.state,
        };
        apply_outcome(guard.state, self.policy, outcome);
    }

    /// Abort the in-flight request. Error and explanation are untouched.
    /// Returns `true` if there was something to cancel.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.in_flight.take() else {
            return false;
        };
        handle.abort();
        self.state.is_loading = false;
        info!("explanation request cancelled");
        true
    }
}

impl Drop for ExplainerView {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
