//! In-memory `ExplanationSource` for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::client::LlmError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::ExplanationSource;

pub type Outcome = Result<GenerateContentResponse, LlmError>;

/// Records every request and replays scripted outcomes in order. Once the
/// script runs out it answers with an empty response. With a gate, each
/// call waits for one `notify_one()` before answering.
#[derive(Default)]
pub struct ScriptedSource {
    requests: Mutex<Vec<GenerateContentRequest>>,
    outcomes: Mutex<VecDeque<Outcome>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn replying(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Default::default()
        })
    }

    pub fn gated(outcomes: Vec<Outcome>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            gate: Some(gate),
            ..Default::default()
        })
    }

    /// Prompt text of every request received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt_text().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl ExplanationSource for ScriptedSource {
    async fn generate(&self, request: &GenerateContentRequest) -> Outcome {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerateContentResponse::default()))
    }
}

/// A success response whose first candidate carries `text`.
pub fn text_response(text: &str) -> Outcome {
    let json = serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    });
    Ok(serde_json::from_value(json).unwrap())
}

pub fn server_error() -> Outcome {
    Err(LlmError::ApiError {
        status: 500,
        message: "internal".into(),
    })
}
