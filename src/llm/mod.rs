//! Generative-text backend — the one external collaborator.
//!
//! `ExplanationSource` is the seam the view talks to. `GeminiClient`
//! implements it over HTTP; tests substitute an in-memory double.

pub mod client;
#[cfg(test)]
pub mod mock;
pub mod types;

use async_trait::async_trait;

use client::{GeminiClient, LlmError};
use types::{GenerateContentRequest, GenerateContentResponse};

/// Anything that can answer a `generateContent` request.
#[async_trait]
pub trait ExplanationSource: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;
}

#[async_trait]
impl ExplanationSource for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        tracing::debug!(model = %self.model(), "sending generateContent request");
        self.generate_content(request).await
    }
}
