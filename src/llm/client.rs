//! Raw HTTP client for the Gemini `generateContent` API.
//!
//! No view awareness — just makes API calls via reqwest.

use std::time::Duration;

use reqwest::Client;

use super::types::{resolve_model, GenerateContentRequest, GenerateContentResponse};

/// Errors from LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Raw HTTP client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with a custom base URL (for testing with mock servers).
    pub fn with_base_url(api_key: String, model: &str, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: resolve_model(model).to_string(),
        }
    }

    /// Build from resolved configuration, applying the optional timeout.
    pub fn from_config(config: &explainer_config::ExplainerConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let mut client =
            Self::with_base_url(config.api_key.clone(), &config.model, config.base_url.clone());
        client.http = builder.build()?;
        Ok(client)
    }

    /// Full model ID requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send a `generateContent` request.
    ///
    /// The API key rides in the query string, so reqwest errors are
    /// stripped of their URL before they can reach a log.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let resp: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                LlmError::InvalidResponse(format!("failed to parse response: {}", e.without_url()))
            })?;

        Ok(resp)
    }
}
