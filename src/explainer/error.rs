//! Failure taxonomy for explanation requests.
//!
//! `Display` is the user-facing text. Transport and server detail stays
//! in the `source()` chain, which only goes to the log.

use crate::llm::client::LlmError;

/// Shown for empty or whitespace-only input.
pub const EMPTY_REFERENCE_MESSAGE: &str = "Please enter a verse reference";

/// Shown for every remote failure, whatever the cause.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to get explanation. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// Nothing to look up; no request was issued.
    #[error("Please enter a verse reference")]
    EmptyReference,

    /// Non-2xx, transport failure, or an undecodable body.
    #[error("Failed to get explanation. Please try again.")]
    Request(#[source] LlmError),

    /// Success response without candidate text (strict policy only).
    #[error("Failed to get explanation. Please try again.")]
    MissingText,

    /// The request task panicked or was torn down before settling.
    #[error("Failed to get explanation. Please try again.")]
    Task(#[source] tokio::task::JoinError),
}

impl From<LlmError> for ExplainError {
    fn from(err: LlmError) -> Self {
        Self::Request(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn messages_match_constants() {
        assert_eq!(ExplainError::EmptyReference.to_string(), EMPTY_REFERENCE_MESSAGE);
        assert_eq!(ExplainError::MissingText.to_string(), REQUEST_FAILED_MESSAGE);
        let err = ExplainError::from(LlmError::ApiError {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.to_string(), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn request_detail_kept_in_source() {
        let err = ExplainError::from(LlmError::ApiError {
            status: 401,
            message: "bad key".into(),
        });
        let source = err.source().expect("source");
        assert!(source.to_string().contains("401"));
        assert!(!err.to_string().contains("401"));
    }
}
