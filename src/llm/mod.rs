//! # LLM boundary
//!
//! Everything that talks to the hosted text-generation service lives here:
//! - `send`: the HTTP client and provider error mapping
//! - `receive`: defensive parsing of structured classification output
//! - `retry`: an optional backoff policy wrapped around any client
//!
//! ```text
//! prompt → LlmClient::classify / generate → raw text → receive::parse_intent
//! ```

pub mod receive;
pub mod retry;
pub mod send;
#[cfg(test)]
pub(crate) mod stub;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use receive::{extract_json_from_response, parse_intent};
pub use retry::{RetryPolicy, Retrying};
pub use send::GeminiClient;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("LLM request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),
    #[error("LLM transport error: {0}")]
    Transport(String),
    #[error("LLM returned an empty response")]
    EmptyResponse,
    #[error("Failed to decode LLM response: {0}")]
    Decode(String),
    #[error("LLM client misconfigured: {0}")]
    Config(String),
}

impl LlmError {
    /// Timeouts, transport faults, rate limits and server errors may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Timeout(_) | LlmError::Transport(_) => true,
            LlmError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Sampling parameters sent with every request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 8192,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// One call per invocation, returning the raw completion text.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Completion expected to hold an intent JSON object.
    async fn classify(&self, prompt: &str) -> Result<String, LlmError>;

    /// Free-form natural-language completion.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait::async_trait]
impl<T: LlmClient + ?Sized> LlmClient for std::sync::Arc<T> {
    async fn classify(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).classify(prompt).await
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_classified() {
        assert!(LlmError::Timeout(30).is_transient());
        assert!(LlmError::Transport("reset".into()).is_transient());
        assert!(LlmError::Status { status: 503, message: String::new() }.is_transient());
        assert!(LlmError::Status { status: 429, message: String::new() }.is_transient());
        assert!(!LlmError::Status { status: 400, message: String::new() }.is_transient());
        assert!(!LlmError::EmptyResponse.is_transient());
    }

    #[test]
    fn generation_config_serializes_camel_case() {
        let json = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(json["maxOutputTokens"], 8192);
        assert_eq!(json["topK"], 40);
    }
}
