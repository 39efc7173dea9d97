use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{GenerationConfig, LlmClient, LlmError};
use crate::config::LlmConfig;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: RequestGenerationConfig<'a>,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig<'a> {
    #[serde(flatten)]
    sampling: &'a GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize, Debug)]
struct ProviderError {
    message: String,
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    generation: GenerationConfig,
    json_mode: bool,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is missing".to_string()));
        }
        let endpoint = config
            .endpoint_url()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            generation: config.generation(),
            json_mode: config.json_mode,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Endpoint as logged; never carries the key.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    async fn complete(&self, prompt: &str, want_json: bool) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: RequestGenerationConfig {
                sampling: &self.generation,
                response_mime_type: want_json.then_some("application/json"),
            },
        };

        debug!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.chars().count(),
            json = want_json,
            "Sending LLM request"
        );

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or(raw);
            warn!(status = status.as_u16(), message = %message, "LLM request rejected");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GenerateResponse =
            serde_json::from_str(&raw).map_err(|e| LlmError::Decode(e.to_string()))?;

        let text = decoded
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!(response_chars = text.chars().count(), "LLM response received");
        Ok(text)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> LlmError {
        // reqwest errors may embed the request URL, key included.
        let error = error.without_url();
        if error.is_timeout() {
            warn!(timeout_secs = self.timeout_secs, "LLM request timed out");
            LlmError::Timeout(self.timeout_secs)
        } else {
            warn!(error = %error, "LLM transport failure");
            LlmError::Transport(error.to_string())
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, prompt))]
    async fn classify(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt, self.json_mode).await
    }

    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt, false).await
    }
}
