//! Optional backoff around any `LlmClient`.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::{LlmClient, LlmError};
use crate::config::LlmConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Exponential: base, 2×base, 4×base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

/// Retries transient failures of the wrapped client; other errors return at once.
pub struct Retrying<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: LlmClient> Retrying<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<'a, F, Fut>(&'a self, op: &'static str, call: F) -> Result<String, LlmError>
    where
        F: Fn(&'a C) -> Fut,
        Fut: Future<Output = Result<String, LlmError>>,
    {
        let mut attempt = 1;
        loop {
            match call(&self.inner).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        op = op,
                        attempt = attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "LLM attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait::async_trait]
impl<C: LlmClient> LlmClient for Retrying<C> {
    async fn classify(&self, prompt: &str) -> Result<String, LlmError> {
        self.run("classify", |c| c.classify(prompt)).await
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.run("generate", |c| c.generate(prompt)).await
    }
}
