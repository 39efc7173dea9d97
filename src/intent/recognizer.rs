use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::cache::IntentCache;
use super::rules::RuleDetector;
use super::Intent;
use crate::config::RecognizerConfig;
use crate::engine::output::PromptBuilder;
use crate::llm::{parse_intent, LlmClient, LlmError};
use crate::preprocessing::{Context, PreprocessorError, Preprocessor};

/// Cache, then ordered rules, then the LLM classifier.
pub struct IntentRecognizer {
    llm: Arc<dyn LlmClient>,
    cache: IntentCache,
    rules: RuleDetector,
    prompts: PromptBuilder,
    rule_based: bool,
}

impl IntentRecognizer {
    pub fn new(llm: Arc<dyn LlmClient>, config: &RecognizerConfig) -> Self {
        Self {
            llm,
            cache: IntentCache::new(config.cache_capacity),
            rules: RuleDetector::new(),
            prompts: PromptBuilder::new(),
            rule_based: config.rule_based,
        }
    }

    /// Only empty or oversized input is an error. Classifier failures
    /// degrade to [`Intent::unknown`], which is returned but not cached.
    #[instrument(skip(self, user_text, context), fields(len = user_text.len()))]
    pub async fn recognize(&self, user_text: &str, context: &Context) -> Result<Intent, PreprocessorError> {
        let input = Preprocessor::process(user_text)?;

        if let Some(hit) = self.cache.get(&input.normalized) {
            return Ok(hit);
        }

        if self.rule_based {
            if let Some(intent) = self.rules.detect(&input.normalized) {
                let intent = intent.validated();
                self.cache.insert(input.normalized, intent.clone());
                return Ok(intent);
            }
        }

        match self.classify(&input.raw, context).await {
            Ok(intent) => {
                let intent = intent.validated();
                debug!(kind = %intent.kind, confidence = intent.confidence, "Classified by LLM");
                self.cache.insert(input.normalized, intent.clone());
                Ok(intent)
            }
            Err(e) => {
                warn!(error = %e, "Intent classification failed");
                Ok(Intent::unknown())
            }
        }
    }

    async fn classify(&self, question: &str, context: &Context) -> Result<Intent, LlmError> {
        let prompt = self.prompts.classification(question, context);
        let response = self.llm.classify(&prompt).await?;
        parse_intent(&response)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
