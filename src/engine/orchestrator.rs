//! High-level coordinator: input → intent → handler → LLM rendering.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::output::{topic_list, PromptBuilder, APOLOGY, DEGRADED_PREFACE, EMPTY_INPUT_MESSAGE, OUT_OF_SCOPE_FALLBACK};
use super::traits::IntentHandler;
use super::types::{ChatRequest, ChatResponse};
use crate::config::ConversationConfig;
use crate::handlers::{HandlerError, HandlerRegistry};
use crate::intent::{Intent, IntentKind, IntentRecognizer};
use crate::llm::{LlmClient, LlmError};
use crate::preprocessing::{CleanerError, Context, PreprocessorError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    Input(#[from] PreprocessorError),
    #[error("Handler for {kind} failed: {source}")]
    Handler {
        kind: IntentKind,
        #[source]
        source: HandlerError,
    },
    #[error("Response generation failed: {0}")]
    Llm(#[from] LlmError),
}

impl PipelineError {
    /// Fixed user-facing text; the error itself is only diagnostic.
    fn user_message(&self) -> &'static str {
        match self {
            PipelineError::Input(PreprocessorError::Cleaner(CleanerError::EmptyInput)) => EMPTY_INPUT_MESSAGE,
            PipelineError::Input(_) | PipelineError::Handler { .. } | PipelineError::Llm(_) => APOLOGY,
        }
    }
}

pub struct Orchestrator {
    recognizer: Arc<IntentRecognizer>,
    registry: HandlerRegistry,
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
    config: ConversationConfig,
}

impl Orchestrator {
    pub fn new(
        recognizer: Arc<IntentRecognizer>,
        registry: HandlerRegistry,
        llm: Arc<dyn LlmClient>,
        config: ConversationConfig,
    ) -> Self {
        info!(handlers = registry.len(), "Orchestrator ready");
        Self {
            recognizer,
            registry,
            llm,
            prompts: PromptBuilder::new(),
            config,
        }
    }

    pub fn recognizer(&self) -> &Arc<IntentRecognizer> {
        &self.recognizer
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Drive one request. Never fails: every error becomes `success = false`.
    #[instrument(skip_all, fields(history = request.history().len()))]
    pub async fn process(&self, request: &ChatRequest) -> ChatResponse {
        let mut detected = None;
        match self.run(request, &mut detected).await {
            Ok(text) => ChatResponse::success(text, detected),
            Err(e) => {
                error!(error = %e, "Request failed");
                ChatResponse::failure(e.user_message(), e.to_string(), detected)
            }
        }
    }

    async fn run(&self, request: &ChatRequest, detected: &mut Option<Intent>) -> Result<String, PipelineError> {
        let context = Context::from_history(request.history(), self.config.history_window);
        let intent = self.recognizer.recognize(request.user_text(), &context).await?;
        *detected = Some(intent.clone());
        debug!(kind = %intent.kind, confidence = intent.confidence, "Intent detected");

        let question = request.user_text().trim();
        match self.registry.get(intent.kind) {
            Some(handler) => self.answer(handler.as_ref(), &intent, question, &context).await,
            None => self.out_of_scope(&intent, question, &context).await,
        }
    }

    async fn answer(
        &self,
        handler: &dyn IntentHandler,
        intent: &Intent,
        question: &str,
        context: &Context,
    ) -> Result<String, PipelineError> {
        let data = handler
            .fetch(&intent.parameters)
            .await
            .map_err(|source| PipelineError::Handler {
                kind: intent.kind,
                source,
            })?;
        let formatted = handler.format(&data);

        let prompt = self.prompts.render(question, &formatted, context);
        match self.llm.generate(&prompt).await {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(e) if self.config.degrade_on_llm_failure => {
                error!(error = %e, "Rendering failed, returning raw data");
                Ok(format!("{}\n\n{}", DEGRADED_PREFACE, formatted))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn out_of_scope(&self, intent: &Intent, question: &str, context: &Context) -> Result<String, PipelineError> {
        let topics = self.registry.topics();
        let prompt = self
            .prompts
            .out_of_scope(question, context, &topics, intent.is_greeting());

        match self.llm.generate(&prompt).await {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(e) if self.config.degrade_on_llm_failure => {
                error!(error = %e, "Out-of-scope reply failed, returning topic list");
                Ok(topic_list(OUT_OF_SCOPE_FALLBACK, &topics))
            }
            Err(e) => Err(e.into()),
        }
    }
}
