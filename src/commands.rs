use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::output::{topic_list, WELCOME};
use crate::engine::{ChatRequest, ChatResponse, Conversation, ConversationTurn, Orchestrator, Role, TurnStatus};
use crate::handlers::{HandlerRegistry, SystemClock};
use crate::intent::IntentRecognizer;
use crate::llm::{GeminiClient, LlmClient, RetryPolicy, Retrying};
use crate::store::RestaurantStore;

/// Everything a front end needs: the pipeline plus the running conversation.
pub struct AppState {
    orchestrator: Orchestrator,
    conversation: Mutex<Conversation>,
}

impl AppState {
    /// Wires the Gemini client, recognizer and default handlers over `store`.
    pub fn new(config: &AppConfig, store: Arc<dyn RestaurantStore>) -> anyhow::Result<Self> {
        let client = GeminiClient::new(&config.llm)?;
        info!(endpoint = %client.endpoint(), "LLM client ready");

        let llm: Arc<dyn LlmClient> = Arc::new(Retrying::new(client, RetryPolicy::from_config(&config.llm)));
        let recognizer = Arc::new(IntentRecognizer::new(Arc::clone(&llm), &config.recognizer));
        let registry = HandlerRegistry::with_defaults(store, Arc::new(SystemClock));

        Ok(Self::from_orchestrator(Orchestrator::new(
            recognizer,
            registry,
            llm,
            config.conversation.clone(),
        )))
    }

    pub fn from_orchestrator(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            conversation: Mutex::new(Conversation::new()),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Copy of the conversation so far.
    pub fn transcript(&self) -> Vec<ConversationTurn> {
        self.conversation().turns().to_vec()
    }

    fn conversation(&self) -> std::sync::MutexGuard<'_, Conversation> {
        self.conversation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/* ---------- pipeline ---------- */

/// The single pipeline operation: one question plus caller-held history.
pub async fn process_message(state: &AppState, user_text: &str, history: Vec<ConversationTurn>) -> ChatResponse {
    let request = ChatRequest::new(user_text, history);
    state.orchestrator.process(&request).await
}

/// Runs one exchange against the state's own conversation.
pub async fn send_message(state: &AppState, text: &str) -> ChatResponse {
    let (history, pending) = {
        let mut conversation = state.conversation();
        let history = conversation.turns().to_vec();
        conversation.push(Role::User, text, TurnStatus::Sent);
        let pending = conversation.push(Role::Assistant, "", TurnStatus::Processing);
        (history, pending)
    };

    let response = process_message(state, text, history).await;

    let status = if response.success {
        TurnStatus::Sent
    } else {
        TurnStatus::Failed
    };
    if let Err(e) = state
        .conversation()
        .settle(pending, status, Some(response.text.clone()))
    {
        warn!(error = %e, "Could not settle assistant turn");
    }
    response
}

/* ---------- maintenance ---------- */

pub fn clear_intent_cache(state: &AppState) {
    state.orchestrator.recognizer().clear_cache();
}

pub fn intent_cache_len(state: &AppState) -> usize {
    state.orchestrator.recognizer().cache_len()
}

pub fn welcome_message(state: &AppState) -> String {
    topic_list(WELCOME, &state.orchestrator.registry().topics())
}
