//! Public façade for the engine layer.

pub mod core;
pub mod orchestrator;
pub mod output;
pub mod traits;
pub mod types;

pub use self::core::{Conversation, TurnError};
pub use orchestrator::{Orchestrator, PipelineError};
pub use types::{ChatRequest, ChatResponse, ConversationTurn, Role, TurnStatus};
