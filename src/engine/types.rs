//! Shared structs.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Intent;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Sending,
    Processing,
    Sent,
    Failed,
}

impl TurnStatus {
    /// `Sending` and `Processing` settle into `Sent` or `Failed`; settled states are terminal.
    pub fn can_transition_to(self, next: TurnStatus) -> bool {
        matches!(
            (self, next),
            (TurnStatus::Sending, TurnStatus::Sent)
                | (TurnStatus::Sending, TurnStatus::Failed)
                | (TurnStatus::Processing, TurnStatus::Sent)
                | (TurnStatus::Processing, TurnStatus::Failed)
        )
    }

    pub fn is_settled(self) -> bool {
        matches!(self, TurnStatus::Sent | TurnStatus::Failed)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: NaiveDateTime,
    pub status: TurnStatus,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>, status: TurnStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Local::now().naive_local(),
            status,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, TurnStatus::Sent)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, TurnStatus::Sent)
    }
}

/// One inbound message. Immutable once built.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    user_text: String,
    request_time: NaiveDateTime,
    history: Vec<ConversationTurn>,
}

impl ChatRequest {
    pub fn new(user_text: impl Into<String>, history: Vec<ConversationTurn>) -> Self {
        Self {
            user_text: user_text.into(),
            request_time: Local::now().naive_local(),
            history,
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn request_time(&self) -> NaiveDateTime {
        self.request_time
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub text: String,
    pub success: bool,
    pub error: Option<String>,
    pub detected_intent: Option<Intent>,
}

impl ChatResponse {
    pub fn success(text: impl Into<String>, intent: Option<Intent>) -> Self {
        Self {
            text: text.into(),
            success: true,
            error: None,
            detected_intent: intent,
        }
    }

    /// `text` is shown to the user; `error` stays diagnostic.
    pub fn failure(text: impl Into<String>, error: impl Into<String>, intent: Option<Intent>) -> Self {
        Self {
            text: text.into(),
            success: false,
            error: Some(error.into()),
            detected_intent: intent,
        }
    }
}
