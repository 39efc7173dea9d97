//! Conversation state: an append-only list of turns whose statuses only move forward.

use thiserror::Error;
use uuid::Uuid;

use super::types::{ConversationTurn, Role, TurnStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("No turn with id {0}")]
    NotFound(Uuid),
    #[error("Turn cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: TurnStatus, to: TurnStatus },
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn and returns its id.
    pub fn push(&mut self, role: Role, text: impl Into<String>, status: TurnStatus) -> Uuid {
        let turn = ConversationTurn::new(role, text, status);
        let id = turn.id;
        self.turns.push(turn);
        id
    }

    /// Moves a pending turn to `status`, optionally replacing its text.
    pub fn settle(&mut self, id: Uuid, status: TurnStatus, text: Option<String>) -> Result<(), TurnError> {
        let turn = self
            .turns
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TurnError::NotFound(id))?;

        if !turn.status.can_transition_to(status) {
            return Err(TurnError::InvalidTransition {
                from: turn.status,
                to: status,
            });
        }
        turn.status = status;
        if let Some(text) = text {
            turn.text = text;
        }
        Ok(())
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
