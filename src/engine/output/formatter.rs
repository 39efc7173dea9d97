//! Converts conversation turns into prompt lines.

use crate::engine::types::{ConversationTurn, Role};

/// Speaker labels for one prompt flavour.
#[derive(Debug, Clone, Copy)]
pub struct Speakers {
    pub user: &'static str,
    pub assistant: &'static str,
}

pub fn format_history(turns: &[ConversationTurn], speakers: Speakers) -> Vec<String> {
    turns
        .iter()
        .map(|t| {
            let who = match t.role {
                Role::User => speakers.user,
                Role::Assistant => speakers.assistant,
            };
            format!("**{}**: {}", who, t.text.trim())
        })
        .collect()
}
