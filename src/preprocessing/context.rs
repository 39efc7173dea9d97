use crate::engine::types::{ConversationTurn, TurnStatus};

/// Rolling history window passed to prompts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub turns: Vec<ConversationTurn>,
}

impl Context {
    /// Keeps the last `window` settled (`Sent`) turns, oldest first.
    pub fn from_history(history: &[ConversationTurn], window: usize) -> Self {
        let settled: Vec<&ConversationTurn> = history
            .iter()
            .filter(|t| t.status == TurnStatus::Sent && !t.text.trim().is_empty())
            .collect();
        let skip = settled.len().saturating_sub(window);

        Self {
            turns: settled.into_iter().skip(skip).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `n` turns of this window.
    pub fn last(&self, n: usize) -> &[ConversationTurn] {
        let skip = self.turns.len().saturating_sub(n);
        &self.turns[skip..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Role;

    #[test]
    fn keeps_only_recent_settled_turns() {
        let history = vec![
            ConversationTurn::user("một"),
            ConversationTurn::assistant("hai"),
            ConversationTurn::new(Role::User, "đang gửi", TurnStatus::Sending),
            ConversationTurn::user("ba"),
            ConversationTurn::new(Role::Assistant, "lỗi", TurnStatus::Failed),
            ConversationTurn::assistant("bốn"),
        ];

        let ctx = Context::from_history(&history, 3);
        let texts: Vec<_> = ctx.turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hai", "ba", "bốn"]);
        assert_eq!(ctx.last(2).len(), 2);
        assert_eq!(ctx.last(10).len(), 3);
    }
}
