//! Builds the three prompts of a turn: classification, rendering, out-of-scope.

use super::formatter::{format_history, Speakers};
use super::injector::inject;
use super::schema::{Block, PromptPayload};
use super::templates::{
    assistant_system, classification_closing, classification_output_format,
    classification_system, greeting_requirements, out_of_scope_requirements, render_closing,
    render_requirements, INTENT_CATALOGUE,
};
use crate::preprocessing::Context;

const CLASSIFY_HISTORY: usize = 3;
const RENDER_HISTORY: usize = 3;
const FALLBACK_HISTORY: usize = 2;

const CLASSIFY_SPEAKERS: Speakers = Speakers {
    user: "User",
    assistant: "Assistant",
};
const RENDER_SPEAKERS: Speakers = Speakers {
    user: "Khách hàng",
    assistant: "Bạn",
};
const FALLBACK_SPEAKERS: Speakers = Speakers {
    user: "Khách",
    assistant: "Bạn",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    fn push_history(payload: &mut PromptPayload, title: &str, context: &Context, n: usize, speakers: Speakers) {
        let turns = context.last(n);
        if !turns.is_empty() {
            payload.push(title, Block::Bullets(format_history(turns, speakers)));
        }
    }

    pub fn classification(&self, question: &str, context: &Context) -> String {
        let mut payload = PromptPayload::new(classification_system());

        let catalogue = INTENT_CATALOGUE
            .iter()
            .map(|(name, meaning, params, example)| {
                format!(
                    "**{}** - {}\n   - Parameters: {}\n   - Example: \"{}\"",
                    name, meaning, params, example
                )
            })
            .collect();
        payload.push("Danh sách Intent hỗ trợ", Block::Numbered(catalogue));

        Self::push_history(
            &mut payload,
            "Lịch sử hội thoại",
            context,
            CLASSIFY_HISTORY,
            CLASSIFY_SPEAKERS,
        );
        payload.push("Câu hỏi cần phân tích", Block::Quote(question.to_string()));
        payload.push(
            "Output JSON format",
            Block::Text(classification_output_format().to_string()),
        );
        payload.closing = Some(classification_closing().to_string());

        inject(payload)
    }

    pub fn render(&self, question: &str, data: &str, context: &Context) -> String {
        let mut payload = PromptPayload::new(assistant_system());

        Self::push_history(
            &mut payload,
            "Lịch sử hội thoại",
            context,
            RENDER_HISTORY,
            RENDER_SPEAKERS,
        );
        payload.push("Câu hỏi của khách", Block::Quote(question.to_string()));
        payload.push("Dữ liệu từ hệ thống", Block::Fenced(data.to_string()));
        payload.push("Yêu cầu", Block::Numbered(render_requirements()));
        payload.closing = Some(render_closing().to_string());

        inject(payload)
    }

    /// Apology listing `topics`, or a friendly greeting when `greeting` is set.
    pub fn out_of_scope(
        &self,
        question: &str,
        context: &Context,
        topics: &[String],
        greeting: bool,
    ) -> String {
        let mut payload = PromptPayload::new(assistant_system());

        Self::push_history(&mut payload, "Lịch sử", context, FALLBACK_HISTORY, FALLBACK_SPEAKERS);
        payload.push("Câu hỏi của khách", Block::Quote(question.to_string()));

        if greeting {
            payload.push("Tình huống", Block::Text("Khách đang chào hỏi.".to_string()));
            payload.push("Yêu cầu", Block::Numbered(greeting_requirements(topics)));
        } else {
            payload.push(
                "Tình huống",
                Block::Text("Câu hỏi này nằm ngoài phạm vi của chatbot nhà hàng.".to_string()),
            );
            payload.push("Yêu cầu", Block::Numbered(out_of_scope_requirements(topics)));
        }

        inject(payload)
    }
}
