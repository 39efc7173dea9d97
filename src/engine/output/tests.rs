use super::*;
use crate::engine::types::ConversationTurn;
use crate::preprocessing::Context;

fn context(n: usize) -> Context {
    let history: Vec<_> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                ConversationTurn::user(format!("câu hỏi {}", i))
            } else {
                ConversationTurn::assistant(format!("trả lời {}", i))
            }
        })
        .collect();
    Context::from_history(&history, 10)
}

#[test]
fn inject_renders_every_block_kind() {
    let mut payload = PromptPayload::new("sys");
    payload.push("Q", Block::Quote("menu?".into()));
    payload.push("D", Block::Fenced("data".into()));
    payload.push("B", Block::Bullets(vec!["a".into()]));
    payload.push("N", Block::Numbered(vec!["x".into(), "y".into()]));
    payload.closing = Some("end".into());

    let prompt = inject(payload);
    assert_eq!(
        prompt,
        "sys\n\n## Q:\n\"menu?\"\n\n## D:\n```\ndata\n```\n\n## B:\n- a\n\n## N:\n1. x\n2. y\n\nend\n"
    );
}

#[test]
fn classification_lists_every_intent_and_last_three_turns() {
    let prompt = PromptBuilder::new().classification("bàn A01 bill?", &context(5));
    for kind in crate::intent::IntentKind::ALL {
        assert!(prompt.contains(&format!("**{}**", kind.as_str())), "{}", kind);
    }
    assert!(!prompt.contains("câu hỏi 0"));
    assert!(!prompt.contains("trả lời 1"));
    assert!(prompt.contains("**User**: câu hỏi 2"));
    assert!(prompt.contains("**User**: câu hỏi 4"));
    assert!(prompt.contains("\"bàn A01 bill?\""));
    assert!(prompt.contains("\"intent\""));
}

#[test]
fn render_carries_question_data_and_history() {
    let prompt = PromptBuilder::new().render("thực đơn?", "📋 THỰC ĐƠN (1 món)", &context(1));
    assert!(prompt.contains("\"thực đơn?\""));
    assert!(prompt.contains("```\n📋 THỰC ĐƠN (1 món)\n```"));
    assert!(prompt.contains("**Khách hàng**: câu hỏi 0"));
}

#[test]
fn out_of_scope_enumerates_topics_and_uses_two_turns() {
    let topics = vec!["Thực đơn món ăn".to_string(), "Tình trạng bàn".to_string()];
    let prompt = PromptBuilder::new().out_of_scope("thời tiết?", &context(4), &topics, false);
    assert!(prompt.contains("Thực đơn món ăn, Tình trạng bàn"));
    assert!(prompt.contains("ngoài phạm vi"));
    assert!(!prompt.contains("trả lời 1"));
    assert!(prompt.contains("**Khách**: câu hỏi 2"));

    let greeting = PromptBuilder::new().out_of_scope("xin chào", &Context::default(), &topics, true);
    assert!(greeting.contains("chào hỏi"));
    assert!(!greeting.contains("## Lịch sử"));
}

#[test]
fn topic_list_bullets_each_topic() {
    let text = topic_list(WELCOME, &["Thực đơn món ăn".to_string()]);
    assert!(text.starts_with(WELCOME));
    assert!(text.ends_with("\n  • Thực đơn món ăn"));
}
