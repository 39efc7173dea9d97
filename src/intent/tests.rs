use super::*;
use crate::config::RecognizerConfig;
use crate::engine::types::ConversationTurn;
use crate::llm::stub::ScriptedLlm;
use crate::llm::LlmError;
use crate::preprocessing::{CleanerError, Context, PreprocessorError};
use std::sync::Arc;

fn recognizer(llm: &Arc<ScriptedLlm>, rule_based: bool) -> IntentRecognizer {
    let config = RecognizerConfig {
        rule_based,
        ..RecognizerConfig::default()
    };
    IntentRecognizer::new(llm.clone(), &config)
}

#[test]
fn kinds_round_trip_through_their_names() {
    for kind in IntentKind::ALL {
        assert_eq!(IntentKind::parse(kind.as_str()), kind);
    }
    assert_eq!(IntentKind::parse("GetWeather"), IntentKind::Unknown);
    assert_eq!(
        serde_json::to_string(&IntentKind::GetPeakHours).unwrap(),
        "\"GetPeakHours\""
    );
}

#[test]
fn params_from_json_keep_scalars_and_drop_nulls() {
    use serde_json::json;
    assert_eq!(ParamValue::from_json(&json!(5)), Some(ParamValue::Int(5)));
    assert_eq!(ParamValue::from_json(&json!(1.5)), Some(ParamValue::Float(1.5)));
    assert_eq!(ParamValue::from_json(&json!("A01")), Some(ParamValue::from("A01")));
    assert_eq!(ParamValue::from_json(&json!(true)), Some(ParamValue::Bool(true)));
    assert_eq!(ParamValue::from_json(&json!(null)), None);
    assert_eq!(ParamValue::from_json(&json!([1, 2])), Some(ParamValue::from("[1,2]")));
}

#[test]
fn validation_clamps_and_coerces() {
    let high = Intent::new(IntentKind::GetMenu, 1.7).validated();
    assert_eq!((high.kind, high.confidence), (IntentKind::GetMenu, 1.0));

    let low = Intent::new(IntentKind::GetMenu, 0.29).validated();
    assert_eq!(low.kind, IntentKind::Unknown);

    let edge = Intent::new(IntentKind::GetMenu, 0.3).validated();
    assert_eq!(edge.kind, IntentKind::GetMenu);

    let nan = Intent::new(IntentKind::GetPeakHours, f64::NAN).validated();
    assert_eq!((nan.kind, nan.confidence), (IntentKind::Unknown, 0.0));

    let negative = Intent::new(IntentKind::Unknown, -2.0).validated();
    assert_eq!(negative.confidence, 0.0);
}

#[tokio::test]
async fn rules_answer_without_calling_the_llm() {
    let llm = Arc::new(ScriptedLlm::new());
    let recognizer = recognizer(&llm, true);

    let intent = recognizer
        .recognize("Bàn A01 bill bao nhiêu", &Context::default())
        .await
        .unwrap();
    assert_eq!(intent.kind, IntentKind::GetTableRevenue);
    assert_eq!(intent.param("tableName"), Some(&ParamValue::from("A01")));
    assert_eq!(llm.classify_calls(), 0);
}

#[tokio::test]
async fn cache_hit_never_reaches_the_llm() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .classify_reply(Ok(r#"{"intent": "GetMenu", "parameters": {}, "confidence": 0.9}"#)),
    );
    let recognizer = recognizer(&llm, false);

    let first = recognizer.recognize("Cho xem  món", &Context::default()).await.unwrap();
    let second = recognizer.recognize("  cho XEM món ", &Context::default()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.kind, IntentKind::GetMenu);
    assert_eq!(llm.classify_calls(), 1);
    assert_eq!(recognizer.cache_len(), 1);

    recognizer.clear_cache();
    assert_eq!(recognizer.cache_len(), 0);
}

#[tokio::test]
async fn fenced_llm_output_is_parsed_and_validated() {
    let reply = "Đây là kết quả:\n```json\n{\"intentType\": \"GetPopularDishes\", \"parameters\": {\"topCount\": 3, \"note\": null}, \"confidence\": 0.2}\n```";
    let llm = Arc::new(ScriptedLlm::new().classify_reply(Ok(reply)));
    let intent = recognizer(&llm, false)
        .recognize("món nào ngon", &Context::default())
        .await
        .unwrap();

    // 0.2 is below the floor, so the kind is coerced but parameters survive.
    assert_eq!(intent.kind, IntentKind::Unknown);
    assert_eq!(intent.confidence, 0.2);
    assert_eq!(intent.param("topCount"), Some(&ParamValue::Int(3)));
    assert!(intent.param("note").is_none());
}

#[tokio::test]
async fn llm_failure_degrades_to_unknown_and_is_retried_next_time() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .classify_reply(Err(LlmError::Timeout(30)))
            .classify_reply(Ok("not json at all")),
    );
    let recognizer = recognizer(&llm, false);

    let intent = recognizer.recognize("thời tiết", &Context::default()).await.unwrap();
    assert_eq!(intent, Intent::unknown());
    assert_eq!(recognizer.cache_len(), 0);

    let intent = recognizer.recognize("thời tiết", &Context::default()).await.unwrap();
    assert_eq!(intent, Intent::unknown());
    assert_eq!(llm.classify_calls(), 2);
}

#[tokio::test]
async fn disabled_rules_defer_to_the_llm() {
    let llm = Arc::new(ScriptedLlm::new().classify_reply(Ok(
        r#"{"intent": "GetDailyRevenue", "parameters": {"date": "today"}, "confidence": 0.95}"#,
    )));
    let recognizer = recognizer(&llm, false);

    let intent = recognizer
        .recognize("doanh thu hôm nay", &Context::default())
        .await
        .unwrap();
    assert_eq!(intent.kind, IntentKind::GetDailyRevenue);
    assert_eq!(llm.classify_calls(), 1);
}

#[tokio::test]
async fn classification_prompt_carries_history_and_question() {
    let llm = Arc::new(ScriptedLlm::new().classify_reply(Ok(r#"{"intent": "Unknown", "confidence": 0.1}"#)));
    let history = vec![
        ConversationTurn::user("xin chào"),
        ConversationTurn::assistant("Chào bạn!"),
    ];
    recognizer(&llm, false)
        .recognize("Còn gì nữa?", &Context::from_history(&history, 3))
        .await
        .unwrap();

    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("**User**: xin chào"));
    assert!(prompt.contains("**Assistant**: Chào bạn!"));
    assert!(prompt.contains("Còn gì nữa?"));
    assert!(prompt.contains("GetTableRevenueRanking"));
}

#[tokio::test]
async fn greetings_are_unknown_with_a_flag() {
    let llm = Arc::new(ScriptedLlm::new());
    let intent = recognizer(&llm, true)
        .recognize("Xin chào", &Context::default())
        .await
        .unwrap();
    assert!(intent.is_greeting());
    assert_eq!(llm.classify_calls(), 0);
}

#[tokio::test]
async fn blank_input_is_an_error() {
    let llm = Arc::new(ScriptedLlm::new());
    let err = recognizer(&llm, true)
        .recognize("   ", &Context::default())
        .await
        .unwrap_err();
    assert_eq!(err, PreprocessorError::Cleaner(CleanerError::EmptyInput));
}
