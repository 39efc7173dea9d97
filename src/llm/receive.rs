//! Defensive parsing of the classifier's structured output.

use serde::Deserialize;
use tracing::{debug, warn};

use super::LlmError;
use crate::intent::{Intent, IntentKind, ParamValue, Parameters};

#[derive(Deserialize, Debug)]
struct LlmParsedIntent {
    #[serde(alias = "intentType", alias = "intent_type")]
    intent: Option<String>,
    #[serde(default)]
    parameters: Option<serde_json::Value>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Strips Markdown fences and trims to the outermost `{...}` span.
pub fn extract_json_from_response(response: &str) -> Option<String> {
    let unfenced = strip_code_fences(response.trim());
    outermost_object(unfenced).map(str::to_string)
}

fn strip_code_fences(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };

    let after_open = &text[open + 3..];
    // Skip the info string (`json`, `JSON`, ...) up to the first newline.
    let body_start = after_open
        .find('\n')
        .filter(|&nl| after_open[..nl].trim().chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|nl| nl + 1)
        .unwrap_or_else(|| {
            after_open
                .char_indices()
                .find(|(_, c)| !c.is_ascii_alphanumeric())
                .map(|(i, _)| i)
                .unwrap_or(after_open.len())
        });
    let body = &after_open[body_start..];

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses a classification completion into an intent.
///
/// A second pass over the untouched text (first `{` to last `}`) runs when
/// the fence-stripped candidate does not decode. The result is not yet
/// validated.
pub fn parse_intent(response: &str) -> Result<Intent, LlmError> {
    let mut last_error = String::from("No JSON object found in response");

    let candidates = [
        extract_json_from_response(response),
        outermost_object(response).map(str::to_string),
    ];

    for candidate in candidates.iter().flatten() {
        match serde_json::from_str::<LlmParsedIntent>(candidate) {
            Ok(parsed) => return Ok(into_intent(parsed)),
            Err(e) => {
                debug!(error = %e, "Intent JSON candidate rejected");
                last_error = e.to_string();
            }
        }
    }

    warn!(error = %last_error, "Failed to parse intent JSON");
    Err(LlmError::Decode(last_error))
}

fn into_intent(parsed: LlmParsedIntent) -> Intent {
    let kind = parsed
        .intent
        .as_deref()
        .map(IntentKind::parse)
        .unwrap_or(IntentKind::Unknown);

    if let Some(raw) = parsed.intent.as_deref() {
        if kind == IntentKind::Unknown && raw.trim() != IntentKind::Unknown.as_str() {
            warn!(intent = raw, "Unrecognised intent kind coerced to Unknown");
        }
    }

    let parameters = match parsed.parameters {
        Some(serde_json::Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| ParamValue::from_json(v).map(|v| (k.clone(), v)))
            .collect(),
        _ => Parameters::new(),
    };

    Intent {
        kind,
        parameters,
        confidence: parsed.confidence.unwrap_or(0.0),
    }
}
