//! Intent model, rule detectors, cache and recognizer.

pub mod cache;
pub mod recognizer;
pub mod rules;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use cache::IntentCache;
pub use recognizer::IntentRecognizer;
pub use rules::RuleDetector;

/// Below this confidence an intent is reported as `Unknown`.
pub const MIN_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntentKind {
    GetMenu,
    GetTableAvailability,
    GetTotalBookings,
    GetPopularDishes,
    GetTableRevenue,
    GetDailyRevenue,
    GetPeakHours,
    GetTableRevenueRanking,
    Unknown,
}

impl IntentKind {
    pub const ALL: [IntentKind; 9] = [
        IntentKind::GetMenu,
        IntentKind::GetTableAvailability,
        IntentKind::GetTotalBookings,
        IntentKind::GetPopularDishes,
        IntentKind::GetTableRevenue,
        IntentKind::GetDailyRevenue,
        IntentKind::GetPeakHours,
        IntentKind::GetTableRevenueRanking,
        IntentKind::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::GetMenu => "GetMenu",
            IntentKind::GetTableAvailability => "GetTableAvailability",
            IntentKind::GetTotalBookings => "GetTotalBookings",
            IntentKind::GetPopularDishes => "GetPopularDishes",
            IntentKind::GetTableRevenue => "GetTableRevenue",
            IntentKind::GetDailyRevenue => "GetDailyRevenue",
            IntentKind::GetPeakHours => "GetPeakHours",
            IntentKind::GetTableRevenueRanking => "GetTableRevenueRanking",
            IntentKind::Unknown => "Unknown",
        }
    }

    /// Exact identifier match; anything outside the set is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == raw)
            .unwrap_or(IntentKind::Unknown)
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IntentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(IntentKind::parse(&raw))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Scalars map to themselves, `null` is dropped, arrays and objects
    /// are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(ParamValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ParamValue::Int(i)),
                None => n.as_f64().map(ParamValue::Float),
            },
            Value::String(s) => Some(ParamValue::Str(s.clone())),
            other => Some(ParamValue::Str(other.to_string())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Str(s) => match s.trim().to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

pub type Parameters = BTreeMap<String, ParamValue>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Intent {
    pub kind: IntentKind,
    #[serde(default)]
    pub parameters: Parameters,
    pub confidence: f64,
}

impl Intent {
    pub fn new(kind: IntentKind, confidence: f64) -> Self {
        Self {
            kind,
            parameters: Parameters::new(),
            confidence,
        }
    }

    /// The result of any internal recognition failure.
    pub fn unknown() -> Self {
        Self::new(IntentKind::Unknown, 0.0)
    }

    pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }

    pub fn is_greeting(&self) -> bool {
        self.kind == IntentKind::Unknown
            && self
                .param("greeting")
                .and_then(ParamValue::as_bool)
                .unwrap_or(false)
    }

    /// Clamps confidence into `[0, 1]` and coerces low-confidence intents to `Unknown`.
    pub fn validated(mut self) -> Self {
        if !self.confidence.is_finite() {
            warn!(kind = %self.kind, "Non-finite confidence treated as 0");
            self.confidence = 0.0;
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);

        if self.confidence < MIN_CONFIDENCE && self.kind != IntentKind::Unknown {
            warn!(
                kind = %self.kind,
                confidence = self.confidence,
                "Low-confidence intent coerced to Unknown"
            );
            self.kind = IntentKind::Unknown;
        }

        self
    }
}

#[cfg(test)]
mod tests;
