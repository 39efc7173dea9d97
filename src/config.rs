//! Layered configuration: defaults, TOML file, flat dotted overrides, environment.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::llm::GenerationConfig;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent";

const ENV_API_KEY: &str = "MAITRE_API_KEY";
const ENV_MODEL: &str = "MAITRE_MODEL";
const ENV_ENDPOINT: &str = "MAITRE_API_ENDPOINT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub timeout_secs: u64,
    /// Classification calls ask for `application/json` output.
    pub json_mode: bool,
    /// Total attempts per call; 1 means a single attempt.
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            temperature: 0.7,
            max_output_tokens: 8192,
            top_p: 0.95,
            top_k: 40,
            timeout_secs: 30,
            json_mode: true,
            retry_attempts: 1,
            retry_base_delay_ms: 500,
        }
    }
}

impl LlmConfig {
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let raw = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => DEFAULT_ENDPOINT.replace("{model}", &self.model),
        };
        Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
            key: "llm.endpoint".to_string(),
            value: format!("{} ({})", raw, e),
        })
    }

    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    pub rule_based: bool,
    /// 0 keeps every entry.
    pub cache_capacity: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            rule_based: true,
            cache_capacity: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConversationConfig {
    pub history_window: usize,
    pub degrade_on_llm_failure: bool,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_window: 3,
            degrade_on_llm_failure: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub recognizer: RecognizerConfig,
    pub conversation: ConversationConfig,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Defaults, then the optional TOML file, then `overrides`, then the
    /// process environment (a `.env` file is loaded first if present).
    pub fn load(
        path: Option<&Path>,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config = config.with_overrides(overrides)?;

        dotenv::dotenv().ok();
        config.apply_env(|key| std::env::var(key).ok());

        config.validate()?;
        Ok(config)
    }

    /// Applies a flat map of dotted keys (`llm.temperature`, ...). Values are
    /// coerced to the type of the field they replace.
    pub fn with_overrides(self, overrides: &HashMap<String, String>) -> Result<Self, ConfigError> {
        if overrides.is_empty() {
            return Ok(self);
        }

        let mut tree = toml::Value::try_from(&self)?;
        for (key, raw) in overrides {
            set_dotted(&mut tree, key, raw)?;
            debug!(key = key.as_str(), "Config override applied");
        }
        Ok(tree.try_into()?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.llm.api_key = key;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.llm.model = model;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.llm.endpoint = Some(endpoint);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;
        if llm.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "llm.api_key is required (set it in the config file or {})",
                ENV_API_KEY
            )));
        }
        llm.endpoint_url()?;
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature must be within [0, 2], got {}",
                llm.temperature
            )));
        }
        if !(0.0..=1.0).contains(&llm.top_p) {
            return Err(ConfigError::Invalid(format!(
                "llm.top_p must be within [0, 1], got {}",
                llm.top_p
            )));
        }
        if llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid("llm.timeout_secs must be positive".into()));
        }
        if llm.retry_attempts == 0 {
            return Err(ConfigError::Invalid("llm.retry_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

fn set_dotted(tree: &mut toml::Value, key: &str, raw: &str) -> Result<(), ConfigError> {
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    let table = tree
        .get_mut(section)
        .and_then(toml::Value::as_table_mut)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    };
    let value = match table.get(field) {
        Some(toml::Value::Boolean(_)) => {
            toml::Value::Boolean(raw.trim().parse().map_err(|_| invalid())?)
        }
        Some(toml::Value::Integer(_)) => {
            toml::Value::Integer(raw.trim().parse().map_err(|_| invalid())?)
        }
        Some(toml::Value::Float(_)) => {
            toml::Value::Float(raw.trim().parse().map_err(|_| invalid())?)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        // Optional fields are absent from the serialized tree while unset.
        None if section == "llm" && field == "endpoint" => toml::Value::String(raw.to_string()),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    };

    table.insert(field.to_string(), value);
    Ok(())
}
