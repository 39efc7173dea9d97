//! Shared traits.

use crate::handlers::{HandlerData, HandlerError};
use crate::intent::{IntentKind, Parameters};

/// Two-stage contract: `fetch` retrieves data, `format` renders it as text.
#[async_trait::async_trait]
pub trait IntentHandler: Send + Sync {
    /// Immutable identity used as the registry key.
    fn kind(&self) -> IntentKind;

    /// Short topic name shown when listing what the assistant can do.
    fn topic(&self) -> &'static str;

    async fn fetch(&self, parameters: &Parameters) -> Result<HandlerData, HandlerError>;

    /// Empty data renders a fixed "no data" sentence, never an empty string.
    fn format(&self, data: &HandlerData) -> String;
}
