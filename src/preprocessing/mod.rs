pub mod cleaner;
pub mod context;

pub use cleaner::{Cleaner, CleanerError};
pub use context::Context;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessorError {
    #[error("Cleaning failed: {0}")]
    Cleaner(#[from] CleanerError),
}

/// Validated user text plus its cache key form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput {
    pub raw: String,
    pub normalized: String,
}

pub struct Preprocessor;

impl Preprocessor {
    pub fn process(input: &str) -> Result<PreparedInput, PreprocessorError> {
        let raw = Cleaner::clean(input)?;
        let normalized = Cleaner::normalize(&raw);

        Ok(PreparedInput { raw, normalized })
    }
}
