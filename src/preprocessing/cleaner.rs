use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanerError {
    #[error("Input is empty after cleaning")]
    EmptyInput,
    #[error("Input exceeds maximum length: {0}")]
    TooLong(usize),
}

pub struct Cleaner;

impl Cleaner {
    pub const MAX_LENGTH: usize = 10000;

    /// Rejects blank or oversized input and returns it trimmed.
    pub fn clean(input: &str) -> Result<String, CleanerError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CleanerError::EmptyInput);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(CleanerError::TooLong(length));
        }

        Ok(trimmed.to_string())
    }

    /// Case-folds and collapses every whitespace run to a single space.
    /// All-whitespace input normalizes to the empty string.
    pub fn normalize(input: &str) -> String {
        input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
