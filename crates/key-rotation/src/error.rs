//! Error types for key rotation operations.

use thiserror::Error;

/// Errors that can occur while encrypting or validating API keys.
///
/// A digest that simply does not match is not an error; validation returns
/// `Ok(false)` for that case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyRotationError {
    /// Empty API key or digest, or a tolerance outside the accepted range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A date or timestamp string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The hash primitive could not produce a digest.
    #[error("Hash failure: {0}")]
    HashFailure(String),
}

impl KeyRotationError {
    /// True for errors caused by the caller's arguments.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            KeyRotationError::InvalidInput(_) | KeyRotationError::InvalidDate(_)
        )
    }
}

/// Result type alias for key rotation operations.
pub type Result<T> = std::result::Result<T, KeyRotationError>;
