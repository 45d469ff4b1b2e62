//! Configuration for the key rotation codec.

use serde::Deserialize;

use crate::error::{KeyRotationError, Result};

/// Configuration for encryption and validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyRotationConfig {
    /// Tolerance used when a caller does not pass one explicitly.
    pub default_tolerance_minutes: i64,
    /// Largest tolerance a validation request may ask for. Unbounded when unset.
    pub max_tolerance_minutes: Option<i64>,
}

impl Default for KeyRotationConfig {
    fn default() -> Self {
        Self {
            default_tolerance_minutes: 0,
            max_tolerance_minutes: None,
        }
    }
}

impl KeyRotationConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance used when none is given.
    pub fn with_default_tolerance(mut self, minutes: i64) -> Self {
        self.default_tolerance_minutes = minutes;
        self
    }

    /// Set the tolerance ceiling.
    pub fn with_max_tolerance(mut self, minutes: i64) -> Self {
        self.max_tolerance_minutes = Some(minutes);
        self
    }

    /// Check that the configured values are usable together.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_tolerance_minutes.filter(|max| *max < 0) {
            return Err(KeyRotationError::InvalidInput(format!(
                "max_tolerance_minutes must not be negative, got {max}"
            )));
        }
        self.check_tolerance(self.default_tolerance_minutes)
    }

    /// Reject negative tolerances and those above the ceiling.
    pub fn check_tolerance(&self, minutes: i64) -> Result<()> {
        if minutes < 0 {
            return Err(KeyRotationError::InvalidInput(format!(
                "tolerance must not be negative, got {minutes}"
            )));
        }
        if let Some(max) = self.max_tolerance_minutes.filter(|max| minutes > *max) {
            return Err(KeyRotationError::InvalidInput(format!(
                "tolerance {minutes} exceeds maximum of {max} minutes"
            )));
        }
        Ok(())
    }
}
