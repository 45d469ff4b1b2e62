//! The key rotation codec: date-keyed encryption and windowed validation.

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::config::KeyRotationConfig;
use crate::date::{DateStamp, date_stamp, stamps_within};
use crate::error::{KeyRotationError, Result};
use crate::hash::{EncryptedKey, compute_digest};
use crate::verify::matches_any;

/// Encrypts API keys for a UTC day and validates them later, optionally
/// with a clock tolerance that may reach into the neighbouring day.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct KeyRotation<C = SystemClock> {
    config: KeyRotationConfig,
    clock: C,
}

impl KeyRotation<SystemClock> {
    /// Codec with the default config and the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: KeyRotationConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> KeyRotation<C> {
    /// Replace the clock used for "now".
    pub fn with_clock<D: Clock>(self, clock: D) -> KeyRotation<D> {
        KeyRotation {
            config: self.config,
            clock,
        }
    }

    pub fn config(&self) -> &KeyRotationConfig {
        &self.config
    }

    /// Current instant according to this codec's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Encrypt `api_key` for the current UTC day.
    pub fn encrypt_api_key(&self, api_key: &str) -> Result<EncryptedKey> {
        self.encrypt_api_key_with_date(api_key, self.clock.now())
    }

    /// Encrypt `api_key` for the UTC day containing `instant`.
    pub fn encrypt_api_key_with_date(
        &self,
        api_key: &str,
        instant: DateTime<Utc>,
    ) -> Result<EncryptedKey> {
        require_non_empty(api_key, "api key")?;
        let stamp = DateStamp::from_instant(instant)?;
        Ok(compute_digest(api_key, &stamp))
    }

    /// Validate against the exact UTC day of `instant`.
    ///
    /// # Returns
    /// * `Ok(true)` if `encrypted_key` is the digest for that day
    /// * `Ok(false)` if it is not
    /// * `Err` if the key or digest is empty
    pub fn validate_api_key(
        &self,
        api_key: &str,
        encrypted_key: &str,
        instant: DateTime<Utc>,
    ) -> Result<bool> {
        self.validate_api_key_with_tolerance(api_key, encrypted_key, instant, 0)
    }

    /// Validate against the days of `instant`, `instant - tolerance` and
    /// `instant + tolerance`.
    ///
    /// A key encrypted at 23:59 is still accepted at 00:01 the next day with
    /// a tolerance of two minutes or more.
    pub fn validate_api_key_with_tolerance(
        &self,
        api_key: &str,
        encrypted_key: &str,
        instant: DateTime<Utc>,
        tolerance_minutes: i64,
    ) -> Result<bool> {
        require_non_empty(api_key, "api key")?;
        require_non_empty(encrypted_key, "encrypted key")?;
        self.config.check_tolerance(tolerance_minutes)?;

        let stamps = stamps_within(instant, tolerance_minutes)?;
        let valid = matches_any(api_key, encrypted_key, &stamps);

        log::debug!(
            "validation at {} with {}m tolerance over {} day(s): {}",
            instant,
            tolerance_minutes,
            stamps.len(),
            if valid { "match" } else { "no match" }
        );

        Ok(valid)
    }

    /// Validate against the current UTC day, no tolerance.
    pub fn validate_api_key_today(&self, api_key: &str, encrypted_key: &str) -> Result<bool> {
        self.validate_api_key(api_key, encrypted_key, self.clock.now())
    }

    /// Validate against the current UTC day with a tolerance window.
    pub fn validate_api_key_today_with_tolerance(
        &self,
        api_key: &str,
        encrypted_key: &str,
        tolerance_minutes: i64,
    ) -> Result<bool> {
        self.validate_api_key_with_tolerance(
            api_key,
            encrypted_key,
            self.clock.now(),
            tolerance_minutes,
        )
    }

    /// Validate against the current UTC day using the configured default
    /// tolerance.
    pub fn validate_api_key_today_with_default_tolerance(
        &self,
        api_key: &str,
        encrypted_key: &str,
    ) -> Result<bool> {
        self.validate_api_key_today_with_tolerance(
            api_key,
            encrypted_key,
            self.config.default_tolerance_minutes,
        )
    }

    /// The `YYYYMMDD` string used as hash input for `instant`.
    pub fn date_string(&self, instant: DateTime<Utc>) -> Result<String> {
        date_stamp(instant)
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(KeyRotationError::InvalidInput(format!("{what} is empty")));
    }
    Ok(())
}
