//! Date-keyed API key encryption and time-windowed validation.
//!
//! This crate provides functionality for:
//! - Deriving a per-day digest of an API key, keyed by the UTC calendar date
//! - Validating a presented digest against the current or a given day
//! - Bridging UTC midnight with a symmetric clock tolerance in minutes
//!
//! # Digest Format
//!
//! Digests are the lowercase hex SHA-256 of
//! `keyrotation/v1|{api_key}|{YYYYMMDD}`. The format is part of the wire
//! contract between the place a digest is produced and the place it is
//! validated; see [`hash`] for the constants.
//!
//! # Security Features
//!
//! - Constant-time comparison of digests
//! - Every candidate day is checked, so timing does not reveal which matched
//! - The hash preimage buffer is zeroized after use
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use key_rotation::KeyRotation;
//!
//! let codec = KeyRotation::new();
//! let issued = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap();
//! let digest = codec.encrypt_api_key_with_date("my-secret-api-key", issued).unwrap();
//!
//! // Two minutes later it is already the next UTC day.
//! let checked = Utc.with_ymd_and_hms(2024, 1, 16, 0, 1, 0).unwrap();
//! assert!(!codec.validate_api_key("my-secret-api-key", digest.as_str(), checked).unwrap());
//! assert!(codec
//!     .validate_api_key_with_tolerance("my-secret-api-key", digest.as_str(), checked, 5)
//!     .unwrap());
//! ```

mod clock;
mod codec;
mod config;
mod date;
mod error;
pub mod hash;
mod verify;

use chrono::{DateTime, Utc};

// Public re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::KeyRotation;
pub use config::KeyRotationConfig;
pub use date::{
    DATE_STAMP_FORMAT, DateStamp, MAX_STAMP_YEAR, MIN_STAMP_YEAR, date_stamp, parse_utc_date,
    stamps_within,
};
pub use error::{KeyRotationError, Result};
pub use hash::{EncryptedKey, FORMAT_VERSION, compute_digest};

/// Encrypt an API key for the current UTC day.
pub fn encrypt_api_key(api_key: &str) -> Result<EncryptedKey> {
    KeyRotation::new().encrypt_api_key(api_key)
}

/// Encrypt an API key for the UTC day containing `instant`.
pub fn encrypt_api_key_with_date(api_key: &str, instant: DateTime<Utc>) -> Result<EncryptedKey> {
    KeyRotation::new().encrypt_api_key_with_date(api_key, instant)
}

/// Validate a digest against the exact UTC day of `instant`.
pub fn validate_api_key(api_key: &str, encrypted_key: &str, instant: DateTime<Utc>) -> Result<bool> {
    KeyRotation::new().validate_api_key(api_key, encrypted_key, instant)
}

/// Validate a digest against every UTC day within `tolerance_minutes` of `instant`.
pub fn validate_api_key_with_tolerance(
    api_key: &str,
    encrypted_key: &str,
    instant: DateTime<Utc>,
    tolerance_minutes: i64,
) -> Result<bool> {
    KeyRotation::new().validate_api_key_with_tolerance(
        api_key,
        encrypted_key,
        instant,
        tolerance_minutes,
    )
}

/// Validate a digest against the current UTC day.
pub fn validate_api_key_today(api_key: &str, encrypted_key: &str) -> Result<bool> {
    KeyRotation::new().validate_api_key_today(api_key, encrypted_key)
}

/// Validate a digest against the current UTC day with a tolerance window.
pub fn validate_api_key_today_with_tolerance(
    api_key: &str,
    encrypted_key: &str,
    tolerance_minutes: i64,
) -> Result<bool> {
    KeyRotation::new().validate_api_key_today_with_tolerance(
        api_key,
        encrypted_key,
        tolerance_minutes,
    )
}

/// The `YYYYMMDD` string used as hash input for `instant`.
///
/// Fails with `InvalidDate` for years outside 0000..=9999.
pub fn date_string(instant: DateTime<Utc>) -> Result<String> {
    date_stamp(instant)
}
