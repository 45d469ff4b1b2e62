//! UTC day stamps and tolerance window resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::error::{KeyRotationError, Result};

/// `strftime` pattern of a [`DateStamp`].
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// Years that render as exactly four digits under [`DATE_STAMP_FORMAT`].
pub const MIN_STAMP_YEAR: i32 = 0;
pub const MAX_STAMP_YEAR: i32 = 9999;

/// A UTC calendar day rendered as `YYYYMMDD`, the rotation input of the hash.
///
/// Always eight ASCII digits; days outside years 0000..=9999 are rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateStamp {
    date: NaiveDate,
    text: String,
}

impl DateStamp {
    /// Truncate a UTC instant to its calendar day.
    pub fn from_instant(instant: DateTime<Utc>) -> Result<Self> {
        Self::from_date(instant.date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Result<Self> {
        if !(MIN_STAMP_YEAR..=MAX_STAMP_YEAR).contains(&date.year()) {
            return Err(KeyRotationError::InvalidDate(format!(
                "year {} cannot be written as YYYYMMDD",
                date.year()
            )));
        }
        Ok(Self {
            date,
            text: date.format(DATE_STAMP_FORMAT).to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Midnight UTC at the start of this day.
    pub fn start_of_day(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for DateStamp {
    type Err = KeyRotationError;

    /// Parse exactly eight ASCII digits forming a valid calendar day.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyRotationError::InvalidDate(format!(
                "expected YYYYMMDD, got '{s}'"
            )));
        }
        let date = NaiveDate::parse_from_str(s, DATE_STAMP_FORMAT)
            .map_err(|e| KeyRotationError::InvalidDate(format!("'{s}': {e}")))?;
        Self::from_date(date)
    }
}

/// Format a UTC instant as `YYYYMMDD`.
pub fn date_stamp(instant: DateTime<Utc>) -> Result<String> {
    DateStamp::from_instant(instant).map(|stamp| stamp.text)
}

/// Parse a date given on the command line or in a request.
///
/// Accepts an RFC 3339 timestamp, `YYYY-MM-DD` or `YYYYMMDD`. Date-only
/// forms resolve to midnight UTC.
pub fn parse_utc_date(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    text.parse::<DateStamp>()
        .map(|stamp| stamp.start_of_day())
        .map_err(|_| {
            KeyRotationError::InvalidDate(format!(
                "'{text}' is not RFC 3339, YYYY-MM-DD or YYYYMMDD"
            ))
        })
}

/// The distinct days of `instant`, `instant - tolerance` and
/// `instant + tolerance`, in ascending order.
///
/// At most three stamps regardless of the tolerance. A tolerance of zero
/// yields only the day of `instant`. Window edges that fall outside the
/// representable range of stamps are left out; the day of `instant` itself
/// must be representable.
pub fn stamps_within(instant: DateTime<Utc>, tolerance_minutes: i64) -> Result<Vec<DateStamp>> {
    if tolerance_minutes < 0 {
        return Err(KeyRotationError::InvalidInput(format!(
            "tolerance must not be negative, got {tolerance_minutes}"
        )));
    }

    let mut stamps = vec![DateStamp::from_instant(instant)?];

    if tolerance_minutes > 0 {
        let delta = TimeDelta::try_minutes(tolerance_minutes);
        let edges = [
            delta.and_then(|d| instant.checked_sub_signed(d)),
            delta.and_then(|d| instant.checked_add_signed(d)),
        ];
        for edge in edges.into_iter().flatten() {
            if let Ok(stamp) = DateStamp::from_instant(edge) {
                stamps.push(stamp);
            }
        }
        stamps.sort();
        stamps.dedup();
    }

    log::debug!(
        "tolerance {}m around {} covers {} day(s)",
        tolerance_minutes,
        instant,
        stamps.len()
    );

    Ok(stamps)
}
