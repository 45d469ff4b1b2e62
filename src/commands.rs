//! Command-line surface over the key rotation codec.
//!
//! Every subcommand prints a single line: a digest, `true`/`false`, or a
//! `YYYYMMDD` date string.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use key_rotation::{Clock, KeyRotation, Result, parse_utc_date};
use zeroize::Zeroizing;

#[derive(Parser, Debug)]
#[command(name = "keyrotation", version, about = "Date-keyed API key encryption and validation")]
pub struct Cli {
    /// YAML config file with tolerance settings.
    #[arg(short, long, global = true)]
    pub conf: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt an API key for the current UTC day.
    Encrypt {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
    },

    /// Encrypt an API key for a given date (YYYY-MM-DD, YYYYMMDD or RFC 3339).
    EncryptDate {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
        date: String,
    },

    /// Validate a digest against the current UTC day.
    Validate {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
        #[arg(allow_hyphen_values = true)]
        encrypted_key: String,
    },

    /// Validate a digest against a given date.
    ValidateDate {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
        #[arg(allow_hyphen_values = true)]
        encrypted_key: String,
        date: String,
    },

    /// Validate against the current UTC day with a tolerance in minutes.
    ValidateTolerance {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
        #[arg(allow_hyphen_values = true)]
        encrypted_key: String,
        #[arg(allow_negative_numbers = true)]
        minutes: Option<i64>,
    },

    /// Validate against a given date with a tolerance in minutes.
    ValidateDateTolerance {
        #[arg(allow_hyphen_values = true)]
        api_key: String,
        #[arg(allow_hyphen_values = true)]
        encrypted_key: String,
        date: String,
        #[arg(allow_negative_numbers = true)]
        minutes: Option<i64>,
    },

    /// Print the YYYYMMDD string for a date, or for today.
    DateString { date: Option<String> },
}

/// Execute a command and return the line to print.
pub fn run<C: Clock>(command: Command, codec: &KeyRotation<C>) -> Result<String> {
    let default_tolerance = codec.config().default_tolerance_minutes;

    match command {
        Command::Encrypt { api_key } => {
            let api_key = Zeroizing::new(api_key);
            Ok(codec.encrypt_api_key(&api_key)?.into_string())
        }
        Command::EncryptDate { api_key, date } => {
            let api_key = Zeroizing::new(api_key);
            let instant = parse_utc_date(&date)?;
            Ok(codec.encrypt_api_key_with_date(&api_key, instant)?.into_string())
        }
        Command::Validate {
            api_key,
            encrypted_key,
        } => {
            let api_key = Zeroizing::new(api_key);
            codec
                .validate_api_key_today(&api_key, &encrypted_key)
                .map(|valid| valid.to_string())
        }
        Command::ValidateDate {
            api_key,
            encrypted_key,
            date,
        } => {
            let api_key = Zeroizing::new(api_key);
            let instant = parse_utc_date(&date)?;
            codec
                .validate_api_key(&api_key, &encrypted_key, instant)
                .map(|valid| valid.to_string())
        }
        Command::ValidateTolerance {
            api_key,
            encrypted_key,
            minutes,
        } => {
            let api_key = Zeroizing::new(api_key);
            codec
                .validate_api_key_today_with_tolerance(
                    &api_key,
                    &encrypted_key,
                    minutes.unwrap_or(default_tolerance),
                )
                .map(|valid| valid.to_string())
        }
        Command::ValidateDateTolerance {
            api_key,
            encrypted_key,
            date,
            minutes,
        } => {
            let api_key = Zeroizing::new(api_key);
            let instant = parse_utc_date(&date)?;
            codec
                .validate_api_key_with_tolerance(
                    &api_key,
                    &encrypted_key,
                    instant,
                    minutes.unwrap_or(default_tolerance),
                )
                .map(|valid| valid.to_string())
        }
        Command::DateString { date } => {
            let instant = match date {
                Some(date) => parse_utc_date(&date)?,
                None => codec.now(),
            };
            codec.date_string(instant)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use key_rotation::{FixedClock, KeyRotationConfig, KeyRotationError};

    const DIGEST_20240115: &str =
        "a327b34c262a3bc31bbb140e502ee2c94d20ade3f8fec9c45b61b62ab4c720c5";

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["keyrotation"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments").command
    }

    fn codec_at(instant: DateTime<Utc>) -> KeyRotation<FixedClock> {
        KeyRotation::new().with_clock(FixedClock(instant))
    }

    #[test]
    fn test_encrypt_date() {
        let codec = KeyRotation::new();
        let out = run(parse(&["encrypt-date", "testApiKey123", "2024-01-15"]), &codec).unwrap();
        assert_eq!(out, DIGEST_20240115);
    }

    #[test]
    fn test_encrypt_uses_clock() {
        let codec = codec_at(utc(2024, 1, 15, 8, 0, 0));
        let out = run(parse(&["encrypt", "testApiKey123"]), &codec).unwrap();
        assert_eq!(out, DIGEST_20240115);
    }

    #[test]
    fn test_validate_today() {
        let codec = codec_at(utc(2024, 1, 15, 8, 0, 0));
        let out = run(parse(&["validate", "testApiKey123", DIGEST_20240115]), &codec).unwrap();
        assert_eq!(out, "true");

        let out = run(parse(&["validate", "otherKey", DIGEST_20240115]), &codec).unwrap();
        assert_eq!(out, "false");
    }

    #[test]
    fn test_validate_date() {
        let codec = KeyRotation::new();
        let out = run(
            parse(&["validate-date", "testApiKey123", DIGEST_20240115, "20240115"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");

        let out = run(
            parse(&["validate-date", "testApiKey123", DIGEST_20240115, "2024-01-16"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "false");
    }

    #[test]
    fn test_validate_tolerance_bridges_midnight() {
        let codec = codec_at(utc(2024, 1, 16, 0, 1, 0));
        let out = run(
            parse(&["validate-tolerance", "testApiKey123", DIGEST_20240115, "5"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");

        let out = run(
            parse(&["validate-tolerance", "testApiKey123", DIGEST_20240115, "0"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "false");
    }

    #[test]
    fn test_validate_tolerance_falls_back_to_config() {
        let codec = KeyRotation::with_config(KeyRotationConfig::new().with_default_tolerance(5))
            .with_clock(FixedClock(utc(2024, 1, 16, 0, 1, 0)));
        let out = run(
            parse(&["validate-tolerance", "testApiKey123", DIGEST_20240115]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_validate_date_tolerance() {
        let codec = KeyRotation::new();
        let out = run(
            parse(&[
                "validate-date-tolerance",
                "testApiKey123",
                DIGEST_20240115,
                "2024-01-16T00:01:00Z",
                "5",
            ]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_negative_tolerance_is_invalid_input() {
        let codec = KeyRotation::new();
        let err = run(
            parse(&["validate-tolerance", "testApiKey123", DIGEST_20240115, "-5"]),
            &codec,
        )
        .unwrap_err();
        assert!(matches!(err, KeyRotationError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_date_is_invalid_date() {
        let codec = KeyRotation::new();
        let err = run(parse(&["encrypt-date", "testApiKey123", "15/01/2024"]), &codec).unwrap_err();
        assert!(matches!(err, KeyRotationError::InvalidDate(_)));
    }

    #[test]
    fn test_empty_key_is_invalid_input() {
        let codec = KeyRotation::new();
        let err = run(parse(&["encrypt", ""]), &codec).unwrap_err();
        assert!(matches!(err, KeyRotationError::InvalidInput(_)));
    }

    #[test]
    fn test_date_string() {
        let codec = codec_at(utc(2024, 1, 15, 12, 30, 45));
        assert_eq!(run(parse(&["date-string"]), &codec).unwrap(), "20240115");
        assert_eq!(
            run(parse(&["date-string", "2023-12-31T23:59:59Z"]), &codec).unwrap(),
            "20231231"
        );
    }

    #[test]
    fn test_hyphen_leading_key_is_a_value() {
        let codec = KeyRotation::new();
        let digest = run(parse(&["encrypt-date", "-dash-key", "2024-01-15"]), &codec).unwrap();
        assert_eq!(digest.len(), 64);

        let out = run(
            parse(&["validate-date", "-dash-key", &digest, "2024-01-15"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_date_string_rejects_five_digit_year() {
        let codec = codec_at(utc(10000, 6, 1, 0, 0, 0));
        let err = run(parse(&["date-string"]), &codec).unwrap_err();
        assert!(matches!(err, KeyRotationError::InvalidDate(_)));
    }

    #[test]
    fn test_large_tolerance_is_a_verdict() {
        let codec = codec_at(utc(2024, 1, 15, 12, 0, 0));
        let out = run(
            parse(&["validate-tolerance", "testApiKey123", DIGEST_20240115, "20000"]),
            &codec,
        )
        .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_global_conf_flag() {
        let cli = Cli::try_parse_from(["keyrotation", "encrypt", "k", "--conf", "conf.yaml"])
            .expect("valid arguments");
        assert_eq!(cli.conf, Some(PathBuf::from("conf.yaml")));
    }
}
