//! SHA-256 digest derivation for a key and a UTC day.
//!
//! Wire format, version 1: lowercase hex of
//! `SHA-256(SALT || "|" || api_key || "|" || YYYYMMDD)`, 64 characters.
//! Changing any constant here breaks every digest already handed out.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::date::DateStamp;

/// Current version of the digest format.
pub const FORMAT_VERSION: u8 = 1;

/// Application-wide salt prepended to every preimage.
pub const SALT: &str = "keyrotation/v1";

/// Separator between preimage fields.
pub const SEPARATOR: &str = "|";

/// Length of a digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// A date-keyed digest of an API key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncryptedKey(String);

impl EncryptedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncryptedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncryptedKey> for String {
    fn from(key: EncryptedKey) -> Self {
        key.0
    }
}

/// Compute the digest of `api_key` for the given day.
///
/// Pure: the same key and day always give the same digest. Emptiness is
/// checked by the codec, not here.
pub fn compute_digest(api_key: &str, stamp: &DateStamp) -> EncryptedKey {
    let day = stamp.as_str();
    let mut preimage = Zeroizing::new(Vec::with_capacity(
        SALT.len() + api_key.len() + day.len() + 2 * SEPARATOR.len(),
    ));
    preimage.extend_from_slice(SALT.as_bytes());
    preimage.extend_from_slice(SEPARATOR.as_bytes());
    preimage.extend_from_slice(api_key.as_bytes());
    preimage.extend_from_slice(SEPARATOR.as_bytes());
    preimage.extend_from_slice(day.as_bytes());

    let result = Sha256::digest(preimage.as_slice());
    EncryptedKey(hex::encode(result))
}
