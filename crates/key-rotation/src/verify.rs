//! Digest comparison with constant-time equality.

use subtle::ConstantTimeEq;

use crate::date::DateStamp;
use crate::hash::compute_digest;

/// Check a presented digest against every candidate day.
///
/// Every candidate is hashed and compared even after a match, so timing
/// does not reveal which day matched.
pub fn matches_any(api_key: &str, presented: &str, stamps: &[DateStamp]) -> bool {
    let presented = presented.trim().to_ascii_lowercase();
    stamps.iter().fold(false, |matched, stamp| {
        let expected = compute_digest(api_key, stamp);
        digests_equal(expected.as_str(), &presented) | matched
    })
}

/// Constant-time comparison of two digest strings.
///
/// Strings of different length compare unequal.
fn digests_equal(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
