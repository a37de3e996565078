//! # Verification Code Validity
//!
//! One-time verification codes expire a fixed interval after issuance.
//! The rule is a pure comparison of two millisecond timestamps; marking a
//! code consumed is the caller's responsibility.

use errand_core::Timestamp;

/// Default time-to-live for a verification code: 3 minutes.
pub const DEFAULT_CODE_TTL_MS: i64 = 180_000;

/// Whether a code issued at `issued_at_ms` is still valid at
/// `checked_at_ms` (both milliseconds since the Unix epoch).
///
/// Valid iff `checked_at_ms − issued_at_ms ≤ ttl_ms`, inclusive boundary.
/// `ttl_ms` defaults to [`DEFAULT_CODE_TTL_MS`] when `None`.
pub fn is_code_valid(issued_at_ms: i64, checked_at_ms: i64, ttl_ms: Option<i64>) -> bool {
    checked_at_ms - issued_at_ms <= ttl_ms.unwrap_or(DEFAULT_CODE_TTL_MS)
}

/// [`is_code_valid`] over `Timestamp`s rather than raw epoch millis.
pub fn is_code_valid_at(issued_at: Timestamp, checked_at: Timestamp, ttl_ms: Option<i64>) -> bool {
    is_code_valid(issued_at.epoch_millis(), checked_at.epoch_millis(), ttl_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_within_ttl() {
        let t = 1_760_000_000_000;
        assert!(is_code_valid(t, t, None));
        assert!(is_code_valid(t, t + 1, None));
        assert!(is_code_valid(t, t + 179_999, None));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let t = 1_760_000_000_000;
        assert!(is_code_valid(t, t + 180_000, None));
        assert!(!is_code_valid(t, t + 180_001, None));
    }

    #[test]
    fn test_custom_ttl() {
        let t = 1_760_000_000_000;
        assert!(is_code_valid(t, t + 60_000, Some(60_000)));
        assert!(!is_code_valid(t, t + 60_001, Some(60_000)));
    }

    #[test]
    fn test_check_before_issue_is_valid() {
        // A check timestamp earlier than issuance means caller clock skew;
        // the rule is literally elapsed <= ttl, so it passes.
        let t = 1_760_000_000_000;
        assert!(is_code_valid(t, t - 5_000, None));
    }

    #[test]
    fn test_timestamp_wrapper_agrees() {
        let issued = Timestamp::parse("2026-03-01T12:00:00.000Z").unwrap();
        let at_boundary = Timestamp::parse("2026-03-01T12:03:00.000Z").unwrap();
        let past_boundary = Timestamp::parse("2026-03-01T12:03:00.001Z").unwrap();
        assert!(is_code_valid_at(issued, at_boundary, None));
        assert!(!is_code_valid_at(issued, past_boundary, None));
    }
}
