//! # Temporal Types
//!
//! UTC-only timestamp type for the CEX demo stack. All timestamps are
//! stored in UTC with second-level precision and a `Z` suffix in
//! serialized form.
//!
//! ## Design Decision
//!
//! Record timestamps (trades, staking rewards, notifications) feed sorted
//! histories and API responses consumed by clients in arbitrary time
//! zones. To prevent ambiguity, all timestamps are UTC; local time
//! conversion is a presentation concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 format with `Z` suffix (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn canonical_string_has_z_suffix_and_seconds() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_canonical_string(), "2026-01-15T12:00:00Z");
        assert_eq!(format!("{ts}"), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let b = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 1).unwrap());
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
