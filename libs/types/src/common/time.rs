//! Feed timestamps
//!
//! Nanoseconds since the Unix epoch. Zero is the wire encoding of "no time",
//! which matters to derivation: an irregular trade time only wins over the
//! regular time when it actually carries a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EMPTY: Self = Self(0);

    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// True when the timestamp carries a time
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0 / 1_000_000_000).ok()?;
        let nanos = (self.0 % 1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        let nanos = value.timestamp_nanos_opt().unwrap_or(0);
        Self(u64::try_from(nanos).unwrap_or(0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) if self.is_set() => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.9fZ")),
            _ => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timestamp() {
        assert!(!Timestamp::EMPTY.is_set());
        assert!(!Timestamp::default().is_set());
        assert_eq!(Timestamp::EMPTY.to_string(), "-");
    }

    #[test]
    fn test_datetime_roundtrip() {
        let ts = Timestamp::from_millis(1_700_000_000_123);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(Timestamp::from(dt), ts);
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.123000000Z");
    }
}
