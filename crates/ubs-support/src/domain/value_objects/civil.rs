//! Civil Timestamp Value Object
//!
//! Second-precision wall-clock time in the platform's fixed civil time zone
//! (UTC-3). Timestamps cross the boundary as `DD/MM/YYYY HH:MM:SS` strings
//! and must round-trip losslessly to the second.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const BOUNDARY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// The fixed civil time zone all timestamps live in (UTC-3).
pub fn civil_offset() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("UTC-3 is a valid offset")
}

/// Civil wall-clock timestamp, truncated to whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDateTime(NaiveDateTime);

impl CivilDateTime {
    pub fn new(inner: NaiveDateTime) -> Self {
        // Subsecond precision would be lost through the boundary format.
        Self(inner.with_nanosecond(0).unwrap_or(inner))
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let inner = date.and_hms_opt(hour, minute, second)?;
        Some(Self(inner))
    }

    pub fn parse(value: &str) -> Result<Self, CivilDateTimeError> {
        NaiveDateTime::parse_from_str(value.trim(), BOUNDARY_FORMAT)
            .map(Self)
            .map_err(|_| CivilDateTimeError::InvalidFormat)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Start of the next calendar day (00:00:00).
    pub fn next_midnight(&self) -> Self {
        let next = self.0.date() + Duration::days(1);
        Self(next.and_hms_opt(0, 0, 0).expect("midnight is a valid time"))
    }

    /// Calendar-month bucket key, e.g. `2024-03`.
    pub fn month_bucket(&self) -> String {
        format!("{:04}-{:02}", self.0.year(), self.0.month())
    }

    /// Whole seconds from `self` until `later` (negative when reversed).
    pub fn seconds_until(&self, later: CivilDateTime) -> i64 {
        (later.0 - self.0).num_seconds()
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BOUNDARY_FORMAT))
    }
}

impl FromStr for CivilDateTime {
    type Err = CivilDateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CivilDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CivilDateTimeError {
    InvalidFormat,
}

impl std::error::Error for CivilDateTimeError {}

impl fmt::Display for CivilDateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "Timestamp must match DD/MM/YYYY HH:MM:SS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_round_trip() {
        let raw = "05/02/2024 14:37:09";
        let ts = CivilDateTime::parse(raw).unwrap();
        assert_eq!(ts.to_string(), raw);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let ts = CivilDateTime::parse("  01/01/2024 08:00:00 ").unwrap();
        assert_eq!(ts.to_string(), "01/01/2024 08:00:00");
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(CivilDateTime::parse("2024-02-05 14:37:09").is_err());
        assert!(CivilDateTime::parse("garbage").is_err());
    }

    #[test]
    fn test_ordering() {
        let earlier = CivilDateTime::from_ymd_hms(2024, 2, 5, 8, 0, 0).unwrap();
        let later = CivilDateTime::from_ymd_hms(2024, 2, 5, 9, 0, 0).unwrap();
        assert!(earlier < later);
        assert_eq!(earlier.seconds_until(later), 3600);
        assert_eq!(later.seconds_until(earlier), -3600);
    }

    #[test]
    fn test_weekend_detection() {
        // 2024-02-03 is a Saturday
        let saturday = CivilDateTime::from_ymd_hms(2024, 2, 3, 10, 0, 0).unwrap();
        let monday = CivilDateTime::from_ymd_hms(2024, 2, 5, 10, 0, 0).unwrap();
        assert!(saturday.is_weekend());
        assert!(!monday.is_weekend());
    }

    #[test]
    fn test_next_midnight_crosses_month() {
        let ts = CivilDateTime::from_ymd_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(ts.next_midnight().to_string(), "01/02/2024 00:00:00");
    }

    #[test]
    fn test_month_bucket() {
        let ts = CivilDateTime::from_ymd_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(ts.month_bucket(), "2024-03");
    }

    #[test]
    fn test_serde_uses_boundary_format() {
        let ts = CivilDateTime::from_ymd_hms(2024, 2, 5, 14, 37, 9).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"05/02/2024 14:37:09\"");
        let back: CivilDateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
