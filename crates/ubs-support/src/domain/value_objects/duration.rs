//! Working Duration Value Object
//!
//! Accumulated working time in seconds, displayed as `"Xd Yh Zm"` with zero
//! leading components omitted and the minutes component always shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

const SECS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Non-negative span of working time.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WorkingDuration(i64);

impl WorkingDuration {
    pub const ZERO: Self = Self(0);

    pub fn from_seconds(seconds: i64) -> Self {
        Self(seconds.max(0))
    }

    pub fn as_seconds(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for WorkingDuration {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for WorkingDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for WorkingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_minutes = self.0 / SECS_PER_MINUTE;
        let days = total_minutes / MINUTES_PER_DAY;
        let hours = (total_minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        let minutes = total_minutes % MINUTES_PER_HOUR;
        if days > 0 {
            write!(f, "{}d {}h {}m", days, hours, minutes)
        } else if hours > 0 {
            write!(f, "{}h {}m", hours, minutes)
        } else {
            write!(f, "{}m", minutes)
        }
    }
}

impl FromStr for WorkingDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut seconds: i64 = 0;
        let mut saw_token = false;
        for token in s.split_whitespace() {
            let (value, factor) = if let Some(v) = token.strip_suffix('d') {
                (v, MINUTES_PER_DAY * SECS_PER_MINUTE)
            } else if let Some(v) = token.strip_suffix('h') {
                (v, MINUTES_PER_HOUR * SECS_PER_MINUTE)
            } else if let Some(v) = token.strip_suffix('m') {
                (v, SECS_PER_MINUTE)
            } else {
                return Err(DurationParseError::InvalidToken(token.to_string()));
            };
            let amount: i64 = value
                .parse()
                .map_err(|_| DurationParseError::InvalidToken(token.to_string()))?;
            if amount < 0 {
                return Err(DurationParseError::InvalidToken(token.to_string()));
            }
            seconds += amount * factor;
            saw_token = true;
        }
        if !saw_token {
            return Err(DurationParseError::Empty);
        }
        Ok(Self(seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    Empty,
    InvalidToken(String),
}

impl std::error::Error for DurationParseError {}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Duration string is empty"),
            Self::InvalidToken(t) => write!(f, "Invalid duration token: {}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_always_shown() {
        assert_eq!(WorkingDuration::ZERO.to_string(), "0m");
        assert_eq!(WorkingDuration::from_seconds(30 * 60).to_string(), "30m");
    }

    #[test]
    fn test_leading_zero_components_omitted() {
        assert_eq!(
            WorkingDuration::from_seconds(2 * 3600 + 15 * 60).to_string(),
            "2h 15m"
        );
        assert_eq!(
            WorkingDuration::from_seconds(26 * 3600).to_string(),
            "1d 2h 0m"
        );
        // Inner zeros stay once a larger unit is present.
        assert_eq!(
            WorkingDuration::from_seconds(24 * 3600 + 5 * 60).to_string(),
            "1d 0h 5m"
        );
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        assert_eq!(WorkingDuration::from_seconds(-90), WorkingDuration::ZERO);
    }

    #[test]
    fn test_format_parse_round_trip() {
        for seconds in [0, 60, 59 * 60, 3600, 8 * 3600, 26 * 3600 + 15 * 60] {
            let duration = WorkingDuration::from_seconds(seconds);
            let parsed: WorkingDuration = duration.to_string().parse().unwrap();
            assert_eq!(parsed.as_seconds(), seconds);
        }
    }

    #[test]
    fn test_round_trip_truncates_to_minute() {
        let duration = WorkingDuration::from_seconds(3600 + 45);
        let parsed: WorkingDuration = duration.to_string().parse().unwrap();
        assert_eq!(parsed.as_seconds(), 3600);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<WorkingDuration>(),
            Err(DurationParseError::Empty)
        ));
        assert!("2x".parse::<WorkingDuration>().is_err());
        assert!("h".parse::<WorkingDuration>().is_err());
    }

    #[test]
    fn test_sum() {
        let total: WorkingDuration = [
            WorkingDuration::from_seconds(3600),
            WorkingDuration::from_seconds(1800),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.as_seconds(), 5400);
    }
}
