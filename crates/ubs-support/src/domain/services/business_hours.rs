//! Business-Hours Elapsed-Time Calculation
//!
//! Working time between two civil timestamps under the clinic network's
//! schedule: 08:00-12:00 and 13:00-17:00, Monday through Friday. Nights,
//! the lunch gap and weekends contribute nothing.

use chrono::{Datelike, NaiveDateTime, Weekday};

use crate::domain::value_objects::{CivilDateTime, WorkingDuration};

/// Morning and afternoon windows as (opening hour, closing hour) pairs.
const WINDOWS: [(u32, u32); 2] = [(8, 12), (13, 17)];

/// Business-hours calculator domain service
pub struct BusinessHours;

impl BusinessHours {
    /// Working time between `start` and `end`.
    ///
    /// Walks day by day from `start`, intersecting the remaining span with
    /// each day's business windows. A reversed or empty span yields zero.
    pub fn between(start: CivilDateTime, end: CivilDateTime) -> WorkingDuration {
        if start >= end {
            return WorkingDuration::ZERO;
        }

        let end = end.naive();
        let mut cursor = start.naive();
        let mut total_seconds: i64 = 0;

        while cursor < end {
            if matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun) {
                cursor = next_midnight(cursor);
                continue;
            }

            let date = cursor.date();
            for (opening, closing) in WINDOWS {
                let window_start = date.and_hms_opt(opening, 0, 0).expect("valid window time");
                let window_end = date.and_hms_opt(closing, 0, 0).expect("valid window time");
                let slice_start = cursor.max(window_start);
                let slice_end = end.min(window_end);
                if slice_end > slice_start {
                    total_seconds += (slice_end - slice_start).num_seconds();
                }
            }

            cursor = next_midnight(cursor);
        }

        WorkingDuration::from_seconds(total_seconds)
    }
}

fn next_midnight(cursor: NaiveDateTime) -> NaiveDateTime {
    (cursor.date() + chrono::Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-02-05 is a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> CivilDateTime {
        CivilDateTime::from_ymd_hms(2024, 2, day, hour, minute, 0).unwrap()
    }

    const HOUR: i64 = 3600;

    #[test]
    fn test_zero_span() {
        let t = at(5, 9, 0);
        assert_eq!(BusinessHours::between(t, t), WorkingDuration::ZERO);
    }

    #[test]
    fn test_reversed_span_is_zero() {
        assert_eq!(
            BusinessHours::between(at(5, 11, 0), at(5, 9, 0)),
            WorkingDuration::ZERO
        );
    }

    #[test]
    fn test_same_day_within_window() {
        let elapsed = BusinessHours::between(at(5, 9, 0), at(5, 11, 0));
        assert_eq!(elapsed.as_seconds(), 2 * HOUR);
    }

    #[test]
    fn test_lunch_gap_excluded() {
        // 11:30 -> 13:30 spans the lunch break: 30m morning + 30m afternoon.
        let elapsed = BusinessHours::between(at(5, 11, 30), at(5, 13, 30));
        assert_eq!(elapsed.as_seconds(), HOUR);
    }

    #[test]
    fn test_weekend_skipped() {
        // Friday 16:00 -> Monday 09:00: one hour Friday, one hour Monday.
        let friday = at(9, 16, 0);
        let monday = at(12, 9, 0);
        assert_eq!(BusinessHours::between(friday, monday).as_seconds(), 2 * HOUR);
    }

    #[test]
    fn test_multi_day_accumulation() {
        // Monday 08:00 -> Wednesday 17:00: three full 8-hour days.
        let elapsed = BusinessHours::between(at(5, 8, 0), at(7, 17, 0));
        assert_eq!(elapsed.as_seconds(), 24 * HOUR);
    }

    #[test]
    fn test_before_hours_start() {
        // Dead time before 08:00 contributes nothing.
        let elapsed = BusinessHours::between(at(5, 6, 0), at(5, 9, 0));
        assert_eq!(elapsed.as_seconds(), HOUR);
    }

    #[test]
    fn test_after_hours_end_contributes_nothing() {
        let elapsed = BusinessHours::between(at(5, 16, 30), at(5, 22, 0));
        assert_eq!(elapsed.as_seconds(), HOUR / 2);
    }

    #[test]
    fn test_start_on_weekend_fast_forwards() {
        // Saturday morning -> Monday 09:00 credits only Monday 08:00-09:00.
        let saturday = at(10, 10, 0);
        let monday = at(12, 9, 0);
        assert_eq!(BusinessHours::between(saturday, monday).as_seconds(), HOUR);
    }

    #[test]
    fn test_end_mid_window_partial_credit() {
        let elapsed = BusinessHours::between(at(5, 8, 0), at(5, 10, 15));
        assert_eq!(elapsed.as_seconds(), 2 * HOUR + 15 * 60);
    }

    #[test]
    fn test_open_overnight_scenario() {
        // Monday 10:00 -> Tuesday 10:00: 2h + 4h on Monday, 2h on Tuesday.
        let elapsed = BusinessHours::between(at(5, 10, 0), at(6, 10, 0));
        assert_eq!(elapsed.as_seconds(), 8 * HOUR);
    }

    #[test]
    fn test_sub_minute_precision_kept_in_seconds() {
        let start = CivilDateTime::from_ymd_hms(2024, 2, 5, 9, 0, 30).unwrap();
        let end = CivilDateTime::from_ymd_hms(2024, 2, 5, 9, 1, 0).unwrap();
        assert_eq!(BusinessHours::between(start, end).as_seconds(), 30);
    }
}
