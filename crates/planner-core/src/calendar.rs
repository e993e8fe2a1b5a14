use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;

/// Every calendar date in `[start, end]`, both ends included.
///
/// Yields nothing when `end < start`. Stops cleanly at `NaiveDate::MAX`.
#[derive(Debug, Clone)]
pub struct DateSpan {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateSpan {
    pub fn inclusive(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }

    /// Number of dates the span will yield.
    pub fn len_days(start: NaiveDate, end: NaiveDate) -> usize {
        if end < start {
            0
        } else {
            ((end - start).num_days() + 1) as usize
        }
    }
}

impl Iterator for DateSpan {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}

/// Puts a wall-clock time on a calendar date.
#[inline]
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Whole minutes from `start` to `end`, negative when `end` comes first.
///
/// Both values are read as instants on a single UTC line, so an `end` on a
/// later calendar day is counted in full.
#[inline]
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    end.and_utc()
        .signed_duration_since(start.and_utc())
        .num_minutes()
}

/// `date` moved forward by `days`, failing with [`CoreError::GenerationFailed`]
/// past the end of the supported calendar.
pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, CoreError> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        CoreError::GenerationFailed(format!("date {} + {} days is out of range", date, days).into())
    })
}

/// Parses "HH:MM" or "HH:MM:SS".
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, CoreError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| CoreError::Validation(format!("Invalid time of day: '{}'", input)))
}

/// Serde adapter for wall-clock times written as "HH:MM" (seconds optional).
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span_is_inclusive() {
        let days: Vec<_> = DateSpan::inclusive(date(2025, 10, 6), date(2025, 10, 8)).collect();
        assert_eq!(days, vec![date(2025, 10, 6), date(2025, 10, 7), date(2025, 10, 8)]);
    }

    #[test]
    fn test_span_single_day() {
        let days: Vec<_> = DateSpan::inclusive(date(2025, 10, 6), date(2025, 10, 6)).collect();
        assert_eq!(days, vec![date(2025, 10, 6)]);
    }

    #[test]
    fn test_span_reversed_is_empty() {
        assert_eq!(DateSpan::inclusive(date(2025, 10, 8), date(2025, 10, 6)).count(), 0);
        assert_eq!(DateSpan::len_days(date(2025, 10, 8), date(2025, 10, 6)), 0);
    }

    #[test]
    fn test_span_crosses_month_and_leap_day() {
        let days: Vec<_> = DateSpan::inclusive(date(2024, 2, 28), date(2024, 3, 1)).collect();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1], date(2024, 2, 29));
        assert_eq!(DateSpan::len_days(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_span_stops_at_calendar_end() {
        let days: Vec<_> = DateSpan::inclusive(NaiveDate::MAX, NaiveDate::MAX).collect();
        assert_eq!(days, vec![NaiveDate::MAX]);
    }

    #[test]
    fn test_minutes_between_across_midnight() {
        let start = date(2025, 10, 6).and_hms_opt(23, 15, 0).unwrap();
        let end = date(2025, 10, 7).and_hms_opt(0, 45, 0).unwrap();
        assert_eq!(minutes_between(start, end), 90);
        assert_eq!(minutes_between(end, start), -90);
    }

    #[test]
    fn test_add_days_overflow() {
        assert_eq!(add_days(date(2025, 10, 6), 1).unwrap(), date(2025, 10, 7));
        assert!(matches!(add_days(NaiveDate::MAX, 1), Err(CoreError::GenerationFailed(_))));
    }

    #[rstest]
    #[case("08:00", 8, 0)]
    #[case("8:05", 8, 5)]
    #[case("23:59:00", 23, 59)]
    fn test_parse_clock_time(#[case] input: &str, #[case] hour: u32, #[case] minute: u32) {
        assert_eq!(parse_clock_time(input).unwrap(), NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
    }

    #[test]
    fn test_parse_clock_time_rejects_garbage() {
        assert!(matches!(parse_clock_time("25:00"), Err(CoreError::Validation(_))));
        assert!(matches!(parse_clock_time("noon"), Err(CoreError::Validation(_))));
    }
}
