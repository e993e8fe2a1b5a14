use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Parse an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Validate IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    parse_timezone(timezone).map(|_| ())
}

/// The calendar date `now` falls on in `timezone`.
///
/// Only used to pick defaults ("today"); generation itself never reads the clock.
pub fn today_in(timezone: &Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(timezone).date_naive()
}

/// Resolve a civil date-time to an instant in `timezone`.
///
/// Ambiguous times (fall back) resolve to the earlier instant. Times that do
/// not exist (spring forward) are moved one hour later.
pub fn to_instant(civil: NaiveDateTime, timezone: &Tz) -> DateTime<Utc> {
    if let Some(local) = timezone.from_local_datetime(&civil).earliest() {
        return local.with_timezone(&Utc);
    }
    let shifted = civil + chrono::Duration::hours(1);
    match timezone.from_local_datetime(&shifted).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // No zone skips more than an hour; fall back to reading the civil time as UTC.
        None => civil.and_utc(),
    }
}

/// Whole minutes between two civil times as actually elapsed in `timezone`.
///
/// Differs from [`crate::calendar::minutes_between`] only across DST transitions.
pub fn elapsed_minutes_in(start: NaiveDateTime, end: NaiveDateTime, timezone: &Tz) -> i64 {
    to_instant(end, timezone)
        .signed_duration_since(to_instant(start, timezone))
        .num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(matches!(
            validate_timezone("Invalid/Timezone"),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_today_in_zone() {
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 23, 30, 0).unwrap();
        let tokyo = parse_timezone("Asia/Tokyo").unwrap();
        let new_york = parse_timezone("America/New_York").unwrap();
        assert_eq!(today_in(&tokyo, now), NaiveDate::from_ymd_opt(2025, 10, 7).unwrap());
        assert_eq!(today_in(&new_york, now), NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
    }

    #[test]
    fn test_elapsed_minutes_across_spring_forward() {
        let berlin = parse_timezone("Europe/Berlin").unwrap();
        // Clocks jump from 02:00 to 03:00 on 2025-03-30.
        let start = civil(2025, 3, 30, 1, 0);
        let end = civil(2025, 3, 30, 4, 0);
        assert_eq!(elapsed_minutes_in(start, end, &berlin), 120);
    }

    #[test]
    fn test_elapsed_minutes_across_fall_back() {
        let berlin = parse_timezone("Europe/Berlin").unwrap();
        // 02:00-03:00 happens twice on 2025-10-26.
        let start = civil(2025, 10, 26, 0, 0);
        let end = civil(2025, 10, 26, 4, 0);
        assert_eq!(elapsed_minutes_in(start, end, &berlin), 300);
    }

    #[test]
    fn test_nonexistent_time_moves_forward() {
        let berlin = parse_timezone("Europe/Berlin").unwrap();
        let gap_time = civil(2025, 3, 30, 2, 30);
        let instant = to_instant(gap_time, &berlin);
        // 03:30 CEST
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap());
    }

    #[test]
    fn test_utc_matches_naive_math() {
        let utc = parse_timezone("UTC").unwrap();
        assert_eq!(elapsed_minutes_in(civil(2025, 10, 6, 22, 0), civil(2025, 10, 7, 1, 0), &utc), 180);
    }
}
