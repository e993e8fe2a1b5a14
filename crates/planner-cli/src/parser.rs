use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use planner_core::calendar::{combine, parse_clock_time};
use std::collections::HashSet;

/// Parses a calendar date: ISO ('2025-10-06') first, then English ('today', 'next friday').
pub fn parse_day(input: &str, timezone: &Tz) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(input, Utc::now().with_timezone(timezone), Dialect::Uk)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parses a civil date and time: ISO ('2025-10-06 09:00') first, then English ('tomorrow 9am').
pub fn parse_datetime(input: &str, timezone: &Tz) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime);
        }
    }
    parse_date_string(trimmed, Utc::now().with_timezone(timezone), Dialect::Uk)
        .map(|dt| truncate_to_minute(dt.naive_local()))
        .map_err(|e| anyhow!("Failed to parse date and time '{}': {}", input, e))
}

/// An end given as a bare 'HH:MM' lands on the start's date; anything else is a full date and time.
pub fn parse_end(input: &str, start: NaiveDateTime, timezone: &Tz) -> Result<NaiveDateTime> {
    match parse_clock_time(input) {
        Ok(time) => Ok(combine(start.date(), time)),
        Err(_) => parse_datetime(input, timezone),
    }
}

/// Parses a comma-separated weekday list such as 'mon,wed,fri'.
pub fn parse_weekdays(input: &str) -> Result<HashSet<Weekday>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Weekday>()
                .map_err(|_| anyhow!("Invalid weekday '{}'. Use mon,tue,wed,thu,fri,sat,sun", s))
        })
        .collect()
}

pub fn truncate_to_minute(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(datetime)
}
