//! Value formatting for card items: relative times, dates and durations.

use chrono::{DateTime, NaiveDate, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// "3 days ago" style distance between `then` and `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < MINUTE {
        return "just now".to_string();
    }
    let (count, unit) = if seconds < HOUR {
        (seconds / MINUTE, "minute")
    } else if seconds < DAY {
        (seconds / HOUR, "hour")
    } else if seconds < MONTH {
        (seconds / DAY, "day")
    } else if seconds < YEAR {
        (seconds / MONTH, "month")
    } else {
        (seconds / YEAR, "year")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

pub fn format_duration_hours(total_seconds: f64) -> String {
    let total_minutes = (total_seconds.max(0.0) / 60.0).floor() as u64;
    format!("{} hours, {} mins", total_minutes / 60, total_minutes % 60)
}

/// "Aug 6, 2022"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Nov 7"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.get(..10)?, "%Y-%m-%d").ok()
}

pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
