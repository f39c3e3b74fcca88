//! Day-granularity date arithmetic.
//!
//! All chart dates are calendar dates without a time of day, so every
//! function here works on [`NaiveDate`]. Ranges are inclusive on both ends:
//! a task that starts and ends on the same day lasts one day.

use chrono::{Datelike, Duration, NaiveDate};

use crate::ChartError;

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// The input must consist of exactly three `-`-separated numeric fields that
/// name a real calendar date. Out-of-range fields (`2024-02-30`, `2024-13-01`)
/// are rejected rather than rolled over into the next month.
///
/// ```
/// use tablegantt_core::date::parse_date;
///
/// let d = parse_date("2024-03-01").unwrap();
/// assert_eq!(d.to_string(), "2024-03-01");
/// assert!(parse_date("2024-02-30").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, ChartError> {
    let malformed = || ChartError::MalformedDate {
        input: input.to_string(),
    };

    let mut fields = input.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let year: i32 = parse_field(year).ok_or_else(malformed)?;
    let month: u32 = parse_field(month).ok_or_else(malformed)?;
    let day: u32 = parse_field(day).ok_or_else(malformed)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Inclusive number of days from `start` to `end`.
///
/// `days_between(d, d) == 1`. Only meaningful when `start <= end`; callers
/// obtain ordered pairs from [`DateRange`](crate::DateRange).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Shift a date by `days` calendar days (negative moves backwards).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// The Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    add_days(date, -i64::from(offset))
}

/// Calendar-date equality.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}
