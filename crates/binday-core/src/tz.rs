//! Timezone handling utilities.
//!
//! Collection dates are plain calendar dates, but "today", week boundaries
//! and reminder fire times depend on the local clock. This module parses
//! timezone names and converts local wall-clock times to UTC with proper
//! DST handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{BinDayError, Result};

/// Timezone used when none is given.
pub const DEFAULT_TZ: &str = "Australia/Melbourne";

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use binday_core::tz::parse_tz;
///
/// let tz = parse_tz("Australia/Melbourne").unwrap();
/// assert_eq!(tz.to_string(), "Australia/Melbourne");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BinDayError::InvalidTimezone(name.to_string()))
}

/// The local calendar date of an instant, i.e. "today" at that moment.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Convert a local wall-clock time in `tz` to UTC.
///
/// Ambiguous times (DST fall back) resolve to the earlier instant.
/// Nonexistent times (DST spring forward) shift forward to the first
/// representable minute.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Ok(dt.with_timezone(&Utc));
    }

    // Search forward minute by minute. Two days covers every historical gap.
    let max_minutes = 2 * 24 * 60;
    for minutes in 1..=max_minutes {
        let candidate = local + chrono::Duration::minutes(minutes);
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    Err(BinDayError::RuntimeError(format!(
        "Could not resolve local time {} in timezone {}",
        local.format("%Y-%m-%dT%H:%M:%S"),
        tz
    )))
}

/// Convert local midnight of `date` to UTC.
pub fn local_midnight_to_utc(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// Format a datetime as RFC3339 with timezone offset.
///
/// An RFC3339 formatted string (e.g., "2024-03-19T18:00:00+11:00").
pub fn format_rfc3339<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format a UTC datetime as RFC3339 with Z suffix.
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
