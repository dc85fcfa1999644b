//! Input parsing for collection rules.
//!
//! The waste zone feature service is loosely typed: reference dates arrive
//! either as date strings or as epoch milliseconds, and weekday names and
//! intervals are free-form. This module turns those raw values into
//! validated [`chrono`] values:
//! - [`parse_weekday`]: `Wednesday`, `wednesday`, `Wed`
//! - [`parse_interval`]: positive whole weeks
//! - [`parse_reference_date`]: `YYYY-MM-DD`, `YYYY/MM/DD`, RFC3339, epoch ms

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BinDayError, Result};

/// A raw date value as sent by the feature service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Unix epoch milliseconds (e.g., 1704200400000)
    EpochMs(i64),
    /// A date or datetime string (e.g., "2024-01-03")
    Text(String),
}

impl From<&str> for DateValue {
    fn from(s: &str) -> Self {
        DateValue::Text(s.to_string())
    }
}

/// Parse a weekday name.
///
/// Accepts the seven English names and their three-letter abbreviations,
/// case-insensitively. Anything else is rejected so alignment can never
/// search for a day that does not exist.
///
/// # Examples
///
/// ```
/// use binday_core::parse::parse_weekday;
/// use chrono::Weekday;
///
/// assert_eq!(parse_weekday("Wednesday").unwrap(), Weekday::Wed);
/// assert!(parse_weekday("Wedding").is_err());
/// ```
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    name.trim()
        .parse::<Weekday>()
        .map_err(|_| BinDayError::InvalidWeekday(name.to_string()))
}

/// Validate a repeat interval in weeks.
pub fn parse_interval(weeks: i64) -> Result<u32> {
    if weeks < 1 {
        return Err(BinDayError::InvalidInterval(weeks.to_string()));
    }
    u32::try_from(weeks).map_err(|_| BinDayError::InvalidInterval(weeks.to_string()))
}

/// Parse a repeat interval given as text (e.g., "2").
pub fn parse_interval_str(weeks: &str) -> Result<u32> {
    let n: i64 = weeks
        .trim()
        .parse()
        .map_err(|_| BinDayError::InvalidInterval(format!("'{}'", weeks)))?;
    parse_interval(n)
}

/// Parse a reference date into a local calendar date.
///
/// Plain dates are taken verbatim. Instants (RFC3339 strings and epoch
/// milliseconds) are converted to the calendar date they fall on in `tz`.
///
/// # Examples
///
/// ```
/// use binday_core::parse::{DateValue, parse_reference_date};
/// use binday_core::tz::parse_tz;
/// use chrono::NaiveDate;
///
/// let tz = parse_tz("Australia/Melbourne").unwrap();
/// let date = parse_reference_date(&DateValue::from("2024-01-03"), tz).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
///
/// // 2024-01-02T13:00:00Z is already Jan 3 in Melbourne (UTC+11)
/// let date = parse_reference_date(&DateValue::EpochMs(1704200400000), tz).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
/// ```
pub fn parse_reference_date(value: &DateValue, tz: Tz) -> Result<NaiveDate> {
    match value {
        DateValue::EpochMs(ms) => parse_epoch_ms(*ms, tz),
        DateValue::Text(s) => parse_date_str(s, tz),
    }
}

/// Parse a date string, auto-detecting the format.
///
/// Tried in order:
/// 1. Plain date (`YYYY-MM-DD` or `YYYY/MM/DD`)
/// 2. RFC3339 with offset
/// 3. Local datetime without offset (date part is used)
/// 4. Integer epoch milliseconds
pub fn parse_date_str(input: &str, tz: Tz) -> Result<NaiveDate> {
    let trimmed = input.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&tz).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    if let Ok(ms) = trimmed.parse::<i64>() {
        return parse_epoch_ms(ms, tz);
    }

    Err(BinDayError::ParseError(format!(
        "Invalid date: '{}'. Expected YYYY-MM-DD, RFC3339 or epoch milliseconds",
        input
    )))
}

/// Convert epoch milliseconds to the local calendar date in `tz`.
fn parse_epoch_ms(ms: i64, tz: Tz) -> Result<NaiveDate> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.with_timezone(&tz).date_naive())
        .ok_or_else(|| BinDayError::ParseError(format!("Epoch milliseconds out of range: {}", ms)))
}

/// Parse an RFC3339 instant (e.g., `2024-03-19T08:00:00+11:00`).
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            BinDayError::ParseError(format!(
                "Invalid RFC3339 timestamp: '{}'. Error: {}",
                trimmed, e
            ))
        })
}
