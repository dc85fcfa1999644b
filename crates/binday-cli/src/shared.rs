use std::fs;
use std::io::{self, Read};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use binday_core::MismatchPolicy;
use binday_core::parse::{parse_date_str, parse_instant};
use binday_core::tz::{local_today, parse_tz};

use crate::error::{CliError, CliResult};

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    parse_tz(name).map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

pub fn parse_mismatch_policy(s: &str) -> CliResult<MismatchPolicy> {
    let wanted = s.to_lowercase();
    MismatchPolicy::ALL
        .into_iter()
        .find(|policy| policy.to_string() == wanted)
        .ok_or_else(|| {
            let expected: Vec<String> =
                MismatchPolicy::ALL.iter().map(|p| p.to_string()).collect();
            CliError::input(format!(
                "Invalid policy_mismatch '{}'. Expected: {}",
                s,
                expected.join(", ")
            ))
        })
}

/// A persisted schedule needs at least one date per bin to be reloadable.
pub fn require_storable_count(count: usize) -> CliResult<()> {
    if count == 0 {
        return Err(CliError::input(
            "Invalid count 0: a saved schedule needs at least one date per bin",
        ));
    }
    Ok(())
}

/// The local date to compute against: `--today` if given, else the clock.
pub fn resolve_today(today: Option<&str>, tz: Tz) -> CliResult<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
            CliError::input(format!(
                "Invalid today '{}': {}. Expected: YYYY-MM-DD",
                s, e
            ))
        }),
        None => Ok(local_today(Utc::now(), tz)),
    }
}

pub fn resolve_now(now: Option<&str>) -> CliResult<DateTime<Utc>> {
    match now {
        Some(s) => parse_instant(s).map_err(|e| CliError::input(format!("Invalid now: {}", e))),
        None => Ok(Utc::now()),
    }
}

pub fn parse_reference(s: &str, tz: Tz) -> CliResult<NaiveDate> {
    parse_date_str(s, tz).map_err(|e| CliError::input(format!("Invalid reference: {}", e)))
}

/// Read a whole input file, or stdin for `-`.
pub fn read_input(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::runtime(format!("Failed to read stdin: {}", e)))?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", path, e)))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Short display date, e.g. "Wed 20 Mar".
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

pub fn plural_weeks(weeks: u32) -> String {
    if weeks == 1 {
        "every week".to_string()
    } else {
        format!("every {} weeks", weeks)
    }
}
