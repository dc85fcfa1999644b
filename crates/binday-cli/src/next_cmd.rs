use std::process::ExitCode;

use chrono::NaiveDate;
use serde::Serialize;

use binday_core::models::weekday_full_name;
use binday_core::parse::{parse_interval, parse_weekday};
use binday_core::recurrence::{is_current_week, occurrence_sequence};

use crate::cli::NextArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    format_short_date, parse_reference, parse_tz_or_input_error, print_json, resolve_today,
};

pub fn run_next(args: NextArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let reference = parse_reference(&args.reference, tz)?;
    let weekday = parse_weekday(&args.weekday)?;
    let weeks = parse_interval(args.weeks)?;
    let today = resolve_today(args.today.as_deref(), tz)?;

    let dates = occurrence_sequence(reference, weekday, weeks, args.count, today)?;

    match output_format {
        OutputFormat::Json => print_json(&NextResult {
            reference,
            weekday: weekday_full_name(weekday),
            weeks,
            today,
            dates: dates
                .iter()
                .map(|&date| NextDate {
                    date,
                    this_week: is_current_week(date, today),
                })
                .collect(),
        })?,
        OutputFormat::Text => {
            for date in &dates {
                let marker = if is_current_week(*date, today) {
                    " (this week)"
                } else {
                    ""
                };
                println!("{} {}{}", date, format_short_date(*date), marker);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct NextResult {
    reference: NaiveDate,
    weekday: &'static str,
    weeks: u32,
    today: NaiveDate,
    dates: Vec<NextDate>,
}

#[derive(Debug, Serialize)]
struct NextDate {
    date: NaiveDate,
    this_week: bool,
}
