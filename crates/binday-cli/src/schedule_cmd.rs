use std::process::ExitCode;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use binday_core::models::weekday_full_name;
use binday_core::{
    SavedSchedule, Schedule, ThisWeekEntry, WeekWindow, parse_zone_json, schedule_from_zone,
    this_week, week_window,
};

use crate::cli::ScheduleArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    format_short_date, parse_tz_or_input_error, plural_weeks, print_json, read_input,
    require_storable_count, resolve_today,
};
use crate::store;

pub fn run_schedule(args: ScheduleArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let today = resolve_today(args.today.as_deref(), tz)?;
    if args.store.is_some() {
        require_storable_count(args.count)?;
    }

    let input = read_input(&args.zone)?;
    let record = parse_zone_json(&input)?;
    let schedule = schedule_from_zone(&record, tz, args.count, today)?;

    if let (Some(path), Some(address)) = (&args.store, &args.address) {
        let saved = SavedSchedule {
            address: address.clone(),
            schedule: schedule.clone(),
        };
        store::save(path, &saved).map_err(|e| CliError::runtime(format!("{e:#}")))?;
        info!(path = %path.display(), "schedule saved");
    }

    render_schedule(
        args.address.as_deref(),
        &schedule,
        today,
        tz,
        output_format,
    )?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ScheduleOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    today: NaiveDate,
    week: WeekWindow,
    this_week: Vec<ThisWeekEntry>,
    schedule: &'a Schedule,
}

/// Print a schedule with its "this week" view.
pub fn render_schedule(
    address: Option<&str>,
    schedule: &Schedule,
    today: NaiveDate,
    tz: Tz,
    output_format: OutputFormat,
) -> CliResult<()> {
    let current = this_week(schedule, today);

    match output_format {
        OutputFormat::Json => print_json(&ScheduleOutput {
            address,
            today,
            week: week_window(today, tz)?,
            this_week: current,
            schedule,
        })?,
        OutputFormat::Text => {
            let week = week_window(today, tz)?;
            if let Some(address) = address {
                println!("Address: {}", address);
            }
            println!(
                "This week ({} to {}):",
                format_short_date(week.start),
                format_short_date(week.end)
            );
            if current.is_empty() {
                println!("  No collections scheduled for this week");
            }
            for entry in &current {
                println!(
                    "  {}: {} - {}",
                    entry.bin.label(),
                    format_short_date(entry.date),
                    entry.status
                );
            }
            println!("Upcoming collections:");
            for (bin, entry) in schedule.iter() {
                let dates: Vec<String> = entry.dates.iter().map(|d| format_short_date(*d)).collect();
                println!(
                    "  {}, {} on {}s: {}",
                    bin.label(),
                    plural_weeks(entry.weeks),
                    weekday_full_name(entry.day),
                    dates.join(", ")
                );
            }
        }
    }

    Ok(())
}
