use std::process::ExitCode;

use binday_core::tz::local_today;
use binday_core::{realign, reminders};

use crate::cli::RemindersArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    format_short_date, parse_mismatch_policy, parse_tz_or_input_error, print_json, resolve_now,
};
use crate::store;

pub fn run_reminders(args: RemindersArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let policy = parse_mismatch_policy(&args.policy_mismatch)?;
    let now = resolve_now(args.now.as_deref())?;

    let saved = store::load(&args.store).map_err(|e| CliError::runtime(format!("{e:#}")))?;
    let schedule = realign(&saved.schedule, args.count, local_today(now, tz), policy)?;
    let pending = reminders(&schedule, tz, now)?;

    match output_format {
        OutputFormat::Json => print_json(&pending)?,
        OutputFormat::Text => {
            if pending.is_empty() {
                println!("No pending reminders");
            }
            for reminder in &pending {
                println!(
                    "{} {} ({})",
                    reminder.fire_local,
                    reminder.label,
                    format_short_date(reminder.collection_date)
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
