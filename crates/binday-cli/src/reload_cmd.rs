use std::process::ExitCode;

use binday_core::{SavedSchedule, realign};
use tracing::info;

use crate::cli::ReloadArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::schedule_cmd::render_schedule;
use crate::shared::{
    parse_mismatch_policy, parse_tz_or_input_error, require_storable_count, resolve_today,
};
use crate::store;

pub fn run_reload(args: ReloadArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let policy = parse_mismatch_policy(&args.policy_mismatch)?;
    let today = resolve_today(args.today.as_deref(), tz)?;
    require_storable_count(args.count)?;

    let saved = store::load(&args.store).map_err(|e| CliError::runtime(format!("{e:#}")))?;
    let schedule = realign(&saved.schedule, args.count, today, policy)?;

    let refreshed = SavedSchedule {
        address: saved.address,
        schedule,
    };
    store::save(&args.store, &refreshed).map_err(|e| CliError::runtime(format!("{e:#}")))?;
    info!(address = %refreshed.address, %today, "store re-aligned");

    render_schedule(
        Some(refreshed.address.as_str()),
        &refreshed.schedule,
        today,
        tz,
        output_format,
    )?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
