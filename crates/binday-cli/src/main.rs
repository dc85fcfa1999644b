use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod next_cmd;
mod reload_cmd;
mod reminders_cmd;
mod schedule_cmd;
mod shared;
mod store;

use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use next_cmd::run_next;
use reload_cmd::run_reload;
use reminders_cmd::run_reminders;
use schedule_cmd::run_schedule;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch<A>(
    args: A,
    output_format: &str,
    run: fn(A, OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let fallback = output_format_hint(output_format);
    let output_format = match parse_output_format(output_format) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(args, output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    match cli.command {
        Commands::Next(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_next)
        }
        Commands::Schedule(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_schedule)
        }
        Commands::Reload(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_reload)
        }
        Commands::Reminders(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_reminders)
        }
    }
}
