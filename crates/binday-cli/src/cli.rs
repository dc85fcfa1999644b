use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bin collection schedule tool
#[derive(Parser, Debug)]
#[command(name = "binday", version)]
#[command(about = "Bin collection schedule tool")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute upcoming occurrences of a single collection rule
    Next(NextArgs),
    /// Build a schedule from a waste zone lookup result
    Schedule(ScheduleArgs),
    /// Re-align the saved schedule to today
    Reload(ReloadArgs),
    /// List pending evening-before reminders for the saved schedule
    Reminders(RemindersArgs),
}

#[derive(clap::Args, Debug)]
pub struct NextArgs {
    /// Reference collection date (YYYY-MM-DD, RFC3339 or epoch ms)
    #[arg(long)]
    pub reference: String,

    /// Collection weekday (e.g., Wednesday)
    #[arg(long)]
    pub weekday: String,

    /// Repeat interval in weeks
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub weeks: i64,

    /// Number of occurrences to list
    #[arg(short = 'n', long, default_value_t = 4)]
    pub count: usize,

    /// Local date to treat as today (YYYY-MM-DD); defaults to the clock
    #[arg(long)]
    pub today: Option<String>,

    /// IANA timezone for "today" and instant inputs
    #[arg(short, long, default_value = "Australia/Melbourne")]
    pub tz: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ScheduleArgs {
    /// Waste zone response file (GeoJSON or properties; use - for stdin)
    #[arg(long, default_value = "-")]
    pub zone: String,

    /// Address the zone was looked up for
    #[arg(long)]
    pub address: Option<String>,

    /// Save the schedule to this store file
    #[arg(long, requires = "address")]
    pub store: Option<PathBuf>,

    /// Number of occurrences per bin
    #[arg(short = 'n', long, default_value_t = 4)]
    pub count: usize,

    /// Local date to treat as today (YYYY-MM-DD); defaults to the clock
    #[arg(long)]
    pub today: Option<String>,

    /// IANA timezone
    #[arg(short, long, default_value = "Australia/Melbourne")]
    pub tz: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ReloadArgs {
    /// Store file written by `schedule --store`
    #[arg(long)]
    pub store: PathBuf,

    /// Number of occurrences per bin
    #[arg(short = 'n', long, default_value_t = 4)]
    pub count: usize,

    /// Local date to treat as today (YYYY-MM-DD); defaults to the clock
    #[arg(long)]
    pub today: Option<String>,

    /// IANA timezone
    #[arg(short, long, default_value = "Australia/Melbourne")]
    pub tz: String,

    /// Policy when a stored date disagrees with its weekday: error, trust_weekday
    #[arg(long, default_value = "error")]
    pub policy_mismatch: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct RemindersArgs {
    /// Store file written by `schedule --store`
    #[arg(long)]
    pub store: PathBuf,

    /// Current instant (RFC3339); defaults to the clock
    #[arg(long)]
    pub now: Option<String>,

    /// Number of occurrences per bin to derive reminders for
    #[arg(short = 'n', long, default_value_t = 4)]
    pub count: usize,

    /// IANA timezone
    #[arg(short, long, default_value = "Australia/Melbourne")]
    pub tz: String,

    /// Policy when a stored date disagrees with its weekday: error, trust_weekday
    #[arg(long, default_value = "error")]
    pub policy_mismatch: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
