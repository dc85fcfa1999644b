//! Error types for binday-core.
//!
//! Every fallible operation in the library returns [`BinDayError`]. The
//! categories separate malformed input (weekday names, intervals, dates,
//! timezones) from schedule-level conditions the caller must react to
//! (no zone for the address, a stored schedule that can no longer be trusted).

use thiserror::Error;

/// The main error type for binday operations.
#[derive(Debug, Error)]
pub enum BinDayError {
    /// Weekday name that is not one of the seven calendar days.
    #[error("Invalid weekday: '{0}'")]
    InvalidWeekday(String),

    /// Repeat interval that is not a positive number of weeks.
    #[error("Invalid interval: {0}. Expected a whole number of weeks >= 1")]
    InvalidInterval(String),

    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Error parsing a date or a zone record.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The waste zone lookup returned no feature for the address.
    #[error("No collection schedule found for this address.")]
    NoCollectionZone,

    /// A persisted schedule that cannot be re-aligned.
    #[error("Stale schedule: {0}")]
    StaleSchedule(String),

    /// Runtime error, e.g. a date outside the representable range.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for binday operations.
pub type Result<T> = std::result::Result<T, BinDayError>;
