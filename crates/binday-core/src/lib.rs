//! # binday-core
//!
//! Bin collection date computation.
//!
//! Given a collection zone's rules (a historical reference collection, a
//! weekday and a repeat interval in weeks for each bin), this library
//! derives the upcoming collection dates, classifies them against the
//! current Sunday-start week, re-aligns persisted schedules that have gone
//! stale, and works out evening-before reminder times.
//!
//! ## Features
//!
//! - **Stale references**: arbitrarily old or unaligned reference dates are
//!   fast-forwarded in constant time.
//! - **Explicit "today"**: every computation takes the current local date as
//!   an argument, so results are deterministic.
//! - **DST safety**: occurrences are calendar dates; week boundaries and
//!   reminder times are resolved per instant via chrono-tz.
//! - **Loose input**: zone records may carry dates as strings or epoch
//!   milliseconds and weekday names in any case.
//!
//! ## Example
//!
//! ```rust
//! use binday_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let weekday = parse_weekday("Wednesday").unwrap();
//! let reference = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!
//! let dates = occurrence_sequence(reference, weekday, 2, DEFAULT_OCCURRENCES, today).unwrap();
//!
//! assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
//! assert!(!is_current_week(dates[0], today));
//! ```

pub mod error;
pub mod models;
pub mod notify;
pub mod parse;
pub mod recurrence;
pub mod schedule;
pub mod tz;
pub mod zone;

// Re-export commonly used types at the crate root
pub use error::{BinDayError, Result};
pub use models::{
    BinSchedule, BinType, CollectionRule, CollectionStatus, MismatchPolicy, Reminder,
    SavedSchedule, Schedule, ThisWeekEntry, WeekWindow,
};
pub use notify::reminders;
pub use recurrence::{
    DEFAULT_OCCURRENCES, collection_status, is_current_week, next_occurrence,
    occurrence_sequence, week_window,
};
pub use schedule::{build_schedule, realign, schedule_from_zone, this_week};
pub use zone::{ZoneRecord, parse_zone_json};

/// Prelude module for convenient imports.
///
/// ```
/// use binday_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{BinDayError, Result};
    pub use crate::models::*;
    pub use crate::notify::{REMINDER_HOUR, reminders};
    pub use crate::parse::{DateValue, parse_instant, parse_reference_date, parse_weekday};
    pub use crate::recurrence::{
        DEFAULT_OCCURRENCES, collection_status, current_week, is_current_week, next_occurrence,
        occurrence_sequence, week_window,
    };
    pub use crate::schedule::{build_schedule, realign, schedule_from_zone, this_week};
    pub use crate::tz::{DEFAULT_TZ, local_today, parse_tz};
    pub use crate::zone::{ZoneRecord, parse_zone_json};
}
