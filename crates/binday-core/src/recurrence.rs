//! Recurring collection date computation.
//!
//! A collection pattern is "one fixed weekday, every N weeks", anchored at a
//! reference date that once was a real collection. All computation happens
//! on calendar dates ([`NaiveDate`]), so DST transitions cannot move an
//! occurrence off its day. "Today" is always an explicit argument, which
//! keeps every function here pure and deterministic.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{BinDayError, Result};
use crate::models::{CollectionRule, CollectionStatus, WeekWindow};
use crate::tz::{format_rfc3339, format_rfc3339_utc, local_midnight_to_utc};

/// Number of occurrences generated when the caller does not ask for more.
pub const DEFAULT_OCCURRENCES: usize = 4;

const DAYS_PER_WEEK: u64 = 7;

/// Advance `reference` to the first date on or after it that falls on `weekday`.
///
/// At most six days are added.
pub fn align_to_weekday(reference: NaiveDate, weekday: Weekday) -> Result<NaiveDate> {
    let target = weekday.num_days_from_sunday();
    let current = reference.weekday().num_days_from_sunday();
    let offset = (target + 7 - current) % 7;

    reference
        .checked_add_days(Days::new(u64::from(offset)))
        .ok_or_else(|| out_of_range(reference))
}

/// Compute the next collection on or after `today`.
///
/// The reference is first aligned to `weekday`, then fast-forwarded by whole
/// cycles of `interval_weeks` until it is no longer before `today`. The
/// number of cycles is computed arithmetically, so a reference that is years
/// old costs the same as one from last week. An aligned date equal to
/// `today` is returned as-is, and a reference already on or after `today` is
/// never pushed forward.
///
/// # Errors
///
/// [`BinDayError::InvalidInterval`] if `interval_weeks` is zero, and
/// [`BinDayError::RuntimeError`] if the result is outside the calendar range.
///
/// # Examples
///
/// ```
/// use binday_core::recurrence::next_occurrence;
/// use chrono::{NaiveDate, Weekday};
///
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let next = next_occurrence(reference, Weekday::Wed, 2, today).unwrap();
///
/// assert_eq!(next, NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
/// ```
pub fn next_occurrence(
    reference: NaiveDate,
    weekday: Weekday,
    interval_weeks: u32,
    today: NaiveDate,
) -> Result<NaiveDate> {
    if interval_weeks == 0 {
        return Err(BinDayError::InvalidInterval(interval_weeks.to_string()));
    }

    let aligned = align_to_weekday(reference, weekday)?;
    if aligned >= today {
        return Ok(aligned);
    }

    let period = u64::from(interval_weeks) * DAYS_PER_WEEK;
    let elapsed = (today - aligned).num_days().unsigned_abs();
    let cycles = elapsed.div_ceil(period);

    debug!(
        %reference,
        %aligned,
        %today,
        cycles,
        "fast-forwarding stale reference date"
    );

    aligned
        .checked_add_days(Days::new(cycles * period))
        .ok_or_else(|| out_of_range(aligned))
}

/// Compute `count` consecutive collections starting at the next one.
///
/// The result is strictly increasing, every element falls on `weekday`, and
/// consecutive elements are exactly `interval_weeks * 7` days apart.
///
/// # Errors
///
/// [`BinDayError::RuntimeError`] if the last requested occurrence is outside
/// the calendar range. This is checked before any dates are generated.
pub fn occurrence_sequence(
    reference: NaiveDate,
    weekday: Weekday,
    interval_weeks: u32,
    count: usize,
    today: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let first = next_occurrence(reference, weekday, interval_weeks, today)?;
    let period = u64::from(interval_weeks) * DAYS_PER_WEEK;

    if count > 1 {
        let last = u64::try_from(count - 1)
            .ok()
            .and_then(|cycles| cycles.checked_mul(period))
            .and_then(|days| first.checked_add_days(Days::new(days)));
        if last.is_none() {
            return Err(BinDayError::RuntimeError(format!(
                "{} occurrences from {} run past the calendar range",
                count, first
            )));
        }
    }

    let step = Days::new(period);
    Ok(
        std::iter::successors(Some(first), |current| current.checked_add_days(step))
            .take(count)
            .collect(),
    )
}

/// Sunday and Saturday of the week containing `today`.
///
/// # Errors
///
/// [`BinDayError::RuntimeError`] if the week extends past the calendar range.
pub fn current_week(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    // Sunday = 0, Monday = 1, ..., Saturday = 6
    let days_from_week_start = u64::from(today.weekday().num_days_from_sunday());
    let start = today
        .checked_sub_days(Days::new(days_from_week_start))
        .ok_or_else(|| out_of_range(today))?;
    let end = start
        .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
        .ok_or_else(|| out_of_range(start))?;
    Ok((start, end))
}

/// Whether `date` falls in the Sunday-to-Saturday week containing `today`.
///
/// # Examples
///
/// ```
/// use binday_core::recurrence::is_current_week;
/// use chrono::NaiveDate;
///
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let sunday_before = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let sunday_after = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
///
/// assert!(is_current_week(sunday_before, friday));
/// assert!(!is_current_week(sunday_after, friday));
/// ```
pub fn is_current_week(date: NaiveDate, today: NaiveDate) -> bool {
    // Compared as day offsets so weeks at the ends of the calendar still work
    let days_from_week_start = i64::from(today.weekday().num_days_from_sunday());
    let offset = (date - today).num_days() + days_from_week_start;
    (0..DAYS_PER_WEEK as i64).contains(&offset)
}

/// The current week as local and UTC instants.
///
/// Each boundary is converted independently, so a week containing a DST
/// transition is 167 or 169 hours long.
pub fn week_window(today: NaiveDate, tz: Tz) -> Result<WeekWindow> {
    let (start, end) = current_week(today)?;
    let next_start = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| out_of_range(end))?;

    let start_utc = local_midnight_to_utc(start, tz)?;
    let end_utc = local_midnight_to_utc(next_start, tz)?;

    Ok(WeekWindow {
        start,
        end,
        start_local: format_rfc3339(&start_utc.with_timezone(&tz)),
        end_local: format_rfc3339(&end_utc.with_timezone(&tz)),
        start_utc: format_rfc3339_utc(&start_utc),
        end_utc: format_rfc3339_utc(&end_utc),
    })
}

/// Classify a collection date relative to `today`.
pub fn collection_status(date: NaiveDate, today: NaiveDate) -> CollectionStatus {
    match date.cmp(&today) {
        std::cmp::Ordering::Equal => CollectionStatus::Today,
        std::cmp::Ordering::Less => CollectionStatus::Collected,
        std::cmp::Ordering::Greater => CollectionStatus::Upcoming,
    }
}

impl CollectionRule {
    /// Next collection on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> Result<NaiveDate> {
        next_occurrence(self.reference_date, self.weekday, self.interval_weeks, today)
    }

    /// The next `count` collections.
    pub fn occurrences(&self, count: usize, today: NaiveDate) -> Result<Vec<NaiveDate>> {
        occurrence_sequence(
            self.reference_date,
            self.weekday,
            self.interval_weeks,
            count,
            today,
        )
    }
}

fn out_of_range(date: NaiveDate) -> BinDayError {
    BinDayError::RuntimeError(format!("Date arithmetic out of range near {}", date))
}
