//! Schedule assembly and re-alignment.
//!
//! A [`Schedule`] is computed fresh from a zone's collection rules on every
//! lookup. A persisted schedule is only a cache: on reload its dates are
//! re-derived by using the first stored date of each bin as the new
//! reference, so the result always starts on or after today.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{BinDayError, Result};
use crate::models::{
    BinSchedule, BinType, CollectionRule, MismatchPolicy, Schedule, ThisWeekEntry,
    weekday_full_name,
};
use crate::recurrence::{collection_status, is_current_week, occurrence_sequence};
use crate::zone::ZoneRecord;

fn bin_schedule(rule: &CollectionRule, count: usize, today: NaiveDate) -> Result<BinSchedule> {
    Ok(BinSchedule {
        day: rule.weekday,
        weeks: rule.interval_weeks,
        dates: rule.occurrences(count, today)?,
    })
}

/// Build a schedule from one rule per bin type.
pub fn build_schedule(
    rules: &[(BinType, CollectionRule); 3],
    count: usize,
    today: NaiveDate,
) -> Result<Schedule> {
    Ok(Schedule {
        green: bin_schedule(rule_for(rules, BinType::Green)?, count, today)?,
        recycle: bin_schedule(rule_for(rules, BinType::Recycle)?, count, today)?,
        rubbish: bin_schedule(rule_for(rules, BinType::Rubbish)?, count, today)?,
    })
}

fn rule_for(rules: &[(BinType, CollectionRule)], bin: BinType) -> Result<&CollectionRule> {
    rules
        .iter()
        .find(|(b, _)| *b == bin)
        .map(|(_, rule)| rule)
        .ok_or_else(|| BinDayError::ParseError(format!("No collection rule for {}", bin)))
}

/// Decode a zone record and build its schedule.
///
/// # Examples
///
/// ```
/// use binday_core::schedule::schedule_from_zone;
/// use binday_core::tz::parse_tz;
/// use binday_core::zone::parse_zone_json;
/// use chrono::NaiveDate;
///
/// let record = parse_zone_json(r#"{
///     "grn_start":"2024-01-03","grn_day":"Wednesday","grn_weeks":2,
///     "rec_start":"2024-01-10","rec_day":"Wednesday","rec_weeks":2,
///     "rub_start":"2024-01-03","rub_day":"Wednesday","rub_weeks":1}"#).unwrap();
/// let tz = parse_tz("Australia/Melbourne").unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
///
/// let schedule = schedule_from_zone(&record, tz, 4, today).unwrap();
/// assert_eq!(schedule.green.dates[0], NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
/// assert_eq!(schedule.recycle.dates[0], NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
/// ```
pub fn schedule_from_zone(
    record: &ZoneRecord,
    tz: Tz,
    count: usize,
    today: NaiveDate,
) -> Result<Schedule> {
    let rules = record.rules(tz)?;
    build_schedule(&rules, count, today)
}

/// Re-derive a persisted schedule against `today`.
///
/// Each bin's first stored date becomes the new reference date. Stored
/// dates are never returned verbatim.
///
/// # Errors
///
/// [`BinDayError::StaleSchedule`] if a bin has no stored dates, or if its
/// first stored date does not fall on its stored weekday and `policy` is
/// [`MismatchPolicy::Error`].
pub fn realign(
    stored: &Schedule,
    count: usize,
    today: NaiveDate,
    policy: MismatchPolicy,
) -> Result<Schedule> {
    let realign_bin = |bin: BinType| -> Result<BinSchedule> {
        let entry = stored.get(bin);
        let first = *entry.dates.first().ok_or_else(|| {
            BinDayError::StaleSchedule(format!("{} has no stored collection dates", bin))
        })?;

        if first.weekday() != entry.day {
            let detail = format!(
                "{}: first stored date {} is a {} but the schedule says {}",
                bin,
                first,
                weekday_full_name(first.weekday()),
                weekday_full_name(entry.day)
            );
            match policy {
                MismatchPolicy::Error => {
                    return Err(BinDayError::StaleSchedule(format!(
                        "{}. Look the address up again to refresh the collection rules",
                        detail
                    )));
                }
                MismatchPolicy::TrustWeekday => {
                    warn!(%bin, %first, %policy, "{}; re-aligning to the stored weekday", detail);
                }
            }
        }

        debug!(%bin, %first, %today, "re-aligning stored schedule");
        Ok(BinSchedule {
            day: entry.day,
            weeks: entry.weeks,
            dates: occurrence_sequence(first, entry.day, entry.weeks, count, today)?,
        })
    };

    Ok(Schedule {
        green: realign_bin(BinType::Green)?,
        recycle: realign_bin(BinType::Recycle)?,
        rubbish: realign_bin(BinType::Rubbish)?,
    })
}

/// Collections falling in the current week, one per bin at most.
pub fn this_week(schedule: &Schedule, today: NaiveDate) -> Vec<ThisWeekEntry> {
    schedule
        .iter()
        .filter_map(|(bin, entry)| {
            entry
                .dates
                .iter()
                .find(|date| is_current_week(**date, today))
                .map(|&date| ThisWeekEntry {
                    bin,
                    date,
                    status: collection_status(date, today),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CollectionStatus;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> [(BinType, CollectionRule); 3] {
        [
            (
                BinType::Green,
                CollectionRule {
                    reference_date: date(2024, 1, 3),
                    weekday: Weekday::Wed,
                    interval_weeks: 2,
                },
            ),
            (
                BinType::Recycle,
                CollectionRule {
                    reference_date: date(2024, 1, 10),
                    weekday: Weekday::Wed,
                    interval_weeks: 2,
                },
            ),
            (
                BinType::Rubbish,
                CollectionRule {
                    reference_date: date(2023, 6, 5),
                    weekday: Weekday::Wed,
                    interval_weeks: 1,
                },
            ),
        ]
    }

    #[test]
    fn builds_all_bins() {
        let schedule = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();

        assert_eq!(schedule.green.day, Weekday::Wed);
        assert_eq!(schedule.green.weeks, 2);
        assert_eq!(schedule.green.dates[0], date(2024, 3, 27));
        assert_eq!(schedule.recycle.dates[0], date(2024, 3, 20));
        assert_eq!(
            schedule.rubbish.dates,
            vec![
                date(2024, 3, 20),
                date(2024, 3, 27),
                date(2024, 4, 3),
                date(2024, 4, 10)
            ]
        );
    }

    #[test]
    fn schedule_invariants_hold() {
        let today = date(2024, 3, 15);
        let schedule = build_schedule(&rules(), 5, today).unwrap();
        for (_, entry) in schedule.iter() {
            assert_eq!(entry.dates.len(), 5);
            assert!(entry.dates[0] >= today);
            for pair in entry.dates.windows(2) {
                assert_eq!((pair[1] - pair[0]).num_days(), i64::from(entry.weeks) * 7);
            }
            assert!(entry.dates.iter().all(|d| d.weekday() == entry.day));
        }
    }

    #[test]
    fn realign_matches_fresh_computation() {
        let stored = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();
        let later = date(2025, 2, 6);

        let realigned = realign(&stored, 4, later, MismatchPolicy::Error).unwrap();
        let fresh = build_schedule(&rules(), 4, later).unwrap();

        assert_eq!(realigned, fresh);
        assert!(realigned.green.dates[0] >= later);
    }

    #[test]
    fn realign_on_same_day_is_identity() {
        let today = date(2024, 3, 15);
        let stored = build_schedule(&rules(), 4, today).unwrap();
        assert_eq!(
            realign(&stored, 4, today, MismatchPolicy::Error).unwrap(),
            stored
        );
    }

    #[test]
    fn realign_can_change_count() {
        let today = date(2024, 3, 15);
        let stored = build_schedule(&rules(), 2, today).unwrap();
        let longer = realign(&stored, 6, today, MismatchPolicy::Error).unwrap();
        assert_eq!(longer.green.dates.len(), 6);
        assert_eq!(longer.green.dates[..2], stored.green.dates[..]);
    }

    #[test]
    fn realign_rejects_empty_dates() {
        let mut stored = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();
        stored.recycle.dates.clear();
        match realign(&stored, 4, date(2024, 4, 1), MismatchPolicy::Error) {
            Err(BinDayError::StaleSchedule(msg)) => assert!(msg.contains("recycle")),
            other => panic!("Expected StaleSchedule, got {other:?}"),
        }
    }

    #[test]
    fn weekday_mismatch_errors_by_default() {
        let mut stored = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();
        // Upstream moved green collection to Thursdays
        stored.green.day = Weekday::Thu;
        let result = realign(&stored, 4, date(2024, 4, 1), MismatchPolicy::Error);
        match result {
            Err(BinDayError::StaleSchedule(msg)) => {
                assert!(msg.contains("Wednesday"));
                assert!(msg.contains("Thursday"));
            }
            other => panic!("Expected StaleSchedule, got {other:?}"),
        }
    }

    #[test]
    fn weekday_mismatch_trusts_stored_weekday_when_asked() {
        let mut stored = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();
        stored.green.day = Weekday::Thu;
        let realigned = realign(&stored, 4, date(2024, 4, 1), MismatchPolicy::TrustWeekday).unwrap();
        // First stored date Mar 27 (Wed) aligns to Thu Mar 28, then fortnightly
        assert_eq!(realigned.green.dates[0], date(2024, 4, 11));
        assert!(realigned.green.dates.iter().all(|d| d.weekday() == Weekday::Thu));
    }

    #[test]
    fn this_week_picks_collections_in_window() {
        let today = date(2024, 3, 18);
        let schedule = build_schedule(&rules(), 4, today).unwrap();
        let entries = this_week(&schedule, today);

        // Week of Sun Mar 17: recycle and rubbish on Wed Mar 20, green off-week
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bin, BinType::Recycle);
        assert_eq!(entries[0].date, date(2024, 3, 20));
        assert_eq!(entries[0].status, CollectionStatus::Upcoming);
        assert_eq!(entries[1].bin, BinType::Rubbish);
    }

    #[test]
    fn this_week_marks_today() {
        let today = date(2024, 3, 20);
        let schedule = build_schedule(&rules(), 4, today).unwrap();
        let entries = this_week(&schedule, today);
        assert!(entries.iter().all(|e| e.status == CollectionStatus::Today));
    }

    #[test]
    fn this_week_empty_when_nothing_due() {
        let schedule = build_schedule(&rules(), 4, date(2024, 3, 15)).unwrap();
        // Week of Sun Mar 10: Wed Mar 13 already passed and is not in the schedule
        assert!(this_week(&schedule, date(2024, 3, 15)).is_empty());
    }
}
