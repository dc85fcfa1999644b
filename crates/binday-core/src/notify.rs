//! Collection reminders.
//!
//! A reminder fires on the evening before each collection at
//! [`REMINDER_HOUR`] local time. Fire times are resolved per reminder in the
//! local timezone, so reminders either side of a DST transition keep their
//! wall-clock hour.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{BinDayError, Result};
use crate::models::{BinType, Reminder, Schedule};
use crate::tz::{format_rfc3339, format_rfc3339_utc, local_to_utc};

/// Local hour at which the evening-before reminder fires.
pub const REMINDER_HOUR: u32 = 18;

/// Reminder text for one collection.
pub fn reminder_message(bin: BinType, date: chrono::NaiveDate) -> String {
    format!(
        "Your {} will be collected tomorrow ({}). Don't forget to put it out tonight!",
        bin.label(),
        date.format("%A, %-d %b")
    )
}

/// Derive the pending reminders for a schedule.
///
/// Returns one reminder per collection whose fire time is strictly after
/// `now`, sorted by fire time.
pub fn reminders(schedule: &Schedule, tz: Tz, now: DateTime<Utc>) -> Result<Vec<Reminder>> {
    let fire_time = NaiveTime::from_hms_opt(REMINDER_HOUR, 0, 0)
        .ok_or_else(|| BinDayError::RuntimeError("Invalid reminder hour".to_string()))?;

    let mut pending = Vec::new();
    for (bin, entry) in schedule.iter() {
        for &date in &entry.dates {
            let eve = date.pred_opt().ok_or_else(|| {
                BinDayError::RuntimeError(format!("No day before collection on {}", date))
            })?;
            let fire_utc = local_to_utc(eve.and_time(fire_time), tz)?;

            if fire_utc <= now {
                debug!(%bin, %date, "skipping reminder already in the past");
                continue;
            }

            pending.push((
                fire_utc,
                Reminder {
                    bin,
                    label: bin.label().to_string(),
                    collection_date: date,
                    fire_local: format_rfc3339(&fire_utc.with_timezone(&tz)),
                    fire_utc: format_rfc3339_utc(&fire_utc),
                    message: reminder_message(bin, date),
                },
            ));
        }
    }

    pending.sort_by_key(|(fire_utc, _)| *fire_utc);
    Ok(pending.into_iter().map(|(_, reminder)| reminder).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BinSchedule;
    use crate::parse::parse_instant;
    use crate::tz::parse_tz;
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn melbourne() -> Tz {
        parse_tz("Australia/Melbourne").unwrap()
    }

    fn schedule() -> Schedule {
        Schedule {
            green: BinSchedule {
                day: Weekday::Wed,
                weeks: 2,
                dates: vec![date(2024, 3, 27), date(2024, 4, 10)],
            },
            recycle: BinSchedule {
                day: Weekday::Wed,
                weeks: 2,
                dates: vec![date(2024, 3, 20), date(2024, 4, 3)],
            },
            rubbish: BinSchedule {
                day: Weekday::Wed,
                weeks: 1,
                dates: vec![date(2024, 3, 20), date(2024, 3, 27)],
            },
        }
    }

    #[test]
    fn message_text() {
        assert_eq!(
            reminder_message(BinType::Recycle, date(2024, 3, 20)),
            "Your Yellow Bin (Recycling) will be collected tomorrow (Wednesday, 20 Mar). \
             Don't forget to put it out tonight!"
        );
    }

    #[test]
    fn fires_evening_before_at_six() {
        let now = parse_instant("2024-03-15T09:00:00+11:00").unwrap();
        let pending = reminders(&schedule(), melbourne(), now).unwrap();

        assert_eq!(pending.len(), 6);
        let first = &pending[0];
        assert_eq!(first.collection_date, date(2024, 3, 20));
        assert_eq!(first.fire_local, "2024-03-19T18:00:00+11:00");
        assert_eq!(first.fire_utc, "2024-03-19T07:00:00Z");
    }

    #[test]
    fn sorted_by_fire_time_with_bins_in_display_order() {
        let now = parse_instant("2024-03-15T09:00:00+11:00").unwrap();
        let pending = reminders(&schedule(), melbourne(), now).unwrap();

        let order: Vec<(BinType, NaiveDate)> = pending
            .iter()
            .map(|r| (r.bin, r.collection_date))
            .collect();
        assert_eq!(
            order,
            vec![
                (BinType::Recycle, date(2024, 3, 20)),
                (BinType::Rubbish, date(2024, 3, 20)),
                (BinType::Green, date(2024, 3, 27)),
                (BinType::Rubbish, date(2024, 3, 27)),
                (BinType::Recycle, date(2024, 4, 3)),
                (BinType::Green, date(2024, 4, 10)),
            ]
        );
    }

    #[test]
    fn past_reminders_are_dropped() {
        // Exactly at the fire time counts as already fired
        let now = parse_instant("2024-03-19T18:00:00+11:00").unwrap();
        let pending = reminders(&schedule(), melbourne(), now).unwrap();
        assert_eq!(pending.len(), 4);
        assert!(pending.iter().all(|r| r.collection_date > date(2024, 3, 20)));
    }

    #[test]
    fn keeps_local_hour_across_dst_end() {
        // Melbourne leaves DST on 2024-04-07; the Apr 9 reminder fires at 18:00 AEST
        let mut s = schedule();
        s.green.dates = vec![date(2024, 4, 3), date(2024, 4, 10)];
        let now = parse_instant("2024-04-01T00:00:00Z").unwrap();
        let pending = reminders(&s, melbourne(), now).unwrap();

        let green: Vec<&Reminder> = pending.iter().filter(|r| r.bin == BinType::Green).collect();
        assert_eq!(green[0].fire_utc, "2024-04-02T07:00:00Z");
        assert_eq!(green[1].fire_local, "2024-04-09T18:00:00+10:00");
        assert_eq!(green[1].fire_utc, "2024-04-09T08:00:00Z");
    }
}
