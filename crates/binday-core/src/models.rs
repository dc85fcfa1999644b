//! Core data types for binday.
//!
//! This module defines the primary types used throughout the library:
//! - [`BinType`] - The three collected bins
//! - [`CollectionRule`] - Anchor date, weekday and repeat interval for one bin
//! - [`BinSchedule`] / [`Schedule`] - Computed upcoming collection dates
//! - [`SavedSchedule`] - The persisted last lookup
//! - [`CollectionStatus`] - Dashboard classification of a date
//! - [`WeekWindow`] - The Sunday-start week containing today
//! - [`Reminder`] - An evening-before notification
//! - [`MismatchPolicy`] - How re-alignment treats inconsistent stored data

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A bin type served by the collection zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinType {
    /// Green bin, organics.
    Green,
    /// Yellow bin, recycling.
    Recycle,
    /// Red bin, general rubbish.
    Rubbish,
}

impl BinType {
    /// All bin types in display order.
    pub const ALL: [BinType; 3] = [BinType::Green, BinType::Recycle, BinType::Rubbish];

    /// Human readable bin name.
    pub fn label(self) -> &'static str {
        match self {
            BinType::Green => "Green Bin (Organics)",
            BinType::Recycle => "Yellow Bin (Recycling)",
            BinType::Rubbish => "Red Bin (Rubbish)",
        }
    }
}

impl std::fmt::Display for BinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinType::Green => write!(f, "green"),
            BinType::Recycle => write!(f, "recycle"),
            BinType::Rubbish => write!(f, "rubbish"),
        }
    }
}

/// Collection rule for a single bin type.
///
/// `reference_date` is any date that once was a real collection. It may be
/// arbitrarily stale and need not fall on `weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRule {
    pub reference_date: NaiveDate,
    pub weekday: Weekday,
    pub interval_weeks: u32,
}

/// Upcoming collections for one bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinSchedule {
    /// Collection weekday, serialized as the full English name.
    #[serde(with = "weekday_name")]
    pub day: Weekday,
    /// Repeat interval in weeks.
    pub weeks: u32,
    /// Strictly increasing occurrences, the first on or after today.
    pub dates: Vec<NaiveDate>,
}

/// Upcoming collections for all three bins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub green: BinSchedule,
    pub recycle: BinSchedule,
    pub rubbish: BinSchedule,
}

impl Schedule {
    /// Schedule for the given bin type.
    pub fn get(&self, bin: BinType) -> &BinSchedule {
        match bin {
            BinType::Green => &self.green,
            BinType::Recycle => &self.recycle,
            BinType::Rubbish => &self.rubbish,
        }
    }

    /// Iterate bins in display order.
    pub fn iter(&self) -> impl Iterator<Item = (BinType, &BinSchedule)> {
        BinType::ALL.into_iter().map(move |bin| (bin, self.get(bin)))
    }
}

/// The persisted result of the last lookup.
///
/// Treated purely as a cache keyed by `address`: dates are always
/// re-derived on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub address: String,
    pub schedule: Schedule,
}

/// Classification of a collection date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Today,
    Collected,
    Upcoming,
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionStatus::Today => write!(f, "Today!"),
            CollectionStatus::Collected => write!(f, "Collected"),
            CollectionStatus::Upcoming => write!(f, "Upcoming"),
        }
    }
}

/// A collection falling inside the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThisWeekEntry {
    pub bin: BinType,
    pub date: NaiveDate,
    pub status: CollectionStatus,
}

/// The Sunday-to-Saturday week containing a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    /// First day of the week (Sunday).
    pub start: NaiveDate,
    /// Last day of the week (Saturday, inclusive).
    pub end: NaiveDate,
    /// Week start in local time with offset (RFC3339 format).
    pub start_local: String,
    /// Week end (next Sunday 00:00, exclusive) in local time with offset.
    pub end_local: String,
    /// Week start in UTC (RFC3339 format with Z suffix).
    pub start_utc: String,
    /// Week end in UTC (RFC3339 format with Z suffix).
    pub end_utc: String,
}

/// A reminder scheduled the evening before a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub bin: BinType,
    pub label: String,
    pub collection_date: NaiveDate,
    /// Fire time in local time with offset (RFC3339 format).
    pub fire_local: String,
    /// Fire time in UTC (RFC3339 format with Z suffix).
    pub fire_utc: String,
    pub message: String,
}

/// Policy for a stored schedule whose first date is not on its stored weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Refuse to re-align; the address should be looked up again.
    #[default]
    Error,
    /// Re-align onto the stored weekday anyway.
    TrustWeekday,
}

impl MismatchPolicy {
    pub const ALL: [MismatchPolicy; 2] = [MismatchPolicy::Error, MismatchPolicy::TrustWeekday];
}

impl std::fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchPolicy::Error => write!(f, "error"),
            MismatchPolicy::TrustWeekday => write!(f, "trust_weekday"),
        }
    }
}

/// Full English weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full English name of a weekday.
pub fn weekday_full_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_sunday() as usize]
}

/// Serde adapter writing weekdays as full names and reading any name
/// accepted by [`crate::parse::parse_weekday`].
pub(crate) mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_full_name(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        crate::parse::parse_weekday(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_schedule() -> Schedule {
        Schedule {
            green: BinSchedule {
                day: Weekday::Wed,
                weeks: 2,
                dates: vec![date(2024, 3, 27)],
            },
            recycle: BinSchedule {
                day: Weekday::Wed,
                weeks: 2,
                dates: vec![date(2024, 3, 20)],
            },
            rubbish: BinSchedule {
                day: Weekday::Wed,
                weeks: 1,
                dates: vec![date(2024, 3, 20)],
            },
        }
    }

    #[test]
    fn bin_type_display_and_label() {
        assert_eq!(format!("{}", BinType::Green), "green");
        assert_eq!(format!("{}", BinType::Recycle), "recycle");
        assert_eq!(BinType::Rubbish.label(), "Red Bin (Rubbish)");
    }

    #[test]
    fn bin_type_serialization() {
        assert_eq!(
            serde_json::to_string(&BinType::Recycle).unwrap(),
            "\"recycle\""
        );
    }

    #[test]
    fn schedule_iterates_in_display_order() {
        let schedule = sample_schedule();
        let bins: Vec<BinType> = schedule.iter().map(|(bin, _)| bin).collect();
        assert_eq!(bins, BinType::ALL.to_vec());
        assert_eq!(schedule.get(BinType::Rubbish).weeks, 1);
    }

    #[test]
    fn bin_schedule_serializes_full_weekday_and_iso_dates() {
        let json = serde_json::to_string(&sample_schedule().green).unwrap();
        assert_eq!(
            json,
            r#"{"day":"Wednesday","weeks":2,"dates":["2024-03-27"]}"#
        );
    }

    #[test]
    fn saved_schedule_survives_json() {
        let saved = SavedSchedule {
            address: "68 RACECOURSE ROAD PAKENHAM 3810".to_string(),
            schedule: sample_schedule(),
        };
        let json = serde_json::to_string(&saved).unwrap();
        let loaded: SavedSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn bin_schedule_rejects_unknown_weekday() {
        let json = r#"{"day":"Funday","weeks":1,"dates":[]}"#;
        assert!(serde_json::from_str::<BinSchedule>(json).is_err());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", CollectionStatus::Today), "Today!");
        assert_eq!(format!("{}", CollectionStatus::Upcoming), "Upcoming");
    }

    #[test]
    fn mismatch_policy_default_is_error() {
        assert_eq!(MismatchPolicy::default(), MismatchPolicy::Error);
        assert_eq!(MismatchPolicy::Error.to_string(), "error");
        assert_eq!(MismatchPolicy::TrustWeekday.to_string(), "trust_weekday");
    }
}
