//! Waste zone records.
//!
//! The waste collection zone feature service answers a point query with a
//! GeoJSON feature whose properties carry one reference date, weekday and
//! interval per bin type (`grn_*`, `rec_*`, `rub_*`). This module decodes
//! that response into [`CollectionRule`]s.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BinDayError, Result};
use crate::models::{BinType, CollectionRule};
use crate::parse::{
    DateValue, parse_interval, parse_interval_str, parse_reference_date, parse_weekday,
};

/// Interval field, sent as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeksValue {
    Number(i64),
    Text(String),
}

impl WeeksValue {
    fn parse(&self) -> Result<u32> {
        match self {
            WeeksValue::Number(n) => parse_interval(*n),
            WeeksValue::Text(s) => parse_interval_str(s),
        }
    }
}

/// Properties of a waste collection zone feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub grn_start: DateValue,
    pub grn_day: String,
    pub grn_weeks: WeeksValue,
    pub rec_start: DateValue,
    pub rec_day: String,
    pub rec_weeks: WeeksValue,
    pub rub_start: DateValue,
    pub rub_day: String,
    pub rub_weeks: WeeksValue,
}

impl ZoneRecord {
    /// Decode the collection rule for one bin type.
    pub fn rule(&self, bin: BinType, tz: Tz) -> Result<CollectionRule> {
        let (start, day, weeks) = match bin {
            BinType::Green => (&self.grn_start, &self.grn_day, &self.grn_weeks),
            BinType::Recycle => (&self.rec_start, &self.rec_day, &self.rec_weeks),
            BinType::Rubbish => (&self.rub_start, &self.rub_day, &self.rub_weeks),
        };

        let context = |e: BinDayError| match e {
            BinDayError::ParseError(msg) => BinDayError::ParseError(format!("{bin}: {msg}")),
            other => other,
        };

        Ok(CollectionRule {
            reference_date: parse_reference_date(start, tz).map_err(context)?,
            weekday: parse_weekday(day)?,
            interval_weeks: weeks.parse()?,
        })
    }

    /// Decode the rules for all bin types, in display order.
    pub fn rules(&self, tz: Tz) -> Result<[(BinType, CollectionRule); 3]> {
        Ok([
            (BinType::Green, self.rule(BinType::Green, tz)?),
            (BinType::Recycle, self.rule(BinType::Recycle, tz)?),
            (BinType::Rubbish, self.rule(BinType::Rubbish, tz)?),
        ])
    }
}

/// Parse a feature service response into a [`ZoneRecord`].
///
/// Accepts a GeoJSON `FeatureCollection` (the first feature is used), a
/// single `Feature`, or a bare properties object.
///
/// # Examples
///
/// ```
/// use binday_core::zone::parse_zone_json;
///
/// let json = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{
///     "grn_start":"2024-01-03","grn_day":"Wednesday","grn_weeks":2,
///     "rec_start":"2024-01-10","rec_day":"Wednesday","rec_weeks":2,
///     "rub_start":"2024-01-03","rub_day":"Wednesday","rub_weeks":1}}]}"#;
/// let record = parse_zone_json(json).unwrap();
/// assert_eq!(record.grn_day, "Wednesday");
/// ```
pub fn parse_zone_json(input: &str) -> Result<ZoneRecord> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| BinDayError::ParseError(format!("Invalid zone JSON: {}", e)))?;

    let properties = match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => value
            .get("features")
            .and_then(Value::as_array)
            .and_then(|features| features.first())
            .and_then(|feature| feature.get("properties"))
            .ok_or(BinDayError::NoCollectionZone)?,
        Some("Feature") => value
            .get("properties")
            .ok_or_else(|| BinDayError::ParseError("Feature has no properties".to_string()))?,
        _ => &value,
    };

    ZoneRecord::deserialize(properties)
        .map_err(|e| BinDayError::ParseError(format!("Invalid zone record: {}", e)))
}
