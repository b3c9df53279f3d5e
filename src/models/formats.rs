//! Lenient deserializers for the date/time fields sent by the planner client.
//!
//! Browsers submit `<input type="time">` as `HH:MM` and an untouched
//! `<input type="date">` as an empty string, neither of which chrono's default
//! serde impls accept.

use chrono::{NaiveDate, NaiveTime};
use serde::{de, Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a wall-clock time given as `HH:MM:SS` or `HH:MM`.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

/// Parse an optional calendar date; blank input means "no date".
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map(Some)
}

pub fn clock_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock_time(&raw)
        .map_err(|e| de::Error::custom(format!("invalid time '{}': {}", raw, e)))
}

pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_optional_date(&raw)
            .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e))),
    }
}

/// Treats JSON `null` the same as a missing string.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
