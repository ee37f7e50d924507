//! UTC timestamp parsing for API payloads.
//!
//! The API mixes RFC 3339 strings with a plain `YYYY-MM-DD HH:MM:SS` form.
//! Both are read as UTC. Use with `#[serde(with = "truckersmp_core::timestamp")]`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an API timestamp as UTC.
#[must_use]
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, PLAIN_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Serialize as RFC 3339.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserialize from either supported format.
///
/// # Errors
///
/// Fails if the value is not a string in a supported format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp `{raw}`")))
}
