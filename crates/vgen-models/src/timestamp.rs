//! Timestamp parsing for service resources.
//!
//! The generation service stores naive UTC datetimes and serializes them
//! without an offset (`2024-05-01T10:15:30.123456`). Other deployments emit
//! RFC 3339 with an offset. Both are accepted and normalized to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a service timestamp, with or without a UTC offset.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::parse_service_timestamp;
/// let with_offset = parse_service_timestamp("2024-05-01T10:15:30Z").unwrap();
/// let naive = parse_service_timestamp("2024-05-01T10:15:30").unwrap();
/// assert_eq!(with_offset, naive);
/// ```
pub fn parse_service_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Serde `with` module for resource timestamps.
pub mod service_time {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_service_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
