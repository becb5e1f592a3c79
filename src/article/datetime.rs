//! Datetime encoding of stored documents
//!
//! Datetimes are written as `%Y-%m-%dT%H:%M:%S+0000` (always UTC, second
//! precision). Reading also accepts RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Output format of document datetimes
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+0000";

/// Format a datetime the way stored documents carry it
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse a document datetime
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|parsed| parsed.with_timezone(&Utc))
}

pub(crate) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(&format_datetime(value)),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_datetime(&raw).map_err(serde::de::Error::custom))
        .transpose()
}
