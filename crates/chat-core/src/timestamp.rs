//! Timestamp parsing and serde helpers.
//!
//! Stored data is not consistent about timestamp shape. Besides RFC 3339,
//! values may use a space instead of `T` and may omit the zone designator.
//! Zoneless values are read as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{DirectoryError, Result};

/// Naive layouts accepted after the date/time separator has been normalized.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a timestamp, treating values without a zone designator as UTC.
///
/// ```rust
/// use chat_core::parse_timestamp;
///
/// let a = parse_timestamp("2023-06-15T14:30:00Z").unwrap();
/// let b = parse_timestamp("2023-06-15 14:30:00").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    // Date part is always YYYY-MM-DD, so a space at byte 10 is the separator.
    let normalized = if trimmed.as_bytes().get(10) == Some(&b' ') {
        format!("{}T{}", &trimmed[..10], &trimmed[11..])
    } else {
        trimmed.to_string()
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| DirectoryError::InvalidTimestamp(input.to_string()))
}

/// Format a timestamp the way it is written on the wire.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for required timestamps.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional timestamps.
pub mod lenient_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        timestamp: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timestamp {
            Some(timestamp) => serializer.serialize_some(&super::format_timestamp(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_timestamp(&raw))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_timestamp("2023-06-15T10:00:00Z").unwrap(),
            utc(2023, 6, 15, 10, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2023-06-15T10:00:00.250Z").unwrap().timestamp_millis(),
            utc(2023, 6, 15, 10, 0, 0).timestamp_millis() + 250
        );
    }

    #[test]
    fn test_parse_offset_converts_to_utc() {
        assert_eq!(
            parse_timestamp("2023-06-15T12:00:00+02:00").unwrap(),
            utc(2023, 6, 15, 10, 0, 0)
        );
    }

    #[test]
    fn test_parse_zoneless_is_utc() {
        assert_eq!(
            parse_timestamp("2023-06-15T14:30:00").unwrap(),
            utc(2023, 6, 15, 14, 30, 0)
        );
    }

    #[test]
    fn test_parse_space_separator_without_zone() {
        assert_eq!(
            parse_timestamp("2023-06-15 23:59:59").unwrap(),
            utc(2023, 6, 15, 23, 59, 59)
        );
    }

    #[test]
    fn test_parse_space_separator_with_zone() {
        assert_eq!(
            parse_timestamp("2023-06-15 10:00:00Z").unwrap(),
            utc(2023, 6, 15, 10, 0, 0)
        );
    }

    #[test]
    fn test_parse_without_seconds() {
        assert_eq!(
            parse_timestamp("2023-06-15T08:05").unwrap(),
            utc(2023, 6, 15, 8, 5, 0)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("yesterday-ish").unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidTimestamp(raw) if raw == "yesterday-ish"));
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(&utc(2023, 6, 15, 10, 0, 0)),
            "2023-06-15T10:00:00.000Z"
        );
    }
}
