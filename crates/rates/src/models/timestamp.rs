use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

use crate::errors::RatesError;

/// Render a timestamp the way browsers print `Date.toISOString()`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an upstream RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RatesError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RatesError::shape(format!("invalid timestamp '{}': {}", raw, e)))
}

pub(crate) fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_millisecond_timestamps() {
        let ts = parse_timestamp("2025-06-06T12:55:00.000Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-06-06T12:55:00.000Z");
    }

    #[test]
    fn test_offsets_are_converted_to_utc() {
        let ts = parse_timestamp("2025-06-06T08:55:00-04:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-06-06T12:55:00.000Z");
    }

    #[test]
    fn test_invalid_timestamp_is_shape_error() {
        assert!(matches!(
            parse_timestamp("ayer"),
            Err(RatesError::Shape(_))
        ));
    }
}
