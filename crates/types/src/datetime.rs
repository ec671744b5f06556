//! Date/time parsing and formatting helpers
//!
//! Chunk analyzers in the wild emit timestamps in several shapes
//! (`2024-03-01`, `2024-03-01 08:30:00`, `2024-03-01T08:30:00Z`). Everything
//! is normalized to a [`NaiveDateTime`]; date-only inputs land on midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Canonical serialization format
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp using the built-in list of ISO-like formats
pub fn parse_flexible(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

/// Parse a timestamp with caller-supplied `strftime` formats.
///
/// Each format is tried first as a full date-time and then as a plain date.
pub fn parse_with_formats<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let value = value.trim();
    formats.iter().find_map(|format| {
        let format = format.as_ref();
        NaiveDateTime::parse_from_str(value, format).ok().or_else(|| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    })
}

/// Human-readable rendering; midnight timestamps print as a bare date
pub fn display(value: &NaiveDateTime) -> String {
    if value.num_seconds_from_midnight() == 0 && value.nanosecond() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Serde adapter for `Option<NaiveDateTime>` fields.
///
/// Use together with `#[serde(default)]` so absent fields become `None`.
pub mod option {
    use super::{parse_flexible, CANONICAL_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.format(CANONICAL_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_flexible(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {s}"))),
        }
    }
}
