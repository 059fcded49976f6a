//! Time and timestamp helpers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for reading times and query bounds.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Earliest and latest years a timestamp may fall in, once converted to UTC.
///
/// Four-digit years keep the stored text fixed-width, so text order stays
/// time order.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Parse a client-supplied timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00+02:00`), a naive ISO datetime
/// (`2024-01-01T10:00:00`, read as UTC) or a bare date (`2024-01-01`,
/// midnight UTC).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] if none of the formats match
/// or if the UTC year falls outside [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn parse_timestamp(value: &str) -> Result<Timestamp, ValidationError> {
    let value = value.trim();
    parse_any_format(value)
        .filter(|ts| (MIN_YEAR..=MAX_YEAR).contains(&ts.year()))
        .ok_or_else(|| ValidationError::InvalidTimestamp(value.to_owned()))
}

fn parse_any_format(value: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.to_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
