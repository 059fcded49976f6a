//! Small helpers shared by the repositories.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use sqlx::types::Json;

use sensorlog_domain::time::Timestamp;

/// Encode a timestamp as fixed-width RFC 3339 UTC text
/// (`2024-01-01T00:00:00.000000Z`). Every stored and bound timestamp goes
/// through here so that `TEXT` comparison in SQL matches time order.
pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Deduplicate `values` into a JSON array bound as a single parameter and
/// expanded with `IN (SELECT value FROM json_each(?))`, so list length never
/// runs into `SQLite`'s bound-variable limit.
pub(crate) fn json_list<T, I>(values: I) -> Json<Vec<T>>
where
    T: Ord + Serialize,
    I: IntoIterator<Item = T>,
{
    Json(values.into_iter().collect::<BTreeSet<T>>().into_iter().collect())
}
