//! History: append-only, timestamped numeric readings attributed to devices.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, HistoryId};
use crate::time::Timestamp;

/// Number of rows returned by the recent-history feed when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 100;

/// Upper bound on the recent-history feed.
pub const MAX_RECENT_LIMIT: usize = 100;

/// One stored reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: HistoryId,
    /// `None` when the reading is no longer attributed to a device.
    pub device_id: Option<DeviceId>,
    pub timestamp: Timestamp,
    pub value: f64,
}

impl HistoryRecord {
    /// Sort key putting the newest reading first; ties fall back to the
    /// most recently inserted row.
    #[must_use]
    pub fn newest_first_key(&self) -> Reverse<(Timestamp, HistoryId)> {
        Reverse((self.timestamp, self.id))
    }
}

/// A reading awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub device_id: DeviceId,
    pub timestamp: Timestamp,
    pub value: f64,
}

impl NewReading {
    /// Create a builder for constructing a [`NewReading`].
    #[must_use]
    pub fn builder(device_id: DeviceId, value: f64) -> NewReadingBuilder {
        NewReadingBuilder {
            device_id,
            value,
            timestamp: None,
        }
    }
}

/// Step-by-step builder for [`NewReading`].
#[derive(Debug)]
pub struct NewReadingBuilder {
    device_id: DeviceId,
    value: f64,
    timestamp: Option<Timestamp>,
}

impl NewReadingBuilder {
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn maybe_timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Consume the builder; the timestamp defaults to now.
    #[must_use]
    pub fn build(self) -> NewReading {
        NewReading {
            device_id: self.device_id,
            value: self.value,
            timestamp: self.timestamp.unwrap_or_else(crate::time::now),
        }
    }
}

/// Conjunctive filter over history records.
///
/// An empty `device_ids` list means "any device". Both bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub device_ids: Vec<DeviceId>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl HistoryFilter {
    /// `true` when no restriction is applied.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.device_ids.is_empty() && self.start.is_none() && self.end.is_none()
    }

    /// Check whether a record satisfies every active restriction.
    #[must_use]
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        if !self.device_ids.is_empty()
            && !record
                .device_id
                .is_some_and(|id| self.device_ids.contains(&id))
        {
            return false;
        }
        if self.start.is_some_and(|start| record.timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| record.timestamp > end) {
            return false;
        }
        true
    }
}

/// A reading joined with the name of the device that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentReading {
    pub date_time: Timestamp,
    pub value: f64,
    pub device_name: String,
}

/// Clamp a requested recent-history size into `1..=MAX_RECENT_LIMIT`.
#[must_use]
pub fn clamp_recent_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}
