//! History service: use-cases for the reading log.

use sensorlog_domain::error::{NotFoundError, SensorLogError};
use sensorlog_domain::history::{
    HistoryFilter, HistoryRecord, NewReading, RecentReading, clamp_recent_limit,
};
use sensorlog_domain::id::DeviceId;

use crate::ports::{DeviceRepository, HistoryRepository};

/// Application service for recording and querying readings.
///
/// Holds its own device repository to check that readings are attributed
/// to devices that exist.
pub struct HistoryService<H, D> {
    history: H,
    devices: D,
}

impl<H, D> HistoryService<H, D>
where
    H: HistoryRepository,
    D: DeviceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(history: H, devices: D) -> Self {
        Self { history, devices }
    }

    async fn ensure_device(&self, id: DeviceId) -> Result<(), SensorLogError> {
        match self.devices.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()),
        }
    }

    /// Append a reading for an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::NotFound`] if the device does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, reading), fields(device_id = %reading.device_id))]
    pub async fn record_reading(
        &self,
        reading: NewReading,
    ) -> Result<HistoryRecord, SensorLogError> {
        self.ensure_device(reading.device_id).await?;
        self.history.record(reading).await
    }

    /// Query readings matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn query_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryRecord>, SensorLogError> {
        let records = self.history.find(filter).await?;
        tracing::debug!(count = records.len(), "history query");
        Ok(records)
    }

    /// Newest readings joined with their device name.
    ///
    /// `limit` defaults to and is capped at
    /// [`MAX_RECENT_LIMIT`](sensorlog_domain::history::MAX_RECENT_LIMIT).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn recent_history(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<RecentReading>, SensorLogError> {
        self.history.get_recent(clamp_recent_limit(limit)).await
    }

    /// Every reading of one device, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::NotFound`] if the device does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn device_history(
        &self,
        id: DeviceId,
    ) -> Result<Vec<HistoryRecord>, SensorLogError> {
        self.ensure_device(id).await?;
        let filter = HistoryFilter {
            device_ids: vec![id],
            ..HistoryFilter::default()
        };
        self.history.find(&filter).await
    }
}
