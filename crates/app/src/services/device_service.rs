//! Device service: use-cases for the device registry.

use sensorlog_domain::device::{Device, DeviceSummary, NewDevice};
use sensorlog_domain::error::{NotFoundError, SensorLogError};
use sensorlog_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device registration and lookup.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: NewDevice) -> Result<Device, SensorLogError> {
        device.validate()?;
        let created = self.repo.create(device).await?;
        tracing::info!(device_id = %created.id, "device registered");
        Ok(created)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, SensorLogError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, SensorLogError> {
        self.repo.get_all().await
    }

    /// List the distinct device types.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_device_types(&self) -> Result<Vec<String>, SensorLogError> {
        self.repo.get_types().await
    }

    /// List `{id, name}` for devices whose type is in `types`, or for every
    /// device when `types` is empty.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices_by_type(
        &self,
        types: &[String],
    ) -> Result<Vec<DeviceSummary>, SensorLogError> {
        let devices = if types.is_empty() {
            self.repo.get_all().await?
        } else {
            self.repo.find_by_types(types).await?
        };
        Ok(devices.iter().map(Device::summary).collect())
    }
}
