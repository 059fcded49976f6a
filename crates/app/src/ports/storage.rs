//! Storage port: repository traits for persistence.

use std::future::Future;

use sensorlog_domain::device::{Device, NewDevice};
use sensorlog_domain::error::SensorLogError;
use sensorlog_domain::history::{HistoryFilter, HistoryRecord, NewReading, RecentReading};
use sensorlog_domain::id::DeviceId;
use sensorlog_domain::role::{NewRole, Role};

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Insert a device and return it with its generated id.
    fn create(
        &self,
        device: NewDevice,
    ) -> impl Future<Output = Result<Device, SensorLogError>> + Send;

    /// Get a device by its identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SensorLogError>> + Send;

    /// Get all devices, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SensorLogError>> + Send;

    /// Get the distinct device types, sorted.
    fn get_types(&self) -> impl Future<Output = Result<Vec<String>, SensorLogError>> + Send;

    /// Get the devices whose type is one of `types`, ordered by id.
    fn find_by_types(
        &self,
        types: &[String],
    ) -> impl Future<Output = Result<Vec<Device>, SensorLogError>> + Send;
}

/// Append-only store of [`HistoryRecord`]s.
pub trait HistoryRepository {
    /// Append a reading and return it with its generated id.
    fn record(
        &self,
        reading: NewReading,
    ) -> impl Future<Output = Result<HistoryRecord, SensorLogError>> + Send;

    /// Find records matching `filter`, newest first.
    fn find(
        &self,
        filter: &HistoryFilter,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, SensorLogError>> + Send;

    /// Get the `limit` newest readings that belong to an existing device,
    /// joined with the device name.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RecentReading>, SensorLogError>> + Send;
}

/// Repository for [`Role`]s.
pub trait RoleRepository {
    /// Insert a role.
    ///
    /// Must fail with
    /// [`CredentialError::DuplicateRole`](sensorlog_domain::error::CredentialError::DuplicateRole)
    /// when the name is taken, atomically with respect to concurrent calls.
    fn create(&self, role: NewRole) -> impl Future<Output = Result<Role, SensorLogError>> + Send;

    /// Look a role up by its unique name.
    fn find_by_name(
        &self,
        role_name: &str,
    ) -> impl Future<Output = Result<Option<Role>, SensorLogError>> + Send;
}
