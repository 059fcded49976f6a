//! Shared application state for axum handlers.

use std::sync::Arc;

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};
use sensorlog_app::services::device_service::DeviceService;
use sensorlog_app::services::history_service::HistoryService;
use sensorlog_app::services::role_service::RoleService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and hasher types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<DR, HR, RR, PH> {
    /// Device registry.
    pub device_service: Arc<DeviceService<DR>>,
    /// History log.
    pub history_service: Arc<HistoryService<HR, DR>>,
    /// Credential store.
    pub role_service: Arc<RoleService<RR, PH>>,
}

impl<DR, HR, RR, PH> Clone for AppState<DR, HR, RR, PH> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            history_service: Arc::clone(&self.history_service),
            role_service: Arc::clone(&self.role_service),
        }
    }
}

impl<DR, HR, RR, PH> AppState<DR, HR, RR, PH>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        device_service: DeviceService<DR>,
        history_service: HistoryService<HR, DR>,
        role_service: RoleService<RR, PH>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            history_service: Arc::new(history_service),
            role_service: Arc::new(role_service),
        }
    }
}
