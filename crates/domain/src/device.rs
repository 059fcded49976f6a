//! Device: a telemetry-emitting thing identified by name and type.

use serde::{Deserialize, Serialize};

use crate::error::{SensorLogError, ValidationError};
use crate::id::DeviceId;

/// A registered device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

impl Device {
    /// Create a builder for a device that has not been stored yet.
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Project to the `{id, name}` pair returned by type filtering.
    #[must_use]
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// `{id, name}` projection of a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
}

/// A device awaiting insertion; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
}

impl NewDevice {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Validation`] when `name` or `device_type`
    /// is blank.
    pub fn validate(&self) -> Result<(), SensorLogError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.device_type.trim().is_empty() {
            return Err(ValidationError::EmptyType.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`NewDevice`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    name: Option<String>,
    device_type: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewDevice`].
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Validation`] if `name` or `device_type`
    /// is missing or blank.
    pub fn build(self) -> Result<NewDevice, SensorLogError> {
        let device = NewDevice {
            name: self.name.unwrap_or_default(),
            device_type: self.device_type.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_device_when_name_and_type_provided() {
        let device = Device::builder()
            .name("boiler")
            .device_type("thermometer")
            .build()
            .unwrap();
        assert_eq!(device.name, "boiler");
        assert_eq!(device.device_type, "thermometer");
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = Device::builder().device_type("thermometer").build();
        assert!(matches!(
            result,
            Err(SensorLogError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_type_is_blank() {
        let result = Device::builder().name("boiler").device_type("  ").build();
        assert!(matches!(
            result,
            Err(SensorLogError::Validation(ValidationError::EmptyType))
        ));
    }

    #[test]
    fn should_serialize_device_type_as_type() {
        let device = Device {
            id: DeviceId::new(1),
            name: "boiler".to_string(),
            device_type: "thermometer".to_string(),
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "boiler", "type": "thermometer"})
        );
    }
}
