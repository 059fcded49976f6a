//! Role: an authentication principal with a salted password hash.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SensorLogError, ValidationError};
use crate::id::RoleId;

/// A stored role. The plaintext password is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub role_name: String,
    /// PHC-formatted hash, including algorithm parameters and salt.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A role awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub role_name: String,
    pub password_hash: String,
}

/// Role name and plaintext password as submitted by a client.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub role_name: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(role_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            password: password.into(),
        }
    }

    /// Check that neither field is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Validation`] naming the first empty field.
    pub fn validate(&self) -> Result<(), SensorLogError> {
        if self.role_name.trim().is_empty() {
            return Err(ValidationError::EmptyRoleName.into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("role_name", &self.role_name)
            .field("password", &"<redacted>")
            .finish()
    }
}
