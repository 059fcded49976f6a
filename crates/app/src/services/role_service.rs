//! Role service: role creation and authentication against the credential store.

use sensorlog_domain::error::{CredentialError, SensorLogError};
use sensorlog_domain::role::{Credentials, NewRole, Role};

use crate::ports::{PasswordHasher, RoleRepository};

/// Application service owning the one hashing scheme used for roles.
pub struct RoleService<R, H> {
    repo: R,
    hasher: H,
}

impl<R, H> RoleService<R, H>
where
    R: RoleRepository,
    H: PasswordHasher,
{
    /// Create a new service backed by the given repository and hasher.
    pub fn new(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Derive a fresh salted hash for `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Hashing`] if the hasher fails.
    pub async fn set_password(&self, plaintext: &str) -> Result<String, SensorLogError> {
        self.hasher.hash(plaintext).await
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Hashing`] if `hash` is malformed.
    pub async fn verify_password(
        &self,
        plaintext: &str,
        hash: &str,
    ) -> Result<bool, SensorLogError> {
        self.hasher.verify(plaintext, hash).await
    }

    /// Create a role, storing only the hash of its password.
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Validation`] for empty fields,
    /// [`CredentialError::DuplicateRole`] if the name is taken, or a
    /// storage/hashing error.
    #[tracing::instrument(skip_all, fields(role_name = %credentials.role_name))]
    pub async fn create_role(&self, credentials: &Credentials) -> Result<Role, SensorLogError> {
        credentials.validate()?;
        let password_hash = self.set_password(&credentials.password).await?;
        let role = self
            .repo
            .create(NewRole {
                role_name: credentials.role_name.clone(),
                password_hash,
            })
            .await?;
        tracing::info!(role_id = %role.id, "role created");
        Ok(role)
    }

    /// Authenticate a role by name and password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::RoleNotFound`] if no such role exists,
    /// [`CredentialError::InvalidPassword`] on mismatch, or a
    /// storage/hashing error.
    #[tracing::instrument(skip_all, fields(role_name = %credentials.role_name))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Role, SensorLogError> {
        let Some(role) = self.repo.find_by_name(&credentials.role_name).await? else {
            tracing::debug!("unknown role");
            return Err(CredentialError::RoleNotFound {
                role_name: credentials.role_name.clone(),
            }
            .into());
        };

        if !self
            .verify_password(&credentials.password, &role.password_hash)
            .await?
        {
            tracing::warn!("password mismatch");
            return Err(CredentialError::InvalidPassword.into());
        }

        Ok(role)
    }
}
