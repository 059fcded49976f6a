//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SensorLogError`] via `#[from]`. Adapter failures (database, hashing)
//! are boxed so this crate stays free of IO dependencies.

/// Boxed error coming from an adapter.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum SensorLogError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("credential error")]
    Credential(#[from] CredentialError),

    #[error("storage error")]
    Storage(#[source] BoxedError),

    #[error("password hashing error")]
    Hashing(#[source] BoxedError),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("type must not be empty")]
    EmptyType,

    #[error("role name must not be empty")]
    EmptyRoleName,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// A looked-up record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Outcome of a failed credential operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Role not found")]
    RoleNotFound { role_name: String },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Role already exists")]
    DuplicateRole { role_name: String },
}
