//! Password hashing port.

use std::future::Future;

use sensorlog_domain::error::SensorLogError;

/// Salted, slow, one-way password hashing.
///
/// Implementations must draw a fresh random salt on every call to
/// [`hash`](PasswordHasher::hash), so hashing the same plaintext twice
/// yields two different strings that both verify.
///
/// Both operations are CPU-heavy. Implementations run them off the async
/// worker threads.
pub trait PasswordHasher {
    /// Derive a self-describing hash (algorithm, parameters, salt, digest).
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Hashing`] if the algorithm fails.
    fn hash(
        &self,
        plaintext: &str,
    ) -> impl Future<Output = Result<String, SensorLogError>> + Send;

    /// Check `plaintext` against a hash produced by [`hash`](PasswordHasher::hash).
    ///
    /// # Errors
    ///
    /// Returns [`SensorLogError::Hashing`] if `hash` cannot be parsed.
    /// A well-formed hash that does not match yields `Ok(false)`.
    fn verify(
        &self,
        plaintext: &str,
        hash: &str,
    ) -> impl Future<Output = Result<bool, SensorLogError>> + Send;
}
