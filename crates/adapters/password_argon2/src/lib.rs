//! # sensorlog-adapter-password-argon2
//!
//! [`PasswordHasher`] implementation backed by [argon2](https://docs.rs/argon2).
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<digest>`),
//! so the salt and parameters travel with the hash and verification needs
//! nothing else. Each derivation runs on tokio's blocking pool.
//!
//! ## Dependency rule
//! Depends on `sensorlog-app` (for the port trait) and `sensorlog-domain`
//! (for the error type).

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use sensorlog_app::ports::PasswordHasher;
use sensorlog_domain::error::SensorLogError;

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    inner: Arc<Argon2<'static>>,
}

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn hashing_error<E>(err: E) -> SensorLogError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SensorLogError::Hashing(Box::new(err))
}

fn hash_blocking(argon: &Argon2<'_>, plaintext: &str) -> Result<String, SensorLogError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(hashing_error)?;
    Ok(hash.to_string())
}

fn verify_blocking(argon: &Argon2<'_>, plaintext: &str, hash: &str) -> Result<bool, SensorLogError> {
    let parsed = PasswordHash::new(hash).map_err(hashing_error)?;
    match argon.verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(hashing_error(err)),
    }
}

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, plaintext: &str) -> Result<String, SensorLogError> {
        let argon = Arc::clone(&self.inner);
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&argon, &plaintext))
            .await
            .map_err(hashing_error)?
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, SensorLogError> {
        let argon = Arc::clone(&self.inner);
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&argon, &plaintext, &hash))
            .await
            .map_err(hashing_error)?
    }
}
