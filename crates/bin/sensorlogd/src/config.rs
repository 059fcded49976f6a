//! Daemon settings.
//!
//! Read from an optional `sensorlog.toml` in the working directory, then
//! overridden by environment variables:
//!
//! | variable                 | setting               |
//! |--------------------------|-----------------------|
//! | `SENSORLOG_BIND`         | `http.bind`           |
//! | `SENSORLOG_DATABASE_URL` | `storage.database_url`|
//! | `SENSORLOG_LOG`          | `log.filter`          |
//! | `RUST_LOG`               | `log.filter` (wins)   |

use std::net::SocketAddr;

use serde::Deserialize;

const CONFIG_FILE: &str = "sensorlog.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Socket the API listens on.
    pub bind: SocketAddr,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// `sqlx` `SQLite` URL; `?mode=rwc` creates the file on first start.
    pub database_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:sensorlog.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "sensorlogd=info,sensorlog=info,tower_http=debug".to_string(),
        }
    }
}

/// Errors raised while assembling a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read sensorlog.toml")]
    Io(#[from] std::io::Error),
    #[error("failed to parse sensorlog.toml")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}

impl Config {
    /// # Errors
    ///
    /// Fails when the file is unreadable or malformed, when an environment
    /// override cannot be parsed, or when the merged settings are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => Self::parse(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = lookup("SENSORLOG_BIND") {
            let parsed = value.trim().parse::<SocketAddr>();
            self.http.bind = parsed.map_err(|_| ConfigError::InvalidEnv {
                key: "SENSORLOG_BIND",
                value,
            })?;
        }
        if let Some(value) = lookup("SENSORLOG_DATABASE_URL") {
            self.storage.database_url = value;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("SENSORLOG_LOG")) {
            self.log.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind.port() == 0 {
            return Err(ConfigError::Validation("http.bind needs a non-zero port"));
        }
        if self.storage.database_url.trim().is_empty() {
            return Err(ConfigError::Validation("storage.database_url is empty"));
        }
        Ok(())
    }
}
