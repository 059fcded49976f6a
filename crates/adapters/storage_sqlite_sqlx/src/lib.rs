//! # sensorlog-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `sensorlog-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `sensorlog-app` (for port traits) and `sensorlog-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod device_repo;
mod error;
mod history_repo;
mod pool;
mod role_repo;
mod sql;

pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use history_repo::SqliteHistoryRepository;
pub use pool::{Config, Database};
pub use role_repo::SqliteRoleRepository;
