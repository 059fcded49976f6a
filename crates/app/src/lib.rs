//! # sensorlog-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`: create, list and filter devices
//!   - `HistoryRepository`: append readings, filtered and recent queries
//!   - `RoleRepository`: create and look up roles
//!   - `PasswordHasher`: salted one-way hashing of role passwords
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`: register, list, filter by type
//!   - `HistoryService`: record readings, query history, recent feed
//!   - `RoleService`: create roles, authenticate
//! - Orchestrate domain objects without knowing *how* persistence or hashing works
//!
//! ## Dependency rule
//! Depends on `sensorlog-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
