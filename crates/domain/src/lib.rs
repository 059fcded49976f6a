//! # sensorlog-domain
//!
//! Pure domain model for the sensorlog telemetry backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (telemetry-emitting things identified by name and type)
//! - Define **History records** (timestamped numeric readings attributed to a device)
//! - Define **Roles** (authentication principals holding a salted password hash)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod history;
pub mod role;
