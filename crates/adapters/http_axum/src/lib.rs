//! # sensorlog-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API (`/device`, `/hist/`, `/recent-hist/`, `/auth/`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//! - Allow cross-origin requests from any origin
//!
//! ## Dependency rule
//! Depends on `sensorlog-app` (for port traits and services) and
//! `sensorlog-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
