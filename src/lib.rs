/// Basic application code
pub mod app;
/// Controllers for REST endpoints
pub mod controller;
/// One-way digests for PII fields
pub mod crypto;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Stored record assembly
pub mod model;
/// Record persistence
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
