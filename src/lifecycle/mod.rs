//! Wiring and process-level setup.

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::{CatalogSystem, LifecycleError};
