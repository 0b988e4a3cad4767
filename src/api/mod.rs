//! Remote catalog access.
//!
//! - [`CatalogService`] - What repositories fetch through
//! - [`TmdbClient`] - HTTP implementation against TMDB
//! - [`mock::MockCatalogService`] - Expectation-queue implementation for tests

pub mod client;
pub mod error;
pub mod mock;
pub mod service;

pub use client::TmdbClient;
pub use error::ApiError;
pub use service::{CatalogService, Endpoint};
