//! Generic cache/network synchronization engine.
//!
//! This module provides the building blocks every repository loader is made of.
//!
//! # Main Components
//!
//! - [`Resource`] - Loading / success / error state of a value
//! - [`NetworkBoundResource`] - Builder for one synchronizer session
//! - [`synchronize`] - The same session from five plain parameters
//! - [`ResourceStream`] - Observable output of a session
//! - [`ApiResponse`] - What a remote fetcher yields
//! - [`SyncError`] - Why a session ended in error
//!
//! # Testing
//!
//! See [`mock`] module for in-memory caches and fetch probes.

pub mod error;
pub mod fetch;
pub mod mock;
pub mod resource;
pub mod stream;
pub mod synchronizer;

// Re-export core types for convenience
pub use error::{BoxError, SyncError};
pub use fetch::{ApiResponse, FetchStream};
pub use resource::{Resource, Status};
pub use stream::ResourceStream;
pub use synchronizer::{is_absent, is_absent_or_empty, synchronize, NetworkBoundResource};
